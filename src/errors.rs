use thiserror::Error;

#[derive(Debug, Error)]
pub enum HexViewError {
    #[error("invalid cell identifier: {0}")]
    InvalidCell(String),

    #[error("invalid polygon: {0}")]
    InvalidPolygon(String),

    #[error("invalid grid resolution: {0}")]
    InvalidResolution(i64),

    #[error("invalid query parameter `{key}`: {message}")]
    QueryParameter { key: String, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("window error: {0}")]
    Window(String),
}

impl HexViewError {
    pub fn query_parameter(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::QueryParameter {
            key: key.into(),
            message: message.into(),
        }
    }
}

// minifb reports failures through its own error type
impl From<minifb::Error> for HexViewError {
    fn from(err: minifb::Error) -> Self {
        HexViewError::Window(err.to_string())
    }
}
