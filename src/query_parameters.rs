use std::collections::HashMap;

use crate::camera::ZOOM_LIMIT;
use crate::types::LatLong;
use crate::HexViewError;

pub const DEFAULT_LATITUDE: f64 = 0.0;
pub const DEFAULT_LONGITUDE: f64 = 0.0;
pub const DEFAULT_ZOOM: u8 = 5;

/// Initial camera and selection, read once from address parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct StartupParams {
    pub center: LatLong,
    pub zoom: u8,
    pub h3: Option<String>,
}

impl Default for StartupParams {
    fn default() -> Self {
        Self {
            center: LatLong::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE),
            zoom: DEFAULT_ZOOM,
            h3: None,
        }
    }
}

impl StartupParams {
    /// Read `lat`, `lng`, `zoom` and `h3` from a query string such as
    /// `?lat=37.77&lng=-122.41&zoom=12&h3=8928308280fffff`.
    ///
    /// Missing parameters take their defaults; present but malformed ones
    /// are an error. An empty `h3` means no selection.
    pub fn from_query_string(query: &str) -> Result<Self, HexViewError> {
        let params = parse_query_string(query)?;
        let mut startup = StartupParams::default();

        if let Some(lat) = params.get("lat") {
            startup.center.latitude = parse_number("lat", lat)?;
        }
        if let Some(lng) = params.get("lng") {
            startup.center.longitude = parse_number("lng", lng)?;
        }
        if !startup.center.is_valid() {
            return Err(HexViewError::query_parameter(
                "lat/lng",
                format!(
                    "{}, {} is outside the valid range",
                    startup.center.latitude, startup.center.longitude
                ),
            ));
        }
        if let Some(zoom) = params.get("zoom") {
            startup.zoom = parse_zoom(zoom)?;
        }
        startup.h3 = params.get("h3").filter(|id| !id.is_empty()).cloned();

        Ok(startup)
    }

    /// Encode as a query string that [`StartupParams::from_query_string`]
    /// reads back.
    pub fn to_query_string(&self) -> String {
        let mut query = format!(
            "?lat={:.6}&lng={:.6}&zoom={}",
            self.center.latitude, self.center.longitude, self.zoom
        );
        if let Some(h3) = &self.h3 {
            query.push_str("&h3=");
            query.push_str(&percent_encode(h3));
        }
        query
    }
}

/// Split `?a=b&c=d` into decoded key/value pairs. A key without `=` maps
/// to an empty value; later duplicates win.
pub fn parse_query_string(query: &str) -> Result<HashMap<String, String>, HexViewError> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut params = HashMap::new();
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.insert(percent_decode(key)?, percent_decode(value)?);
    }
    Ok(params)
}

fn parse_number(key: &str, value: &str) -> Result<f64, HexViewError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| HexViewError::query_parameter(key, format!("`{}` is not a number", value)))
}

fn parse_zoom(value: &str) -> Result<u8, HexViewError> {
    let zoom = parse_number("zoom", value)?.round();
    if !(0.0..=ZOOM_LIMIT as f64).contains(&zoom) {
        return Err(HexViewError::query_parameter(
            "zoom",
            format!("{} is outside 0..={}", value, ZOOM_LIMIT),
        ));
    }
    Ok(zoom as u8)
}

// `+` is not a space here, matching decodeURIComponent
fn percent_decode(text: &str) -> Result<String, HexViewError> {
    let bytes = text.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let byte = text
                .get(i + 1..i + 3)
                .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .ok_or_else(|| {
                    HexViewError::query_parameter(text, "malformed percent escape")
                })?;
            decoded.push(byte);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(decoded).map_err(|e| HexViewError::query_parameter(text, e.to_string()))
}

fn percent_encode(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len());
    for byte in text.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}
