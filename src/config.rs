use clap::Parser;

use crate::camera::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, ZOOM_LIMIT};
use crate::cell_record::DEFAULT_LABEL_SAMPLE_RATE;
use crate::query_parameters::StartupParams;
use crate::HexViewError;

pub const DEFAULT_WINDOW_WIDTH: usize = 800;
pub const DEFAULT_WINDOW_HEIGHT: usize = 600;

/// `hexview` - browse the H3 hexagonal grid over a map.
///
/// Pan with the arrow keys, zoom with `+`/`-`, hover a cell for its
/// metadata and click it to print its identifier. Type `goto <lat,lon>`,
/// `find <cell>`, `link` or `clear` on stdin while the window is open.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Address parameters to start from, e.g. `?lat=37.77&lng=-122.41&zoom=12&h3=8928308280fffff`.
    ///
    /// Individual flags below override the matching parameter.
    #[arg(long, env = "HEXVIEW_LINK")]
    pub link: Option<String>,

    /// Initial latitude in degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Initial longitude in degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<f64>,

    /// Initial map zoom.
    #[arg(long)]
    pub zoom: Option<u8>,

    /// Cell identifier to select and locate once the map is up.
    #[arg(long)]
    pub h3: Option<String>,

    #[arg(long, default_value_t = DEFAULT_WINDOW_WIDTH)]
    pub width: usize,

    #[arg(long, default_value_t = DEFAULT_WINDOW_HEIGHT)]
    pub height: usize,

    #[arg(long, default_value_t = DEFAULT_MIN_ZOOM)]
    pub min_zoom: u8,

    #[arg(long, default_value_t = DEFAULT_MAX_ZOOM)]
    pub max_zoom: u8,

    /// Share of non-selected cells that get an identifier label, 0 to 1.
    #[arg(long, env = "HEXVIEW_LABEL_SAMPLE_RATE", default_value_t = DEFAULT_LABEL_SAMPLE_RATE)]
    pub label_sample_rate: f64,

    /// Seed for label sampling, for reproducible screenshots.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log at debug level (RUST_LOG takes precedence when set).
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,
}

/// Validated viewer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub startup: StartupParams,
    pub width: usize,
    pub height: usize,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub label_sample_rate: f64,
    pub seed: Option<u64>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            startup: StartupParams::default(),
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            label_sample_rate: DEFAULT_LABEL_SAMPLE_RATE,
            seed: None,
        }
    }
}

impl ViewerConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, HexViewError> {
        let mut startup = match &cli.link {
            Some(link) => StartupParams::from_query_string(link)?,
            None => StartupParams::default(),
        };
        if let Some(lat) = cli.lat {
            startup.center.latitude = lat;
        }
        if let Some(lng) = cli.lng {
            startup.center.longitude = lng;
        }
        if let Some(zoom) = cli.zoom {
            startup.zoom = zoom;
        }
        if let Some(h3) = &cli.h3 {
            startup.h3 = Some(h3.clone()).filter(|id| !id.is_empty());
        }

        let config = Self {
            startup,
            width: cli.width,
            height: cli.height,
            min_zoom: cli.min_zoom,
            max_zoom: cli.max_zoom,
            label_sample_rate: cli.label_sample_rate,
            seed: cli.seed,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), HexViewError> {
        if !self.startup.center.is_valid() {
            return Err(HexViewError::Config(format!(
                "start position {}, {} is outside the valid range",
                self.startup.center.latitude, self.startup.center.longitude
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(HexViewError::Config(format!(
                "window size {}x{} is empty",
                self.width, self.height
            )));
        }
        if self.min_zoom > self.max_zoom || self.max_zoom > ZOOM_LIMIT {
            return Err(HexViewError::Config(format!(
                "zoom limits {}..={} must be ordered and at most {}",
                self.min_zoom, self.max_zoom, ZOOM_LIMIT
            )));
        }
        if !(0.0..=1.0).contains(&self.label_sample_rate) {
            return Err(HexViewError::Config(format!(
                "label sample rate {} is outside 0..=1",
                self.label_sample_rate
            )));
        }
        Ok(())
    }
}
