mod camera;
mod cell_record;
mod config;
mod errors;
mod geodesic;
mod grid;
mod mercator;
mod navigation;
mod overlay;
mod polygon;
mod query_parameters;
pub mod raster;
mod resolution;
mod scheduler;
mod session;
mod types;
mod viewport;

// Create a single, consistent public API
pub use camera::{Camera, CameraState, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, ZOOM_LIMIT};
pub use cell_record::{
    derive_record, derive_records, format_grouped, CellRecord, LabelSampler,
    DEFAULT_LABEL_SAMPLE_RATE,
};
pub use config::{Cli, ViewerConfig};
pub use errors::HexViewError;
pub use geodesic::Geodesic;
pub use grid::{CellIdentifier, H3Grid, HexGrid};
pub use mercator::MercatorProjection;
pub use navigation::{find_cell, go_to_coordinate, parse_coordinate, NavigationState, GOTO_ZOOM};
pub use overlay::build_overlay;
pub use polygon::{ring_contains, BoundingPolygon};
pub use query_parameters::{parse_query_string, StartupParams};
pub use resolution::{GridResolution, ZoomCorrespondence};
pub use scheduler::RedrawScheduler;
pub use session::MapSession;
pub use types::{BoundingBox, LatLong};
pub use viewport::enumerate_cells;
