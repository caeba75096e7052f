//! User-driven camera moves: jump to a typed coordinate, or locate a cell.
//!
//! Both flows validate first and leave the camera untouched on bad input.
//! Rejections are logged at debug level and reported only as `false`.

use tracing::{debug, info};

use crate::camera::Camera;
use crate::grid::{CellIdentifier, HexGrid};
use crate::resolution::{GridResolution, ZoomCorrespondence};
use crate::types::{BoundingBox, LatLong};

/// Zoom used by "go to coordinate", a street-level view.
pub const GOTO_ZOOM: u8 = 16;

/// Input and display state owned by the UI binding layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationState {
    pub search_id: Option<CellIdentifier>,
    pub goto_input: Option<String>,
    pub current_resolution: Option<GridResolution>,
}

impl NavigationState {
    pub fn selection(&self) -> Option<&str> {
        self.search_id.as_deref()
    }
}

/// Parse `"lat,lon"` into a point inside [-90, 90] x [-180, 180].
///
/// Whitespace around either number is ignored, as is anything after a
/// second comma. A part that is empty or only whitespace reads as 0, so
/// `"45,"` is (45, 0); a missing comma is still rejected.
pub fn parse_coordinate(text: &str) -> Option<LatLong> {
    let mut parts = text.split(',');
    let latitude = parse_part(parts.next()?)?;
    let longitude = parse_part(parts.next()?)?;
    let point = LatLong::new(latitude, longitude);
    point.is_valid().then_some(point)
}

fn parse_part(part: &str) -> Option<f64> {
    let part = part.trim();
    if part.is_empty() {
        return Some(0.0);
    }
    part.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Recenter on a typed coordinate at [`GOTO_ZOOM`].
pub fn go_to_coordinate(camera: &mut Camera, text: &str) -> bool {
    match parse_coordinate(text) {
        Some(point) => {
            info!(
                "Going to {:.6}, {:.6} at zoom {}",
                point.latitude, point.longitude, GOTO_ZOOM
            );
            camera.set_view(point, GOTO_ZOOM);
            true
        }
        None => {
            debug!("Ignoring coordinate input {:?}", text);
            false
        }
    }
}

/// Fit the camera to a cell and zoom to where its resolution is displayed.
///
/// When the resolution has no zoom in the correspondence table the zoom
/// chosen by the fit is kept.
pub fn find_cell<G: HexGrid + ?Sized>(camera: &mut Camera, grid: &G, id: &str) -> bool {
    if !grid.is_valid_cell(id) {
        debug!("Ignoring invalid cell identifier {:?}", id);
        return false;
    }

    let boundary = match grid.cell_to_boundary(id) {
        Ok(boundary) => boundary,
        Err(e) => {
            debug!("No boundary for {}: {}", id, e);
            return false;
        }
    };
    let Some(bounds) = BoundingBox::enclosing(&boundary) else {
        debug!("Cell {} has an empty boundary", id);
        return false;
    };
    camera.fit_bounds(&bounds);

    match grid.get_resolution(id) {
        Ok(resolution) => match ZoomCorrespondence::zoom_for_resolution(resolution) {
            Some(zoom) => camera.set_zoom(zoom),
            None => debug!(
                "Resolution {} has no matching zoom, keeping fitted zoom {}",
                resolution,
                camera.zoom()
            ),
        },
        Err(e) => debug!("No resolution for {}: {}", id, e),
    }

    info!(
        "Located cell {} at zoom {} ({:.6}, {:.6})",
        id,
        camera.zoom(),
        camera.center().latitude,
        camera.center().longitude
    );
    true
}
