use tracing::debug;

use crate::grid::{CellIdentifier, HexGrid};
use crate::polygon::BoundingPolygon;
use crate::resolution::GridResolution;
use crate::types::BoundingBox;
use crate::HexViewError;

/// All cells covering the visible rectangle at `resolution`.
///
/// Runs from scratch on every call; the result is never diffed against a
/// previous enumeration.
pub fn enumerate_cells<G: HexGrid + ?Sized>(
    grid: &G,
    bounds: &BoundingBox,
    resolution: GridResolution,
) -> Result<Vec<CellIdentifier>, HexViewError> {
    let polygon = BoundingPolygon::from_bounds(bounds);
    let cells = grid.polygon_to_cells(&polygon, resolution)?;
    debug!(
        "Viewport ({:.5}, {:.5}) .. ({:.5}, {:.5}) at resolution {}: {} cells",
        bounds.min_latitude,
        bounds.min_longitude,
        bounds.max_latitude,
        bounds.max_longitude,
        resolution,
        cells.len()
    );
    Ok(cells)
}
