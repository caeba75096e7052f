use tracing::info;

use crate::cell_record::{derive_records, CellRecord, LabelSampler};
use crate::grid::HexGrid;
use crate::resolution::GridResolution;
use crate::types::BoundingBox;
use crate::viewport::enumerate_cells;
use crate::HexViewError;

/// The overlay for one settled viewport: enumerate, then describe.
///
/// Pure apart from the label sampler's random draws. Callers replace their
/// previous overlay wholesale with the result.
pub fn build_overlay<G: HexGrid + ?Sized>(
    grid: &G,
    bounds: &BoundingBox,
    resolution: GridResolution,
    selection: Option<&str>,
    sampler: &mut LabelSampler,
) -> Result<Vec<CellRecord>, HexViewError> {
    let cells = enumerate_cells(grid, bounds, resolution)?;
    let records = derive_records(grid, &cells, selection, sampler);
    info!(
        "Overlay rebuilt: {} cells at resolution {} ({} labelled)",
        records.len(),
        resolution,
        records.iter().filter(|r| r.show_label).count()
    );
    Ok(records)
}
