use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use crate::geodesic::Geodesic;
use crate::grid::{CellIdentifier, HexGrid};
use crate::polygon::BoundingPolygon;
use crate::types::LatLong;
use crate::HexViewError;

/// Share of non-selected cells whose identifier label is drawn per rebuild.
/// The selected cell is always labelled.
pub const DEFAULT_LABEL_SAMPLE_RATE: f64 = 0.2;

/// Display metadata for one visible cell, rebuilt on every redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct CellRecord {
    pub id: CellIdentifier,
    pub boundary: BoundingPolygon,
    pub average_edge_length_m: f64,
    pub area_m2: f64,
    pub selected: bool,
    pub show_label: bool,
}

impl CellRecord {
    pub fn tooltip_text(&self) -> String {
        format!(
            "Cell ID: {} | Average edge length (m): {} | Cell area (m^2): {}",
            self.id,
            format_grouped(self.average_edge_length_m),
            format_grouped(self.area_m2)
        )
    }

    /// Where the identifier label is drawn: the centre of the cell's bounds,
    /// taken on the unwrapped ring and folded back into [-180, 180].
    pub fn label_anchor(&self) -> LatLong {
        let reference = self.boundary.points()[0].longitude;
        self.boundary
            .unwrapped_near(reference)
            .bounding_box()
            .get_center_point()
            .wrapped_near(0.0)
    }
}

/// Per-cell coin flip deciding which labels are drawn.
pub struct LabelSampler {
    rate: f64,
    rng: StdRng,
}

impl LabelSampler {
    pub fn new(rate: f64) -> Self {
        Self {
            rate: Self::sanitize(rate),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sampling, for tests and `--seed`.
    pub fn seeded(rate: f64, seed: u64) -> Self {
        Self {
            rate: Self::sanitize(rate),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn sanitize(rate: f64) -> f64 {
        if rate.is_nan() {
            DEFAULT_LABEL_SAMPLE_RATE
        } else {
            rate.clamp(0.0, 1.0)
        }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn show_label(&mut self, selected: bool) -> bool {
        selected || self.rng.random_bool(self.rate)
    }
}

impl Default for LabelSampler {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL_SAMPLE_RATE)
    }
}

/// Build the record for a single cell.
pub fn derive_record<G: HexGrid + ?Sized>(
    grid: &G,
    id: &str,
    selection: Option<&str>,
    sampler: &mut LabelSampler,
) -> Result<CellRecord, HexViewError> {
    let vertices = grid.cell_to_boundary(id)?;
    // Edges come from the open chain; the closing edge is not averaged in.
    let average_edge_length_m = Geodesic::average_edge_length_meters(&vertices);
    let boundary = BoundingPolygon::from_open_chain(&vertices)?;
    let area_m2 = grid.cell_area_m2(id)?;
    let selected = selection == Some(id);

    Ok(CellRecord {
        id: id.to_string(),
        boundary,
        average_edge_length_m,
        area_m2,
        selected,
        show_label: sampler.show_label(selected),
    })
}

/// Records for every enumerated cell. A cell the grid cannot describe is
/// logged and left out instead of failing the whole redraw.
pub fn derive_records<G: HexGrid + ?Sized>(
    grid: &G,
    cells: &[CellIdentifier],
    selection: Option<&str>,
    sampler: &mut LabelSampler,
) -> Vec<CellRecord> {
    let mut records = Vec::with_capacity(cells.len());
    for id in cells {
        match derive_record(grid, id, selection, sampler) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping cell {}: {}", id, e),
        }
    }
    records
}

/// Thousands-separated number with at most three fraction digits.
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(rounded.len() + int_part.len() / 3 + 1);
    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}
