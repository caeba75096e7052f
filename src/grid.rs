use geo::{LineString, Polygon};
use h3o::geom::{ContainmentMode, TilerBuilder};
use h3o::{CellIndex, Resolution};
use tracing::debug;

use crate::polygon::BoundingPolygon;
use crate::resolution::GridResolution;
use crate::types::LatLong;
use crate::HexViewError;

/// Opaque cell token. Only the grid decides whether one is valid.
pub type CellIdentifier = String;

/// What the viewer needs from a hexagonal grid indexing system.
pub trait HexGrid {
    /// Every cell covering the closed polygon at `resolution`, each once.
    fn polygon_to_cells(
        &self,
        polygon: &BoundingPolygon,
        resolution: GridResolution,
    ) -> Result<Vec<CellIdentifier>, HexViewError>;

    /// Vertices of the cell as an open chain.
    fn cell_to_boundary(&self, cell: &str) -> Result<Vec<LatLong>, HexViewError>;

    fn cell_area_m2(&self, cell: &str) -> Result<f64, HexViewError>;

    fn is_valid_cell(&self, cell: &str) -> bool;

    fn get_resolution(&self, cell: &str) -> Result<GridResolution, HexViewError>;
}

/// H3 grid backed by `h3o`.
#[derive(Debug, Clone)]
pub struct H3Grid {
    containment: ContainmentMode,
}

impl Default for H3Grid {
    fn default() -> Self {
        Self {
            containment: ContainmentMode::IntersectsBoundary,
        }
    }
}

impl H3Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_containment(containment: ContainmentMode) -> Self {
        Self { containment }
    }

    fn parse_cell(cell: &str) -> Result<CellIndex, HexViewError> {
        cell.parse::<CellIndex>()
            .map_err(|e| HexViewError::InvalidCell(format!("{}: {}", cell, e)))
    }

    fn h3_resolution(resolution: GridResolution) -> Result<Resolution, HexViewError> {
        Resolution::try_from(resolution.value())
            .map_err(|_| HexViewError::InvalidResolution(resolution.value() as i64))
    }
}

impl HexGrid for H3Grid {
    fn polygon_to_cells(
        &self,
        polygon: &BoundingPolygon,
        resolution: GridResolution,
    ) -> Result<Vec<CellIdentifier>, HexViewError> {
        // geo works in (x, y) = (longitude, latitude)
        let exterior: Vec<(f64, f64)> = polygon
            .points()
            .iter()
            .map(|p| (p.longitude, p.latitude))
            .collect();
        let shape = Polygon::new(LineString::from(exterior), vec![]);

        // Viewport polygons never cross the antimeridian; without this a
        // box wider than 180 degrees would be read as wrapping around it.
        let mut tiler = TilerBuilder::new(Self::h3_resolution(resolution)?)
            .containment_mode(self.containment)
            .disable_transmeridian_heuristic()
            .build();
        tiler
            .add(shape)
            .map_err(|e| HexViewError::InvalidPolygon(e.to_string()))?;

        let cells: Vec<CellIdentifier> = tiler
            .into_coverage()
            .map(|cell| cell.to_string())
            .collect();
        debug!(
            "Polygon of {} points covers {} cells at resolution {}",
            polygon.len(),
            cells.len(),
            resolution
        );
        Ok(cells)
    }

    fn cell_to_boundary(&self, cell: &str) -> Result<Vec<LatLong>, HexViewError> {
        let index = Self::parse_cell(cell)?;
        Ok(index
            .boundary()
            .iter()
            .map(|vertex| LatLong::new(vertex.lat(), vertex.lng()))
            .collect())
    }

    fn cell_area_m2(&self, cell: &str) -> Result<f64, HexViewError> {
        Ok(Self::parse_cell(cell)?.area_m2())
    }

    fn is_valid_cell(&self, cell: &str) -> bool {
        Self::parse_cell(cell).is_ok()
    }

    fn get_resolution(&self, cell: &str) -> Result<GridResolution, HexViewError> {
        let index = Self::parse_cell(cell)?;
        GridResolution::new(u8::from(index.resolution()))
    }
}
