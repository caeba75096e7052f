use std::fmt;

use crate::HexViewError;

/// Level of the hexagonal grid; higher values are finer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridResolution(u8);

impl GridResolution {
    pub const MIN: GridResolution = GridResolution(0);
    pub const MAX: GridResolution = GridResolution(15);

    pub fn new(value: u8) -> Result<Self, HexViewError> {
        if value > Self::MAX.0 {
            return Err(HexViewError::InvalidResolution(value as i64));
        }
        Ok(Self(value))
    }

    /// Saturating conversion for values computed by formula.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN.0 as i64, Self::MAX.0 as i64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for GridResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// (map zoom, grid resolution); neighbouring zooms may share a resolution
const ZOOM_TO_RESOLUTION: [(u8, u8); 20] = [
    (5, 1),
    (6, 2),
    (7, 3),
    (8, 3),
    (9, 4),
    (10, 5),
    (11, 6),
    (12, 6),
    (13, 7),
    (14, 8),
    (15, 9),
    (16, 9),
    (17, 10),
    (18, 10),
    (19, 11),
    (20, 11),
    (21, 12),
    (22, 13),
    (23, 14),
    (24, 15),
];

const FALLBACK_SLOPE: f64 = 0.7;

/// Map zoom <-> grid resolution correspondence.
pub struct ZoomCorrespondence;

impl ZoomCorrespondence {
    pub const CURATED_ZOOM_MIN: u8 = 5;
    pub const CURATED_ZOOM_MAX: u8 = 24;

    /// Grid resolution displayed at a map zoom.
    ///
    /// Zooms outside the curated table use `floor((zoom - 1) * 0.7)`,
    /// saturated to the valid resolution range.
    pub fn resolution_for_zoom(zoom: u8) -> GridResolution {
        match ZOOM_TO_RESOLUTION.iter().find(|(z, _)| *z == zoom) {
            Some(&(_, res)) => GridResolution(res),
            None => Self::fallback_resolution(zoom),
        }
    }

    pub fn fallback_resolution(zoom: u8) -> GridResolution {
        let value = ((zoom as f64 - 1.0) * FALLBACK_SLOPE).floor() as i64;
        GridResolution::clamped(value)
    }

    /// Zoom that displays `resolution`, from the curated table only.
    ///
    /// When several zooms share a resolution the highest one wins.
    /// Resolutions reachable only through the fallback formula have no
    /// entry and return `None`.
    pub fn zoom_for_resolution(resolution: GridResolution) -> Option<u8> {
        ZOOM_TO_RESOLUTION
            .iter()
            .rev()
            .find(|(_, res)| *res == resolution.0)
            .map(|&(zoom, _)| zoom)
    }

    pub fn is_curated(zoom: u8) -> bool {
        (Self::CURATED_ZOOM_MIN..=Self::CURATED_ZOOM_MAX).contains(&zoom)
    }
}
