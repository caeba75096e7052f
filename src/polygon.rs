use crate::types::{BoundingBox, LatLong};
use crate::HexViewError;

/// Explicitly closed ring of points: the last point repeats the first.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingPolygon {
    points: Vec<LatLong>,
}

impl BoundingPolygon {
    pub const MIN_POINTS: usize = 4;

    /// Ring over the four corners of `bounds`.
    ///
    /// Winding: SW, (NE lat, SW lng), NE, (SW lat, NE lng), then SW again.
    pub fn from_bounds(bounds: &BoundingBox) -> Self {
        let sw = bounds.south_west();
        let ne = bounds.north_east();
        Self {
            points: vec![
                LatLong::new(sw.latitude, sw.longitude),
                LatLong::new(ne.latitude, sw.longitude),
                LatLong::new(ne.latitude, ne.longitude),
                LatLong::new(sw.latitude, ne.longitude),
                LatLong::new(sw.latitude, sw.longitude),
            ],
        }
    }

    /// Close an open vertex chain, such as a cell boundary.
    pub fn from_open_chain(chain: &[LatLong]) -> Result<Self, HexViewError> {
        if chain.len() < Self::MIN_POINTS - 1 {
            return Err(HexViewError::InvalidPolygon(format!(
                "need at least {} vertices, got {}",
                Self::MIN_POINTS - 1,
                chain.len()
            )));
        }
        let mut points = Vec::with_capacity(chain.len() + 1);
        points.extend_from_slice(chain);
        points.push(chain[0]);
        Ok(Self { points })
    }

    pub fn points(&self) -> &[LatLong] {
        &self.points
    }

    /// The ring without its closing point.
    pub fn open_chain(&self) -> &[LatLong] {
        &self.points[..self.points.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.points.first() == self.points.last()
    }

    /// The ring with longitudes unwrapped so that it stays contiguous: the
    /// first vertex lands within 180 degrees of `reference` and every
    /// following vertex within 180 degrees of the one before it.
    ///
    /// Cells straddling the antimeridian come back from the grid with
    /// vertices on both sides of it; after unwrapping they project as one
    /// small shape instead of spanning the world.
    pub fn unwrapped_near(&self, reference: f64) -> BoundingPolygon {
        let mut points = Vec::with_capacity(self.points.len());
        let mut previous = reference;
        for point in &self.points {
            let unwrapped = point.wrapped_near(previous);
            previous = unwrapped.longitude;
            points.push(unwrapped);
        }
        BoundingPolygon { points }
    }

    /// Even-odd ray casting in plain latitude/longitude space.
    pub fn contains(&self, point: &LatLong) -> bool {
        let ring: Vec<(f64, f64)> = self
            .points
            .iter()
            .map(|p| (p.longitude, p.latitude))
            .collect();
        ring_contains(&ring, point.longitude, point.latitude)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        // Construction guarantees at least one point
        let mut bounds = BoundingBox::from_point(&self.points[0]);
        for point in &self.points[1..] {
            bounds.extend(point);
        }
        bounds
    }
}

/// Even-odd test of `(x, y)` against a closed planar ring.
pub fn ring_contains(ring: &[(f64, f64)], x: f64, y: f64) -> bool {
    let mut inside = false;
    for edge in ring.windows(2) {
        let ((ax, ay), (bx, by)) = (edge[0], edge[1]);
        if (ay > y) != (by > y) {
            let crossing = ax + (y - ay) / (by - ay) * (bx - ax);
            if x < crossing {
                inside = !inside;
            }
        }
    }
    inside
}
