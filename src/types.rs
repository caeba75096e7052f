use crate::HexViewError;

/// Axis-aligned latitude/longitude rectangle, southwest to northeast.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub min_longitude: f64,
    pub max_latitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    pub fn new(
        min_latitude: f64,
        min_longitude: f64,
        max_latitude: f64,
        max_longitude: f64,
    ) -> Result<Self, HexViewError> {
        if min_latitude > max_latitude || min_longitude > max_longitude {
            return Err(HexViewError::InvalidPolygon(format!(
                "invalid bounding box: ({}, {}) .. ({}, {})",
                min_latitude, min_longitude, max_latitude, max_longitude
            )));
        }
        Ok(Self {
            min_latitude,
            min_longitude,
            max_latitude,
            max_longitude,
        })
    }

    /// Degenerate box covering a single point, the seed of an accumulator.
    pub fn from_point(point: &LatLong) -> Self {
        Self {
            min_latitude: point.latitude,
            min_longitude: point.longitude,
            max_latitude: point.latitude,
            max_longitude: point.longitude,
        }
    }

    /// Smallest box enclosing every point, `None` for an empty slice.
    pub fn enclosing(points: &[LatLong]) -> Option<Self> {
        let mut bounds: Option<BoundingBox> = None;
        for point in points {
            match bounds.as_mut() {
                None => bounds = Some(BoundingBox::from_point(point)),
                Some(b) => b.extend(point),
            }
        }
        bounds
    }

    pub fn extend(&mut self, point: &LatLong) {
        self.min_latitude = self.min_latitude.min(point.latitude);
        self.min_longitude = self.min_longitude.min(point.longitude);
        self.max_latitude = self.max_latitude.max(point.latitude);
        self.max_longitude = self.max_longitude.max(point.longitude);
    }

    pub fn south_west(&self) -> LatLong {
        LatLong::new(self.min_latitude, self.min_longitude)
    }

    pub fn north_east(&self) -> LatLong {
        LatLong::new(self.max_latitude, self.max_longitude)
    }

    pub fn get_center_point(&self) -> LatLong {
        LatLong {
            latitude: (self.min_latitude + self.max_latitude) / 2.0,
            longitude: (self.min_longitude + self.max_longitude) / 2.0,
        }
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.min_latitude
            && latitude <= self.max_latitude
            && longitude >= self.min_longitude
            && longitude <= self.max_longitude
    }

    pub fn contains_point(&self, point: &LatLong) -> bool {
        self.contains(point.latitude, point.longitude)
    }
}

/// A (latitude, longitude) pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLong {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLong {
    pub const LATITUDE_MAX: f64 = 90.0;
    pub const LATITUDE_MIN: f64 = -90.0;
    pub const LONGITUDE_MAX: f64 = 180.0;
    pub const LONGITUDE_MIN: f64 = -180.0;

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Finite and inside [-90, 90] x [-180, 180].
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (Self::LATITUDE_MIN..=Self::LATITUDE_MAX).contains(&self.latitude)
            && (Self::LONGITUDE_MIN..=Self::LONGITUDE_MAX).contains(&self.longitude)
    }

    /// The same point with its longitude shifted by whole turns to lie
    /// within 180 degrees of `reference`.
    pub fn wrapped_near(&self, reference: f64) -> LatLong {
        let offset = ((self.longitude - reference) / 360.0).round() * 360.0;
        LatLong::new(self.latitude, self.longitude - offset)
    }

    // Approximate equality check for floating-point comparisons
    pub fn approx_eq(&self, other: &LatLong, epsilon: f64) -> bool {
        (self.latitude - other.latitude).abs() < epsilon
            && (self.longitude - other.longitude).abs() < epsilon
    }
}
