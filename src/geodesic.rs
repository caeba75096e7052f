use crate::types::LatLong;

/// Great-circle helpers on a spherical Earth.
pub struct Geodesic;

impl Geodesic {
    /// Mean Earth radius, not an ellipsoidal model.
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

    /// Distance between two points using the spherical law of cosines.
    ///
    /// The cosine term is clamped to [-1, 1] so identical and antipodal
    /// points never push `acos` outside its domain.
    pub fn distance_meters(from: &LatLong, to: &LatLong) -> f64 {
        let lat1_rad = from.latitude.to_radians();
        let lat2_rad = to.latitude.to_radians();
        let lon_delta = (to.longitude - from.longitude).to_radians();

        let x = lat1_rad.sin() * lat2_rad.sin()
            + lat1_rad.cos() * lat2_rad.cos() * lon_delta.cos();

        Self::EARTH_RADIUS_METERS * x.clamp(-1.0, 1.0).acos()
    }

    /// Mean of the consecutive-vertex distances along an open chain.
    ///
    /// The segment from the last vertex back to the first is not counted.
    /// Chains with fewer than two vertices have no edges and yield 0.
    pub fn average_edge_length_meters(chain: &[LatLong]) -> f64 {
        if chain.len() < 2 {
            return 0.0;
        }
        let total: f64 = chain
            .windows(2)
            .map(|edge| Self::distance_meters(&edge[0], &edge[1]))
            .sum();
        total / (chain.len() - 1) as f64
    }
}
