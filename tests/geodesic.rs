#[cfg(test)]
mod tests {
    use hexview::{Geodesic, LatLong};

    const EPSILON_M: f64 = 1e-6;

    fn approx_equal(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn test_identical_points_are_zero_apart() {
        for point in [
            LatLong::new(0.0, 0.0),
            LatLong::new(37.775938, -122.417950),
            LatLong::new(-89.9, 179.9),
            LatLong::new(90.0, 0.0),
        ] {
            assert_eq!(Geodesic::distance_meters(&point, &point), 0.0);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = LatLong::new(48.8566, 2.3522);
        let b = LatLong::new(-33.8688, 151.2093);
        assert!(approx_equal(
            Geodesic::distance_meters(&a, &b),
            Geodesic::distance_meters(&b, &a),
            EPSILON_M
        ));
    }

    #[test]
    fn test_antipodal_points_do_not_fail() {
        let a = LatLong::new(0.0, 0.0);
        let b = LatLong::new(0.0, 180.0);
        let distance = Geodesic::distance_meters(&a, &b);
        assert!(distance.is_finite());
        assert!(approx_equal(
            distance,
            std::f64::consts::PI * Geodesic::EARTH_RADIUS_METERS,
            1e-3
        ));

        let pole = Geodesic::distance_meters(&LatLong::new(90.0, 0.0), &LatLong::new(-90.0, 0.0));
        assert!(pole.is_finite());
        assert!(pole > 0.0);
    }

    #[test]
    fn test_one_degree_along_equator() {
        let distance =
            Geodesic::distance_meters(&LatLong::new(0.0, 0.0), &LatLong::new(0.0, 1.0));
        let expected = Geodesic::EARTH_RADIUS_METERS * 1f64.to_radians();
        assert!(approx_equal(distance, expected, 1e-3));
        assert!(approx_equal(distance, 111_194.93, 0.01));
    }

    #[test]
    fn test_average_edge_length_skips_closing_edge() {
        let chain = vec![
            LatLong::new(0.0, 0.0),
            LatLong::new(0.0, 1.0),
            LatLong::new(1.0, 1.0),
            LatLong::new(1.0, 0.0),
        ];
        let open_edges = Geodesic::distance_meters(&chain[0], &chain[1])
            + Geodesic::distance_meters(&chain[1], &chain[2])
            + Geodesic::distance_meters(&chain[2], &chain[3]);

        let average = Geodesic::average_edge_length_meters(&chain);
        assert!(approx_equal(average, open_edges / 3.0, EPSILON_M));

        let with_closing =
            (open_edges + Geodesic::distance_meters(&chain[3], &chain[0])) / 4.0;
        assert!(!approx_equal(average, with_closing, EPSILON_M));
    }

    #[test]
    fn test_average_edge_length_of_short_chains() {
        assert_eq!(Geodesic::average_edge_length_meters(&[]), 0.0);
        assert_eq!(
            Geodesic::average_edge_length_meters(&[LatLong::new(1.0, 2.0)]),
            0.0
        );
    }
}
