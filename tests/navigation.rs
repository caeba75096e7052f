#[cfg(test)]
mod tests {
    use hexview::{
        find_cell, go_to_coordinate, parse_coordinate, Camera, H3Grid, HexGrid, LatLong,
        GOTO_ZOOM,
    };

    const SF_CELL: &str = "8928308280fffff";
    // Resolution 0 cell, which has no zoom in the correspondence table
    const BASE_CELL: &str = "8001fffffffffff";

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn start_camera() -> Camera {
        Camera::new(LatLong::new(0.0, 0.0), 5, 800, 600)
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("45,90"), Some(LatLong::new(45.0, 90.0)));
        assert_eq!(
            parse_coordinate(" -33.5 , 151.25 "),
            Some(LatLong::new(-33.5, 151.25))
        );
        assert_eq!(parse_coordinate("90,-180"), Some(LatLong::new(90.0, -180.0)));
        assert_eq!(parse_coordinate("1,2,3"), Some(LatLong::new(1.0, 2.0)));

        for bad in ["", "45", "200,10", "45,181", "abc,1", "NaN,3", "1,inf", "45;90"] {
            assert_eq!(parse_coordinate(bad), None, "{:?}", bad);
        }
    }

    #[test]
    fn test_parse_coordinate_empty_parts_read_as_zero() {
        assert_eq!(parse_coordinate("45,"), Some(LatLong::new(45.0, 0.0)));
        assert_eq!(parse_coordinate(" ,7"), Some(LatLong::new(0.0, 7.0)));
        assert_eq!(parse_coordinate(","), Some(LatLong::new(0.0, 0.0)));
        assert_eq!(parse_coordinate("95,"), None);

        let mut camera = start_camera();
        assert!(go_to_coordinate(&mut camera, "45,"));
        assert_eq!(camera.center(), LatLong::new(45.0, 0.0));
    }

    #[test]
    fn test_go_to_valid_coordinate() {
        init();
        let mut camera = start_camera();
        assert!(go_to_coordinate(&mut camera, "45,90"));
        assert_eq!(camera.center(), LatLong::new(45.0, 90.0));
        assert_eq!(camera.zoom(), GOTO_ZOOM);
        assert_eq!(GOTO_ZOOM, 16);
    }

    #[test]
    fn test_go_to_invalid_coordinate_is_noop() {
        init();
        let mut camera = start_camera();
        let before = camera.state();
        assert!(!go_to_coordinate(&mut camera, "200,10"));
        assert!(!go_to_coordinate(&mut camera, "not a place"));
        assert_eq!(camera.state(), before);
    }

    #[test]
    fn test_find_invalid_cell_is_noop() {
        init();
        let grid = H3Grid::new();
        let mut camera = start_camera();
        let before = camera.state();
        assert!(!find_cell(&mut camera, &grid, "invalid-id"));
        assert!(!find_cell(&mut camera, &grid, ""));
        assert_eq!(camera.state(), before);
    }

    #[test]
    fn test_find_cell_shows_every_vertex() {
        init();
        let grid = H3Grid::new();
        let mut camera = start_camera();
        assert!(find_cell(&mut camera, &grid, SF_CELL));

        // Resolution 9 is displayed from zoom 16
        assert_eq!(camera.zoom(), 16);
        let visible = camera.bounds();
        for vertex in grid.cell_to_boundary(SF_CELL).unwrap() {
            assert!(visible.contains_point(&vertex), "{:?} not in {:?}", vertex, visible);
        }
    }

    #[test]
    fn test_find_cell_without_table_zoom_keeps_fit() {
        init();
        let grid = H3Grid::new();
        let mut camera = Camera::with_zoom_limits(LatLong::new(0.0, 0.0), 10, 800, 600, 0, 24);

        let boundary = grid.cell_to_boundary(BASE_CELL).unwrap();
        let bounds = hexview::BoundingBox::enclosing(&boundary).unwrap();
        let mut fitted = camera.clone();
        fitted.fit_bounds(&bounds);

        assert!(find_cell(&mut camera, &grid, BASE_CELL));
        assert_eq!(camera.state(), fitted.state());
    }
}
