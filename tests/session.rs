#[cfg(test)]
mod tests {
    use clap::Parser;
    use hexview::raster::{Canvas, BACKGROUND_COLOR};
    use hexview::{
        parse_query_string, ring_contains, Camera, Cli, H3Grid, HexGrid, LabelSampler, LatLong,
        MapSession, RedrawScheduler, StartupParams, ViewerConfig,
    };
    use tracing::info;

    const SF_CELL: &str = "8928308280fffff";

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn sf_center() -> LatLong {
        let boundary = H3Grid::new().cell_to_boundary(SF_CELL).unwrap();
        hexview::BoundingBox::enclosing(&boundary)
            .unwrap()
            .get_center_point()
    }

    fn session_at(center: LatLong, zoom: u8) -> MapSession<H3Grid> {
        MapSession::new(
            H3Grid::new(),
            Camera::new(center, zoom, 800, 600),
            LabelSampler::seeded(0.2, 1),
        )
    }

    #[test]
    fn test_first_flush_builds_overlay() {
        init();
        let mut session = session_at(sf_center(), 15);
        assert!(session.redraw_pending());
        assert!(session.overlay().is_empty());

        assert!(session.flush_redraw());
        assert!(!session.redraw_pending());
        assert!(!session.overlay().is_empty());
        assert_eq!(
            session.navigation().current_resolution.map(|r| r.value()),
            Some(9)
        );
        assert!(session.overlay().iter().any(|r| r.id == SF_CELL));

        // Nothing new settled
        assert!(!session.flush_redraw());
    }

    #[test]
    fn test_settles_are_coalesced() {
        init();
        let mut session = session_at(sf_center(), 15);
        session.flush_redraw();

        session.camera_mut().pan_pixels(40.0, 0.0);
        session.camera_settled();
        session.camera_mut().pan_pixels(40.0, 0.0);
        session.camera_settled();
        session.camera_mut().set_zoom(16);
        session.camera_settled();

        assert!(session.flush_redraw());
        assert!(!session.flush_redraw());
        assert_eq!(
            session.navigation().current_resolution.map(|r| r.value()),
            Some(9)
        );
    }

    #[test]
    fn test_scheduler_keeps_latest_state() {
        let mut scheduler = RedrawScheduler::new();
        assert!(scheduler.take().is_none());

        let first = Camera::new(LatLong::new(1.0, 1.0), 6, 100, 100).state();
        let second = Camera::new(LatLong::new(2.0, 2.0), 7, 100, 100).state();
        scheduler.request(first);
        scheduler.request(second);
        assert!(scheduler.is_pending());
        assert_eq!(scheduler.take(), Some(second));
        assert!(scheduler.take().is_none());
    }

    #[test]
    fn test_rebuild_replaces_overlay() {
        init();
        let mut session = session_at(sf_center(), 15);
        session.flush_redraw();
        let count = session.overlay().len();

        session.camera_settled();
        session.flush_redraw();
        assert_eq!(session.overlay().len(), count);

        let mut ids: Vec<&str> = session.overlay().iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn test_find_cell_selects_and_redraws() {
        init();
        let mut session = session_at(LatLong::new(0.0, 0.0), 5);
        session.flush_redraw();

        assert!(session.find_cell(SF_CELL));
        assert_eq!(session.navigation().selection(), Some(SF_CELL));
        assert!(session.redraw_pending());
        session.flush_redraw();

        let selected: Vec<_> = session.overlay().iter().filter(|r| r.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, SF_CELL);
        assert!(selected[0].show_label);
    }

    #[test]
    fn test_rejected_navigation_does_not_redraw() {
        init();
        let mut session = session_at(LatLong::new(0.0, 0.0), 5);
        session.flush_redraw();

        assert!(!session.go_to_coordinate("200,10"));
        assert_eq!(session.navigation().goto_input.as_deref(), Some("200,10"));
        assert!(!session.find_cell("invalid-id"));
        assert!(!session.redraw_pending());
        assert_eq!(session.camera().center(), LatLong::new(0.0, 0.0));
    }

    #[test]
    fn test_go_to_coordinate_schedules_redraw() {
        init();
        let mut session = session_at(LatLong::new(0.0, 0.0), 5);
        session.flush_redraw();

        assert!(session.go_to_coordinate("45,90"));
        assert!(session.redraw_pending());
        assert_eq!(session.camera().zoom(), 16);
    }

    #[test]
    fn test_startup_cell_is_located_after_first_rebuild() {
        init();
        let config = ViewerConfig {
            startup: StartupParams {
                center: LatLong::new(0.0, 0.0),
                zoom: 5,
                h3: Some(SF_CELL.to_string()),
            },
            seed: Some(3),
            ..ViewerConfig::default()
        };
        let mut session = MapSession::from_config(H3Grid::new(), &config);
        assert_eq!(session.navigation().selection(), Some(SF_CELL));
        assert_eq!(session.camera().zoom(), 5);

        // Initial draw, then the deferred lookup moves the camera
        assert!(session.flush_redraw());
        assert_eq!(session.camera().zoom(), 16);
        assert!(session.redraw_pending());

        assert!(session.flush_redraw());
        assert!(session.overlay().iter().any(|r| r.selected && r.id == SF_CELL));
    }

    #[test]
    fn test_cell_at_screen_center() {
        init();
        let mut session = session_at(sf_center(), 16);
        session.flush_redraw();

        let record = session.cell_at(400.0, 300.0).expect("a cell under the center");
        assert_eq!(record.id, SF_CELL);
        assert!(record.tooltip_text().contains(SF_CELL));
    }

    #[test]
    fn test_overlay_across_antimeridian_stays_on_screen() {
        init();
        for zoom in [18, 24] {
            let mut session = session_at(LatLong::new(10.0, 180.0), zoom);
            session.flush_redraw();
            assert!(!session.overlay().is_empty(), "zoom {}", zoom);

            let camera = session.camera();
            let mut widest: f64 = 0.0;
            for record in session.overlay() {
                for (x, y) in camera.project_ring(&record.boundary) {
                    widest = widest.max((x - 400.0).abs());
                    assert!((y - 300.0).abs() < 2_000.0, "zoom {} y {}", zoom, y);
                }
                let (x, _) = camera.project(&record.label_anchor());
                assert!((x - 400.0).abs() < 2_000.0, "zoom {} label x {}", zoom, x);
            }
            info!(
                "zoom {}: {} cells, widest vertex {:.0} px from center",
                zoom,
                session.overlay().len(),
                widest
            );
            assert!(widest < 2_000.0, "zoom {} widest {}", zoom, widest);

            // The cell under the center is the one drawn there
            let record = session.cell_at(400.0, 300.0).expect("a cell under the center");
            let ring = camera.project_ring(&record.boundary);
            assert!(ring_contains(&ring, 400.0, 300.0));
            assert!(session.cell_at(400.0, -5_000.0).is_none());

            let mut canvas = Canvas::new(800, 600);
            for record in session.overlay() {
                let ring = camera.project_ring(&record.boundary);
                canvas.fill_polygon(&ring, 0x00FFA500);
                canvas.draw_ring(&ring, 0x003388FF, 3);
            }
            assert_ne!(canvas.pixel(400, 300), Some(BACKGROUND_COLOR));
        }
    }

    #[test]
    fn test_clear_selection() {
        let mut session = session_at(sf_center(), 16);
        session.find_cell(SF_CELL);
        session.flush_redraw();

        session.clear_selection();
        assert!(session.navigation().selection().is_none());
        assert!(session.redraw_pending());
        session.flush_redraw();
        assert!(session.overlay().iter().all(|r| !r.selected));
    }

    #[test]
    fn test_share_link_round_trip() {
        let mut session = session_at(LatLong::new(12.5, -45.25), 9);
        session.find_cell(SF_CELL);

        let link = session.share_link();
        let params = StartupParams::from_query_string(&link).unwrap();
        assert!(params.center.approx_eq(&session.camera().center(), 1e-6));
        assert_eq!(params.zoom, session.camera().zoom());
        assert_eq!(params.h3.as_deref(), Some(SF_CELL));
    }

    #[test]
    fn test_query_string_defaults_and_values() {
        assert_eq!(
            StartupParams::from_query_string("").unwrap(),
            StartupParams::default()
        );
        let defaults = StartupParams::default();
        assert_eq!(defaults.center, LatLong::new(0.0, 0.0));
        assert_eq!(defaults.zoom, 5);
        assert_eq!(defaults.h3, None);

        let params =
            StartupParams::from_query_string("?lat=37.5&lng=-122.25&zoom=12&h3=8928308280fffff")
                .unwrap();
        assert_eq!(params.center, LatLong::new(37.5, -122.25));
        assert_eq!(params.zoom, 12);
        assert_eq!(params.h3.as_deref(), Some(SF_CELL));

        let empty_h3 = StartupParams::from_query_string("h3=").unwrap();
        assert_eq!(empty_h3.h3, None);
    }

    #[test]
    fn test_query_string_errors() {
        assert!(StartupParams::from_query_string("?lat=north").is_err());
        assert!(StartupParams::from_query_string("?lat=95").is_err());
        assert!(StartupParams::from_query_string("?zoom=99").is_err());
        assert!(StartupParams::from_query_string("?h3=%zz").is_err());
    }

    #[test]
    fn test_parse_query_string_decodes() {
        let params = parse_query_string("?a=1%2C2&b&c=x+y&a=3").unwrap();
        assert_eq!(params.get("a").map(String::as_str), Some("3"));
        assert_eq!(params.get("b").map(String::as_str), Some(""));
        assert_eq!(params.get("c").map(String::as_str), Some("x+y"));

        let params = parse_query_string("name=caf%C3%A9").unwrap();
        assert_eq!(params.get("name").map(String::as_str), Some("café"));
    }

    #[test]
    fn test_config_from_cli() {
        let cli = Cli::try_parse_from([
            "hexview",
            "--link",
            "?lat=10&lng=20&zoom=7&h3=8928308280fffff",
            "--zoom",
            "9",
            "--lng",
            "-30.5",
            "--seed",
            "4",
        ])
        .unwrap();
        let config = ViewerConfig::from_cli(&cli).unwrap();
        assert_eq!(config.startup.center, LatLong::new(10.0, -30.5));
        assert_eq!(config.startup.zoom, 9);
        assert_eq!(config.startup.h3.as_deref(), Some(SF_CELL));
        assert_eq!(config.seed, Some(4));
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let cli = Cli::try_parse_from(["hexview", "--label-sample-rate", "1.5"]).unwrap();
        assert!(ViewerConfig::from_cli(&cli).is_err());

        let cli = Cli::try_parse_from(["hexview", "--min-zoom", "12", "--max-zoom", "8"]).unwrap();
        assert!(ViewerConfig::from_cli(&cli).is_err());

        let cli = Cli::try_parse_from(["hexview", "--lat", "100"]).unwrap();
        assert!(ViewerConfig::from_cli(&cli).is_err());
    }
}
