use tracing::{info, warn};

use crate::camera::Camera;
use crate::cell_record::{CellRecord, LabelSampler};
use crate::config::ViewerConfig;
use crate::grid::HexGrid;
use crate::navigation::{self, NavigationState};
use crate::overlay::build_overlay;
use crate::polygon::ring_contains;
use crate::query_parameters::StartupParams;
use crate::resolution::{GridResolution, ZoomCorrespondence};
use crate::scheduler::RedrawScheduler;
use crate::HexViewError;

/// Everything one open map owns: camera, grid, navigation state and the
/// overlay currently on screen.
///
/// Camera changes only mark the overlay stale. The rebuild runs in
/// [`MapSession::flush_redraw`], which the event loop calls once per
/// iteration.
pub struct MapSession<G: HexGrid> {
    camera: Camera,
    grid: G,
    navigation: NavigationState,
    overlay: Vec<CellRecord>,
    sampler: LabelSampler,
    scheduler: RedrawScheduler,
    pending_find: Option<String>,
    initialized: bool,
}

impl<G: HexGrid> MapSession<G> {
    pub fn new(grid: G, camera: Camera, sampler: LabelSampler) -> Self {
        let mut session = Self {
            camera,
            grid,
            navigation: NavigationState::default(),
            overlay: Vec::new(),
            sampler,
            scheduler: RedrawScheduler::new(),
            pending_find: None,
            initialized: false,
        };
        session.camera_settled();
        session
    }

    pub fn from_config(grid: G, config: &ViewerConfig) -> Self {
        let camera = Camera::with_zoom_limits(
            config.startup.center,
            config.startup.zoom,
            config.width,
            config.height,
            config.min_zoom,
            config.max_zoom,
        );
        let sampler = match config.seed {
            Some(seed) => LabelSampler::seeded(config.label_sample_rate, seed),
            None => LabelSampler::new(config.label_sample_rate),
        };
        let mut session = Self::new(grid, camera, sampler);
        if let Some(id) = &config.startup.h3 {
            session.navigation.search_id = Some(id.clone());
            session.pending_find = Some(id.clone());
        }
        session
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Direct camera access for panning and zooming. Call
    /// [`MapSession::camera_settled`] once the movement is over.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn overlay(&self) -> &[CellRecord] {
        &self.overlay
    }

    pub fn camera_settled(&mut self) {
        self.scheduler.request(self.camera.state());
    }

    pub fn redraw_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Rebuild the overlay if any settle arrived since the last call.
    ///
    /// Returns whether a rebuild ran. The first rebuild also locates the
    /// startup cell, which schedules another one.
    pub fn flush_redraw(&mut self) -> bool {
        if self.scheduler.take().is_none() {
            return false;
        }
        if let Err(e) = self.rebuild() {
            warn!("Overlay rebuild failed: {}", e);
        }
        if !self.initialized {
            self.initialized = true;
            if let Some(id) = self.pending_find.take() {
                self.find_cell(&id);
            }
        }
        true
    }

    /// Tear down the current overlay and build a new one for the camera as
    /// it is now.
    pub fn rebuild(&mut self) -> Result<&[CellRecord], HexViewError> {
        self.overlay.clear();
        let resolution = ZoomCorrespondence::resolution_for_zoom(self.camera.zoom());
        self.navigation.current_resolution = Some(resolution);
        self.overlay = build_overlay(
            &self.grid,
            &self.camera.bounds(),
            resolution,
            self.navigation.selection(),
            &mut self.sampler,
        )?;
        Ok(&self.overlay)
    }

    pub fn current_resolution(&self) -> GridResolution {
        self.navigation
            .current_resolution
            .unwrap_or_else(|| ZoomCorrespondence::resolution_for_zoom(self.camera.zoom()))
    }

    pub fn go_to_coordinate(&mut self, text: &str) -> bool {
        self.navigation.goto_input = Some(text.to_string());
        let moved = navigation::go_to_coordinate(&mut self.camera, text);
        if moved {
            self.camera_settled();
        }
        moved
    }

    /// Select `id` and bring it into view. The selection is kept even when
    /// the identifier is rejected, like a search box keeps its text.
    pub fn find_cell(&mut self, id: &str) -> bool {
        let id = id.trim();
        self.navigation.search_id = Some(id.to_string()).filter(|id| !id.is_empty());
        let found = navigation::find_cell(&mut self.camera, &self.grid, id);
        if found {
            self.camera_settled();
        }
        found
    }

    pub fn clear_selection(&mut self) {
        if self.navigation.search_id.take().is_some() {
            info!("Selection cleared");
            self.camera_settled();
        }
    }

    /// The overlay cell under a screen position.
    ///
    /// Tested against the projected rings, the shapes actually drawn, so
    /// cells across the antimeridian are hit where they appear.
    pub fn cell_at(&self, screen_x: f64, screen_y: f64) -> Option<&CellRecord> {
        self.overlay.iter().find(|record| {
            let ring = self.camera.project_ring(&record.boundary);
            ring_contains(&ring, screen_x, screen_y)
        })
    }

    /// Address parameters that reopen the current view.
    pub fn share_link(&self) -> String {
        StartupParams {
            center: self.camera.center(),
            zoom: self.camera.zoom(),
            h3: self.navigation.search_id.clone(),
        }
        .to_query_string()
    }

    pub fn status_line(&self) -> String {
        format!(
            "zoom {} | resolution {} | {} cells",
            self.camera.zoom(),
            self.current_resolution(),
            self.overlay.len()
        )
    }
}
