use crate::mercator::{MercatorProjection, LATITUDE_MAX, LATITUDE_MIN};
use crate::polygon::BoundingPolygon;
use crate::types::{BoundingBox, LatLong};

pub const DEFAULT_MIN_ZOOM: u8 = 5;
pub const DEFAULT_MAX_ZOOM: u8 = 24;
pub const ZOOM_LIMIT: u8 = 30;

/// Center and zoom, enough to tell whether the camera moved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub center: LatLong,
    pub zoom: u8,
}

/// The map camera: what is visible and at which zoom.
#[derive(Debug, Clone)]
pub struct Camera {
    center: LatLong,
    zoom: u8,
    width: usize,
    height: usize,
    min_zoom: u8,
    max_zoom: u8,
}

impl Camera {
    pub fn new(center: LatLong, zoom: u8, width: usize, height: usize) -> Self {
        Self::with_zoom_limits(center, zoom, width, height, DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM)
    }

    pub fn with_zoom_limits(
        center: LatLong,
        zoom: u8,
        width: usize,
        height: usize,
        min_zoom: u8,
        max_zoom: u8,
    ) -> Self {
        let max_zoom = max_zoom.min(ZOOM_LIMIT);
        let min_zoom = min_zoom.min(max_zoom);
        let mut camera = Self {
            center,
            zoom,
            width: width.max(1),
            height: height.max(1),
            min_zoom,
            max_zoom,
        };
        camera.set_view(center, zoom);
        camera
    }

    pub fn center(&self) -> LatLong {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn state(&self) -> CameraState {
        CameraState {
            center: self.center,
            zoom: self.zoom,
        }
    }

    pub fn set_view(&mut self, center: LatLong, zoom: u8) {
        self.center = LatLong::new(
            center.latitude.clamp(LATITUDE_MIN, LATITUDE_MAX),
            center
                .longitude
                .clamp(LatLong::LONGITUDE_MIN, LatLong::LONGITUDE_MAX),
        );
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Change zoom around the current center.
    pub fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn pan_pixels(&mut self, dx: f64, dy: f64) {
        let (x, y) = self.center_pixel();
        let center = self.world_pixel_to_lat_long(x + dx, y + dy, self.zoom);
        self.set_view(center, self.zoom);
    }

    fn center_pixel(&self) -> (f64, f64) {
        (
            MercatorProjection::longitude_to_pixel_x(self.center.longitude, self.zoom),
            MercatorProjection::latitude_to_pixel_y(self.center.latitude, self.zoom),
        )
    }

    fn world_pixel_to_lat_long(&self, x: f64, y: f64, zoom: u8) -> LatLong {
        LatLong::new(
            MercatorProjection::pixel_y_to_latitude(y, zoom),
            MercatorProjection::pixel_x_to_longitude(x, zoom),
        )
    }

    /// Screen position of a geographic point, origin at the top left.
    ///
    /// The point is taken on the copy of the world nearest the center, so
    /// a longitude of -179 sits just east of a camera centered on 180.
    pub fn project(&self, point: &LatLong) -> (f64, f64) {
        self.project_unwrapped(&point.wrapped_near(self.center.longitude))
    }

    /// Screen positions of a ring, unwrapped around the center longitude
    /// so that a cell crossing the antimeridian stays in one piece.
    pub fn project_ring(&self, polygon: &BoundingPolygon) -> Vec<(f64, f64)> {
        polygon
            .unwrapped_near(self.center.longitude)
            .points()
            .iter()
            .map(|point| self.project_unwrapped(point))
            .collect()
    }

    fn project_unwrapped(&self, point: &LatLong) -> (f64, f64) {
        let (cx, cy) = self.center_pixel();
        let x = MercatorProjection::longitude_to_pixel_x(point.longitude, self.zoom);
        let y = MercatorProjection::latitude_to_pixel_y(point.latitude, self.zoom);
        (
            x - cx + self.width as f64 / 2.0,
            y - cy + self.height as f64 / 2.0,
        )
    }

    /// Geographic point under a screen position.
    pub fn unproject(&self, screen_x: f64, screen_y: f64) -> LatLong {
        let (cx, cy) = self.center_pixel();
        self.world_pixel_to_lat_long(
            cx + screen_x - self.width as f64 / 2.0,
            cy + screen_y - self.height as f64 / 2.0,
            self.zoom,
        )
    }

    /// The visible rectangle, clipped to the projectable world.
    pub fn bounds(&self) -> BoundingBox {
        let south_west = self.unproject(0.0, self.height as f64);
        let north_east = self.unproject(self.width as f64, 0.0);
        BoundingBox {
            min_latitude: south_west.latitude,
            min_longitude: south_west.longitude,
            max_latitude: north_east.latitude,
            max_longitude: north_east.longitude,
        }
    }

    /// Center on `bounds` at the highest zoom that still shows all of it.
    pub fn fit_bounds(&mut self, bounds: &BoundingBox) {
        let mut best_zoom = self.min_zoom;
        for zoom in self.min_zoom..=self.max_zoom {
            let (width, height) = Self::projected_extent(bounds, zoom);
            if width <= self.width as f64 && height <= self.height as f64 {
                best_zoom = zoom;
            } else {
                break;
            }
        }

        // Center on the projected middle so the fit holds in Mercator space
        let x = (MercatorProjection::longitude_to_pixel_x(bounds.min_longitude, best_zoom)
            + MercatorProjection::longitude_to_pixel_x(bounds.max_longitude, best_zoom))
            / 2.0;
        let y = (MercatorProjection::latitude_to_pixel_y(bounds.min_latitude, best_zoom)
            + MercatorProjection::latitude_to_pixel_y(bounds.max_latitude, best_zoom))
            / 2.0;
        let center = self.world_pixel_to_lat_long(x, y, best_zoom);
        self.set_view(center, best_zoom);
    }

    fn projected_extent(bounds: &BoundingBox, zoom: u8) -> (f64, f64) {
        let width = MercatorProjection::longitude_to_pixel_x(bounds.max_longitude, zoom)
            - MercatorProjection::longitude_to_pixel_x(bounds.min_longitude, zoom);
        let height = MercatorProjection::latitude_to_pixel_y(bounds.min_latitude, zoom)
            - MercatorProjection::latitude_to_pixel_y(bounds.max_latitude, zoom);
        (width.abs(), height.abs())
    }
}
