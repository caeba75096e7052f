pub struct MercatorProjection;

// Constants
pub const LATITUDE_MAX: f64 = 85.05112877980659;
pub const LATITUDE_MIN: f64 = -LATITUDE_MAX;
pub const TILE_SIZE: i32 = 256; // Standard tile size
const PI: f64 = std::f64::consts::PI;

impl MercatorProjection {
    pub fn clamp_latitude(latitude: f64) -> f64 {
        latitude.clamp(LATITUDE_MIN, LATITUDE_MAX)
    }

    pub fn latitude_to_pixel_y(latitude: f64, zoom_level: u8) -> f64 {
        let map_size = Self::get_map_size(zoom_level) as f64;
        let sin_latitude = Self::clamp_latitude(latitude).to_radians().sin();
        (0.5 - ((1.0 + sin_latitude) / (1.0 - sin_latitude)).ln() / (4.0 * PI)) * map_size
    }

    pub fn longitude_to_pixel_x(longitude: f64, zoom_level: u8) -> f64 {
        let map_size = Self::get_map_size(zoom_level) as f64;
        (longitude + 180.0) / 360.0 * map_size
    }

    pub fn pixel_y_to_latitude(pixel_y: f64, zoom_level: u8) -> f64 {
        let map_size = Self::get_map_size(zoom_level) as f64;
        let y = 0.5 - pixel_y.clamp(0.0, map_size) / map_size;
        90.0 - 360.0 * (-y * 2.0 * PI).exp().atan() / PI
    }

    pub fn pixel_x_to_longitude(pixel_x: f64, zoom_level: u8) -> f64 {
        let map_size = Self::get_map_size(zoom_level) as f64;
        360.0 * (pixel_x.clamp(0.0, map_size) / map_size) - 180.0
    }

    /// Width and height of the whole world in pixels.
    pub fn get_map_size(zoom_level: u8) -> i64 {
        (TILE_SIZE as i64) << zoom_level
    }
}
