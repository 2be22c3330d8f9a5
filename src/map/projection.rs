use std::f64::consts::PI;

use crate::geodesy::Location;

/// Conversion between geographic locations and map-relative screen pixels
pub trait ScreenProjection {
    fn screen_from_location(&self, loc: Location) -> (i32, i32);
    fn location_from_screen(&self, px: i32, py: i32) -> Location;
}

/// Web Mercator viewport over the visible map area
#[derive(Clone, Debug)]
pub struct Viewport {
    /// Center longitude (-180 to 180)
    pub center_lon: f64,
    /// Center latitude (-85 to 85)
    pub center_lat: f64,
    /// Zoom level (higher = more zoomed in)
    pub zoom: f64,
    /// Canvas pixel width
    pub width: usize,
    /// Canvas pixel height
    pub height: usize,
}

impl Viewport {
    pub fn new(center_lon: f64, center_lat: f64, zoom: f64, width: usize, height: usize) -> Self {
        Self {
            center_lon,
            center_lat,
            zoom,
            width,
            height,
        }
    }

    /// Whole-world view
    pub fn world(width: usize, height: usize) -> Self {
        Self::new(0.0, 20.0, 1.0, width, height)
    }

    /// Pan the viewport by pixel delta
    pub fn pan(&mut self, dx: i32, dy: i32) {
        let scale = 360.0 / (self.zoom * self.width.max(1) as f64);
        self.center_lon += dx as f64 * scale;
        self.center_lat -= dy as f64 * scale * 0.5; // Mercator distortion

        if self.center_lon > 180.0 {
            self.center_lon -= 360.0;
        } else if self.center_lon < -180.0 {
            self.center_lon += 360.0;
        }

        self.center_lat = self.center_lat.clamp(-85.0, 85.0);
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * 1.5).min(100.0);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / 1.5).max(0.5);
    }

    /// Zoom in keeping the location under (px, py) fixed
    pub fn zoom_in_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, 1.5);
    }

    pub fn zoom_out_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, 1.0 / 1.5);
    }

    fn zoom_at(&mut self, px: i32, py: i32, factor: f64) {
        let (lon, lat) = self.unproject(px, py);
        self.zoom = (self.zoom * factor).clamp(0.5, 100.0);
        let (new_px, new_py) = self.project(lon, lat);
        self.pan(new_px - px, new_py - py);
    }

    /// Normalized Mercator y of the viewport center
    fn center_y(&self) -> f64 {
        mercator_y(self.center_lat)
    }

    /// Pixel coordinates back to (lon, lat)
    pub fn unproject(&self, px: i32, py: i32) -> (f64, f64) {
        let scale = self.zoom * self.width.max(1) as f64;
        let center_x = (self.center_lon + 180.0) / 360.0;

        let x = (px as f64 - self.width as f64 / 2.0) / scale + center_x;
        let y = (py as f64 - self.height as f64 / 2.0) / scale + self.center_y();

        let lon = x * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees();
        (lon, lat)
    }

    /// (lon, lat) to pixel coordinates
    pub fn project(&self, lon: f64, lat: f64) -> (i32, i32) {
        let x = (lon + 180.0) / 360.0;
        let y = mercator_y(lat);

        let center_x = (self.center_lon + 180.0) / 360.0;
        let scale = self.zoom * self.width.max(1) as f64;

        let px = ((x - center_x) * scale + self.width as f64 / 2.0) as i32;
        let py = ((y - self.center_y()) * scale + self.height as f64 / 2.0) as i32;
        (px, py)
    }

    /// Whether a projected point is on (or just off) the canvas
    pub fn is_visible(&self, px: i32, py: i32) -> bool {
        px >= -10 && px < self.width as i32 + 10 && py >= -10 && py < self.height as i32 + 10
    }

    /// Rough bounding box check for a segment
    pub fn line_might_be_visible(&self, p1: (i32, i32), p2: (i32, i32)) -> bool {
        let min_x = p1.0.min(p2.0);
        let max_x = p1.0.max(p2.0);
        let min_y = p1.1.min(p2.1);
        let max_y = p1.1.max(p2.1);

        max_x >= 0 && min_x < self.width as i32 && max_y >= 0 && min_y < self.height as i32
    }
}

impl ScreenProjection for Viewport {
    fn screen_from_location(&self, loc: Location) -> (i32, i32) {
        self.project(loc.lon, loc.lat)
    }

    fn location_from_screen(&self, px: i32, py: i32) -> Location {
        let (lon, lat) = self.unproject(px, py);
        Location::new(lat, lon)
    }
}

/// Web Mercator y in [0, 1] for a latitude, clamped short of the poles
fn mercator_y(lat: f64) -> f64 {
    let lat_rad = lat.clamp(-85.05, 85.05).to_radians();
    (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0
}
