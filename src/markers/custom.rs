use super::{Marker, MarkerBase, MarkerCanvas, Paint, Properties};
use crate::geodesy::Location;

/// Half-extent of the custom location square in screen pixels
pub const CUSTOM_SIZE: i32 = 3;

/// User-placed orange pin used as the reference point for nearest-quake ranking.
/// Starts hidden until the placement click.
#[derive(Clone, Debug)]
pub struct CustomLocationMarker {
    base: MarkerBase,
}

impl CustomLocationMarker {
    pub fn new(location: Location) -> Self {
        let mut base = MarkerBase::new(location, Properties::new());
        base.hidden = true;
        Self { base }
    }

    /// Move the pin to `location` and show it
    pub fn place(&mut self, location: Location) {
        self.base.location = location;
        self.base.hidden = false;
    }

    pub fn title(&self) -> String {
        let Location { lat, lon } = self.base.location;
        format!(
            "Your location: {:.2}°{}, {:.2}°{}",
            lat.abs(),
            if lat >= 0.0 { "N" } else { "S" },
            lon.abs(),
            if lon >= 0.0 { "E" } else { "W" }
        )
    }
}

impl Marker for CustomLocationMarker {
    fn base(&self) -> &MarkerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut MarkerBase {
        &mut self.base
    }

    fn draw_body(&self, canvas: &mut dyn MarkerCanvas, x: i32, y: i32) {
        canvas.fill_square(x, y, CUSTOM_SIZE, Paint::Custom);
    }

    fn draw_title(&self, canvas: &mut dyn MarkerCanvas, x: i32, y: i32) {
        canvas.text(x, y + CUSTOM_SIZE + 4, &self.title(), Paint::Title);
    }

    fn contains_screen_point(&self, at: (i32, i32), cursor: (i32, i32)) -> bool {
        (cursor.0 - at.0).abs() <= CUSTOM_SIZE && (cursor.1 - at.1).abs() <= CUSTOM_SIZE
    }
}
