use super::{Marker, MarkerBase, MarkerCanvas, Paint, Properties};
use crate::geodesy::Location;

/// Half-extent of the city triangle in screen pixels
pub const TRI_SIZE: i32 = 4;

/// A major city drawn as a fixed-size triangle.
/// Properties: `name`, `country`, `population` (millions, often a numeric string)
#[derive(Clone, Debug)]
pub struct CityMarker {
    base: MarkerBase,
}

impl CityMarker {
    pub fn new(location: Location, properties: Properties) -> Self {
        Self {
            base: MarkerBase::new(location, properties),
        }
    }

    pub fn name(&self) -> Option<String> {
        self.base.string_property("name")
    }

    pub fn country(&self) -> Option<String> {
        self.base.string_property("country")
    }

    pub fn population(&self) -> Option<f64> {
        self.base.number_property("population")
    }

    /// "name, country, population" with `unknown` for anything missing
    pub fn title(&self) -> String {
        let field = |v: Option<String>| v.unwrap_or_else(|| "unknown".to_string());
        format!(
            "{}, {}, {}",
            field(self.name()),
            field(self.country()),
            field(self.base.string_property("population")),
        )
    }
}

impl Marker for CityMarker {
    fn base(&self) -> &MarkerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut MarkerBase {
        &mut self.base
    }

    fn draw_body(&self, canvas: &mut dyn MarkerCanvas, x: i32, y: i32) {
        canvas.fill_triangle(x, y, TRI_SIZE, Paint::City);
    }

    fn draw_title(&self, canvas: &mut dyn MarkerCanvas, x: i32, y: i32) {
        canvas.text(x, y + TRI_SIZE + 4, &self.title(), Paint::Title);
    }

    fn contains_screen_point(&self, at: (i32, i32), cursor: (i32, i32)) -> bool {
        (cursor.0 - at.0).abs() <= TRI_SIZE && (cursor.1 - at.1).abs() <= TRI_SIZE
    }
}
