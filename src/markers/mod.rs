mod city;
mod country;
mod custom;
mod quake;

pub use city::{CityMarker, TRI_SIZE};
pub use country::CountryMarker;
pub use custom::{CustomLocationMarker, CUSTOM_SIZE};
pub use quake::{DepthBand, EarthquakeMarker, QuakeAge, QuakeFeature};

use geojson::{JsonObject, JsonValue};
use rayon::prelude::*;
use tracing::debug;

use crate::geodesy::{point_in_country, Location};
use crate::map::spatial::CountryGrid;

/// String-keyed property map carried over from the source feature
pub type Properties = JsonObject;

/// Named colors used by marker drawing. The canvas decides how each one looks.
///
/// Declaration order is back-to-front drawing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Paint {
    Basemap,
    ThreatLine,
    Shallow,
    Intermediate,
    Deep,
    Glyph,
    City,
    Custom,
    Title,
}

impl Paint {
    pub const ALL: [Paint; 9] = [
        Paint::Basemap,
        Paint::ThreatLine,
        Paint::Shallow,
        Paint::Intermediate,
        Paint::Deep,
        Paint::Glyph,
        Paint::City,
        Paint::Custom,
        Paint::Title,
    ];

    /// Layer slot for this paint
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Drawing surface handed to markers. Coordinates are screen pixels.
pub trait MarkerCanvas {
    fn fill_circle(&mut self, x: i32, y: i32, radius: i32, paint: Paint);
    /// Axis-aligned square centered on (x, y)
    fn fill_square(&mut self, x: i32, y: i32, half: i32, paint: Paint);
    /// Upward triangle centered on (x, y)
    fn fill_triangle(&mut self, x: i32, y: i32, size: i32, paint: Paint);
    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, paint: Paint);
    fn text(&mut self, x: i32, y: i32, text: &str, paint: Paint);
}

/// State shared by every drawable marker
#[derive(Clone, Debug)]
pub struct MarkerBase {
    pub location: Location,
    pub properties: Properties,
    pub hidden: bool,
    pub selected: bool,
    pub clicked: bool,
}

impl MarkerBase {
    pub fn new(location: Location, properties: Properties) -> Self {
        Self {
            location,
            properties,
            hidden: false,
            selected: false,
            clicked: false,
        }
    }

    /// Property rendered as text. Numbers are formatted, other JSON kinds ignored.
    pub fn string_property(&self, key: &str) -> Option<String> {
        match self.properties.get(key)? {
            JsonValue::String(s) => Some(s.clone()),
            JsonValue::Number(n) => Some(n.to_string()),
            JsonValue::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Property parsed as a number, accepting numeric strings
    pub fn number_property(&self, key: &str) -> Option<f64> {
        number_value(self.properties.get(key)?)
    }
}

/// Interpret a JSON value as a number, accepting numeric strings
pub fn number_value(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Capability set shared by cities, quakes and the custom location pin
pub trait Marker {
    fn base(&self) -> &MarkerBase;
    fn base_mut(&mut self) -> &mut MarkerBase;

    /// Draw the marker shape centered on (x, y)
    fn draw_body(&self, canvas: &mut dyn MarkerCanvas, x: i32, y: i32);

    /// Draw the hover title next to (x, y)
    fn draw_title(&self, canvas: &mut dyn MarkerCanvas, x: i32, y: i32);

    /// Whether `cursor` falls on the marker drawn at `at`
    fn contains_screen_point(&self, at: (i32, i32), cursor: (i32, i32)) -> bool;

    fn location(&self) -> Location {
        self.base().location
    }

    fn is_hidden(&self) -> bool {
        self.base().hidden
    }

    /// Body, plus the title when selected. Hidden markers draw nothing.
    fn draw(&self, canvas: &mut dyn MarkerCanvas, x: i32, y: i32) {
        let base = self.base();
        if base.hidden {
            return;
        }
        self.draw_body(canvas, x, y);
        if base.selected {
            self.draw_title(canvas, x, y);
        }
    }
}

/// Handle to a drawable marker
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerId {
    City(usize),
    Quake(usize),
    Custom,
}

/// All markers of a run. Cities, quakes and countries are fixed after load;
/// only display flags and the custom pin change afterwards.
pub struct MarkerSet {
    pub cities: Vec<CityMarker>,
    pub quakes: Vec<EarthquakeMarker>,
    pub countries: Vec<CountryMarker>,
    pub custom: Option<CustomLocationMarker>,
}

impl MarkerSet {
    /// Build the marker model, classifying each quake as land or ocean
    pub fn build(
        cities: Vec<CityMarker>,
        countries: Vec<CountryMarker>,
        quakes: Vec<QuakeFeature>,
    ) -> Self {
        let grid = CountryGrid::build(countries.iter().map(|c| c.bounding_box()), 10.0);

        let quakes: Vec<EarthquakeMarker> = quakes
            .into_par_iter()
            .enumerate()
            .map(|(seq, feature)| {
                match containing_country(feature.location, &countries, &grid) {
                    Some(idx) => EarthquakeMarker::land(feature, seq, countries[idx].name()),
                    None => EarthquakeMarker::ocean(feature, seq),
                }
            })
            .collect();

        debug!(
            cities = cities.len(),
            quakes = quakes.len(),
            countries = countries.len(),
            "marker set built"
        );

        Self {
            cities,
            quakes,
            countries,
            custom: None,
        }
    }

    pub fn get_mut(&mut self, id: MarkerId) -> Option<&mut dyn Marker> {
        match id {
            MarkerId::City(i) => self.cities.get_mut(i).map(|m| m as &mut dyn Marker),
            MarkerId::Quake(i) => self.quakes.get_mut(i).map(|m| m as &mut dyn Marker),
            MarkerId::Custom => self.custom.as_mut().map(|m| m as &mut dyn Marker),
        }
    }

    /// Number of quakes inside some country
    pub fn land_count(&self) -> usize {
        self.quakes.iter().filter(|q| q.is_on_land()).count()
    }

    pub fn ocean_count(&self) -> usize {
        self.quakes.len() - self.land_count()
    }
}

/// Index of the first country, in load order, containing the location
fn containing_country(
    loc: Location,
    countries: &[CountryMarker],
    grid: &CountryGrid,
) -> Option<usize> {
    grid.candidates(loc.lon, loc.lat)
        .into_iter()
        .find(|&idx| point_in_country(loc, &countries[idx]))
}
