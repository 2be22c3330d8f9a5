use crate::braille::BrailleCanvas;
use crate::map::geometry::{draw_line, fill_circle, fill_square, fill_triangle};
use crate::map::projection::{ScreenProjection, Viewport};
use crate::markers::{CountryMarker, Marker, MarkerCanvas, MarkerSet, Paint};

/// A geographic line (sequence of lon/lat coordinates)
pub type LineString = Vec<(f64, f64)>;

/// Display toggles
#[derive(Clone)]
pub struct DisplaySettings {
    pub show_outlines: bool,
    pub show_legend: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_outlines: true,
            show_legend: true,
        }
    }
}

/// Text placed at a character cell on top of the Braille layers
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub col: u16,
    pub row: u16,
    pub text: String,
    pub paint: Paint,
}

/// One Braille canvas per paint plus overlaid text labels
pub struct MarkerLayers {
    layers: Vec<BrailleCanvas>,
    labels: Vec<Label>,
}

impl MarkerLayers {
    /// Layers sized in terminal characters
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            layers: Paint::ALL.iter().map(|_| BrailleCanvas::new(width, height)).collect(),
            labels: Vec::new(),
        }
    }

    pub fn layer(&self, paint: Paint) -> &BrailleCanvas {
        &self.layers[paint.index()]
    }

    fn layer_mut(&mut self, paint: Paint) -> &mut BrailleCanvas {
        &mut self.layers[paint.index()]
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }
}

impl MarkerCanvas for MarkerLayers {
    fn fill_circle(&mut self, x: i32, y: i32, radius: i32, paint: Paint) {
        fill_circle(self.layer_mut(paint), x, y, radius);
    }

    fn fill_square(&mut self, x: i32, y: i32, half: i32, paint: Paint) {
        fill_square(self.layer_mut(paint), x, y, half);
    }

    fn fill_triangle(&mut self, x: i32, y: i32, size: i32, paint: Paint) {
        fill_triangle(self.layer_mut(paint), x, y, size);
    }

    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, paint: Paint) {
        draw_line(self.layer_mut(paint), x0, y0, x1, y1);
    }

    fn text(&mut self, x: i32, y: i32, text: &str, paint: Paint) {
        // Braille pixels to character cells
        if x < 0 || y < 0 {
            return;
        }
        let (Ok(col), Ok(row)) = (u16::try_from(x / 2), u16::try_from(y / 4)) else {
            return;
        };
        self.labels.push(Label {
            col,
            row,
            text: text.to_string(),
            paint,
        });
    }
}

/// Country outlines standing in for basemap tiles
pub struct Basemap {
    outlines: Vec<LineString>,
    pub settings: DisplaySettings,
}

impl Basemap {
    pub fn new() -> Self {
        Self {
            outlines: Vec::new(),
            settings: DisplaySettings::default(),
        }
    }

    /// Basemap built from the exterior rings of every country
    pub fn from_countries(countries: &[CountryMarker]) -> Self {
        let mut basemap = Self::new();
        for country in countries {
            basemap.outlines.extend(country.outlines());
        }
        basemap
    }

    pub fn has_data(&self) -> bool {
        !self.outlines.is_empty()
    }

    pub fn toggle_outlines(&mut self) {
        self.settings.show_outlines = !self.settings.show_outlines;
    }

    pub fn toggle_legend(&mut self) {
        self.settings.show_legend = !self.settings.show_legend;
    }

    /// Render basemap and markers into fresh layers of `width` x `height` characters
    pub fn render(
        &self,
        markers: &MarkerSet,
        width: usize,
        height: usize,
        viewport: &Viewport,
    ) -> MarkerLayers {
        let mut layers = MarkerLayers::new(width, height);

        if self.settings.show_outlines {
            let canvas = layers.layer_mut(Paint::Basemap);
            for line in &self.outlines {
                draw_linestring(canvas, line, viewport);
            }
        }

        draw_markers(markers, viewport, &mut layers);
        layers
    }
}

impl Default for Basemap {
    fn default() -> Self {
        Self::new()
    }
}

/// Forward drawing to each marker: quakes first, cities on top, the custom pin last.
/// A clicked ocean quake also gets lines to its threatened cities.
pub fn draw_markers(markers: &MarkerSet, viewport: &Viewport, canvas: &mut dyn MarkerCanvas) {
    for quake in &markers.quakes {
        let at = viewport.screen_from_location(quake.location());
        let targets: Vec<(i32, i32)> = quake
            .threatened_cities()
            .filter_map(|i| markers.cities.get(i))
            .map(|city| viewport.screen_from_location(city.location()))
            .collect();
        quake.draw_threat_lines(canvas, at, &targets);
    }

    for quake in &markers.quakes {
        draw_if_visible(quake, viewport, canvas);
    }
    for city in &markers.cities {
        draw_if_visible(city, viewport, canvas);
    }
    if let Some(custom) = &markers.custom {
        draw_if_visible(custom, viewport, canvas);
    }
}

fn draw_if_visible(marker: &dyn Marker, viewport: &Viewport, canvas: &mut dyn MarkerCanvas) {
    let (px, py) = viewport.screen_from_location(marker.location());
    if viewport.is_visible(px, py) {
        marker.draw(canvas, px, py);
    }
}

/// Draw a linestring with viewport culling
fn draw_linestring(canvas: &mut BrailleCanvas, line: &LineString, viewport: &Viewport) {
    if line.len() < 2 {
        return;
    }

    let mut prev: Option<(i32, i32)> = None;

    for &(lon, lat) in line {
        let (px, py) = viewport.project(lon, lat);

        if let Some((prev_x, prev_y)) = prev {
            // Skip segments that wrap around the antimeridian
            let dist = ((px - prev_x).abs() + (py - prev_y).abs()) as usize;
            if dist < viewport.width && viewport.line_might_be_visible((prev_x, prev_y), (px, py)) {
                draw_line(canvas, prev_x, prev_y, px, py);
            }
        }

        prev = Some((px, py));
    }
}
