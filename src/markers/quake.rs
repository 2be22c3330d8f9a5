use std::cmp::Ordering;
use std::collections::BTreeSet;

use geojson::JsonValue;

use super::{Marker, MarkerBase, MarkerCanvas, Paint, Properties};
use crate::geodesy::{threat_circle_radius_km, Location};

/// Deepest depth (km) still drawn as shallow
pub const THRESHOLD_INTERMEDIATE: f64 = 70.0;
/// Deepest depth (km) still drawn as intermediate
pub const THRESHOLD_DEEP: f64 = 300.0;

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Depth classification controlling quake color. Ties go to the shallower band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthBand {
    Shallow,
    Intermediate,
    Deep,
}

impl DepthBand {
    pub fn from_depth(depth_km: f64) -> Self {
        if depth_km <= THRESHOLD_INTERMEDIATE {
            DepthBand::Shallow
        } else if depth_km <= THRESHOLD_DEEP {
            DepthBand::Intermediate
        } else {
            DepthBand::Deep
        }
    }

    pub fn paint(self) -> Paint {
        match self {
            DepthBand::Shallow => Paint::Shallow,
            DepthBand::Intermediate => Paint::Intermediate,
            DepthBand::Deep => Paint::Deep,
        }
    }
}

/// How recently a quake happened, as labelled by the feed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuakeAge {
    PastHour,
    PastDay,
    PastWeek,
    PastMonth,
}

impl QuakeAge {
    pub fn label(self) -> &'static str {
        match self {
            QuakeAge::PastHour => "Past Hour",
            QuakeAge::PastDay => "Past Day",
            QuakeAge::PastWeek => "Past Week",
            QuakeAge::PastMonth => "Past Month",
        }
    }

    /// Parse a feed label. Anything unrecognized counts as older than a week.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "past hour" => QuakeAge::PastHour,
            "past day" => QuakeAge::PastDay,
            "past week" => QuakeAge::PastWeek,
            _ => QuakeAge::PastMonth,
        }
    }

    /// Age bucket for an event `elapsed_ms` before now
    pub fn from_elapsed_ms(elapsed_ms: i64) -> Self {
        if elapsed_ms < HOUR_MS {
            QuakeAge::PastHour
        } else if elapsed_ms < DAY_MS {
            QuakeAge::PastDay
        } else if elapsed_ms < 7 * DAY_MS {
            QuakeAge::PastWeek
        } else {
            QuakeAge::PastMonth
        }
    }
}

/// A quake point feature as produced by the loader, before land classification
#[derive(Clone, Debug)]
pub struct QuakeFeature {
    pub location: Location,
    pub title: String,
    pub magnitude: f64,
    pub depth_km: f64,
    pub age: QuakeAge,
    pub properties: Properties,
}

impl QuakeFeature {
    /// Build a feature, writing the normalized `title`, `magnitude`, `depth`
    /// and `age` entries into its property map
    pub fn new(
        location: Location,
        title: &str,
        magnitude: f64,
        depth_km: f64,
        age: QuakeAge,
        mut properties: Properties,
    ) -> Self {
        properties.insert("title".into(), JsonValue::from(title));
        properties.insert("magnitude".into(), JsonValue::from(magnitude));
        properties.insert("depth".into(), JsonValue::from(depth_km));
        properties.insert("age".into(), JsonValue::from(age.label()));
        Self {
            location,
            title: title.to_string(),
            magnitude,
            depth_km,
            age,
            properties,
        }
    }
}

/// Land quakes are circles, ocean quakes squares that can point at the
/// cities inside their threat circle
#[derive(Clone, Debug, PartialEq, Eq)]
enum QuakeKind {
    Land,
    Ocean { threatened_cities: BTreeSet<usize> },
}

#[derive(Clone, Debug)]
pub struct EarthquakeMarker {
    base: MarkerBase,
    title: String,
    magnitude: f64,
    depth_km: f64,
    age: QuakeAge,
    /// Load order, breaks magnitude ties
    seq: usize,
    kind: QuakeKind,
}

impl EarthquakeMarker {
    /// A quake inside `country`
    pub fn land(feature: QuakeFeature, seq: usize, country: &str) -> Self {
        let mut marker = Self::from_feature(feature, seq, QuakeKind::Land);
        let props = &mut marker.base.properties;
        props.insert("country".into(), JsonValue::from(country));
        props.insert("isOnLand".into(), JsonValue::Bool(true));
        marker
    }

    /// A quake outside every country
    pub fn ocean(feature: QuakeFeature, seq: usize) -> Self {
        let kind = QuakeKind::Ocean {
            threatened_cities: BTreeSet::new(),
        };
        let mut marker = Self::from_feature(feature, seq, kind);
        let props = &mut marker.base.properties;
        // A feed-supplied country would make the quake count as land
        props.remove("country");
        props.insert("isOnLand".into(), JsonValue::Bool(false));
        marker
    }

    fn from_feature(feature: QuakeFeature, seq: usize, kind: QuakeKind) -> Self {
        Self {
            base: MarkerBase::new(feature.location, feature.properties),
            title: feature.title,
            magnitude: feature.magnitude,
            depth_km: feature.depth_km,
            age: feature.age,
            seq,
            kind,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn depth_km(&self) -> f64 {
        self.depth_km
    }

    pub fn age(&self) -> QuakeAge {
        self.age
    }

    pub fn is_on_land(&self) -> bool {
        matches!(self.kind, QuakeKind::Land)
    }

    /// Country containing the epicenter, for land quakes
    pub fn country(&self) -> Option<String> {
        self.base.string_property("country")
    }

    pub fn depth_band(&self) -> DepthBand {
        DepthBand::from_depth(self.depth_km)
    }

    /// Screen radius: twice the magnitude, at least one pixel
    pub fn radius(&self) -> i32 {
        (2.0 * self.magnitude).max(1.0).round() as i32
    }

    pub fn threat_circle_km(&self) -> f64 {
        threat_circle_radius_km(self.magnitude)
    }

    /// Whether `loc` lies within this quake's threat circle (boundary inclusive)
    pub fn threatens(&self, loc: Location) -> bool {
        self.base.location.distance_km(&loc) <= self.threat_circle_km()
    }

    /// Threatened city indices. Always empty for land quakes.
    pub fn threatened_cities(&self) -> impl Iterator<Item = usize> + '_ {
        let set = match &self.kind {
            QuakeKind::Ocean { threatened_cities } => Some(threatened_cities),
            QuakeKind::Land => None,
        };
        set.into_iter().flat_map(|s| s.iter().copied())
    }

    /// Record a threatened city. No-op for land quakes.
    pub fn add_threatened_city(&mut self, city: usize) {
        if let QuakeKind::Ocean { threatened_cities } = &mut self.kind {
            threatened_cities.insert(city);
        }
    }

    pub fn clear_threatened_cities(&mut self) {
        if let QuakeKind::Ocean { threatened_cities } = &mut self.kind {
            threatened_cities.clear();
        }
    }

    /// Lines from the clicked ocean quake at `at` to its threatened cities' screen positions
    pub fn draw_threat_lines(
        &self,
        canvas: &mut dyn MarkerCanvas,
        at: (i32, i32),
        targets: &[(i32, i32)],
    ) {
        if self.base.hidden || !self.base.clicked {
            return;
        }
        for &(tx, ty) in targets {
            canvas.line(at.0, at.1, tx, ty, Paint::ThreatLine);
        }
    }
}

impl Marker for EarthquakeMarker {
    fn base(&self) -> &MarkerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut MarkerBase {
        &mut self.base
    }

    fn draw_body(&self, canvas: &mut dyn MarkerCanvas, x: i32, y: i32) {
        let r = self.radius();
        let paint = self.depth_band().paint();
        match self.kind {
            QuakeKind::Land => canvas.fill_circle(x, y, r, paint),
            QuakeKind::Ocean { .. } => canvas.fill_square(x, y, r, paint),
        }

        if self.age == QuakeAge::PastHour {
            canvas.line(x - r, y - r, x + r, y + r, Paint::Glyph);
            canvas.line(x - r, y + r, x + r, y - r, Paint::Glyph);
        }
    }

    fn draw_title(&self, canvas: &mut dyn MarkerCanvas, x: i32, y: i32) {
        canvas.text(x, y + self.radius() + 4, &self.title, Paint::Title);
    }

    fn contains_screen_point(&self, at: (i32, i32), cursor: (i32, i32)) -> bool {
        let r = self.radius();
        let dx = cursor.0 - at.0;
        let dy = cursor.1 - at.1;
        match self.kind {
            QuakeKind::Land => dx * dx + dy * dy <= r * r,
            QuakeKind::Ocean { .. } => dx.abs() <= r && dy.abs() <= r,
        }
    }
}

impl PartialEq for EarthquakeMarker {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EarthquakeMarker {}

impl PartialOrd for EarthquakeMarker {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ascending magnitude, then load order
impl Ord for EarthquakeMarker {
    fn cmp(&self, other: &Self) -> Ordering {
        self.magnitude
            .total_cmp(&other.magnitude)
            .then(self.seq.cmp(&other.seq))
    }
}
