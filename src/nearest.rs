//! Ranking of every quake by great-circle distance from a reference point.

use tracing::info;

use crate::geodesy::Location;
use crate::markers::{EarthquakeMarker, Marker, MarkerSet};

/// One quake in a distance ranking
#[derive(Clone, Debug, PartialEq)]
pub struct RankedQuake {
    /// Index into `MarkerSet::quakes`
    pub index: usize,
    pub title: String,
    pub distance_km: f64,
}

/// Quakes sorted by ascending distance from `origin`
#[derive(Clone, Debug, PartialEq)]
pub struct NearestReport {
    pub origin: Location,
    pub entries: Vec<RankedQuake>,
}

impl NearestReport {
    pub fn nearest(&self) -> Option<&RankedQuake> {
        self.entries.first()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Panel heading naming the reference point
    pub fn heading(&self) -> String {
        let Location { lat, lon } = self.origin;
        format!(
            "Nearest to {:.2}°{}, {:.2}°{}",
            lat.abs(),
            if lat >= 0.0 { "N" } else { "S" },
            lon.abs(),
            if lon >= 0.0 { "E" } else { "W" }
        )
    }

    /// Report lines, e.g. `"  111 km   M 4.5 - somewhere"`
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries
            .iter()
            .map(|e| format!("{:5.0} km   {}", e.distance_km, e.title))
    }
}

/// Rank all quakes by distance from `origin`. Ties keep load order.
pub fn rank(quakes: &[EarthquakeMarker], origin: Location) -> NearestReport {
    let mut entries: Vec<RankedQuake> = quakes
        .iter()
        .enumerate()
        .map(|(index, quake)| RankedQuake {
            index,
            title: quake.title().to_string(),
            distance_km: quake.location().distance_km(&origin),
        })
        .collect();

    // sort_by is stable
    entries.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    NearestReport { origin, entries }
}

/// Rank quakes around `origin`, log the report and make the nearest quake visible
pub fn locate_nearest(markers: &mut MarkerSet, origin: Location) -> NearestReport {
    let report = rank(&markers.quakes, origin);

    info!(
        lat = origin.lat,
        lon = origin.lon,
        quakes = report.entries.len(),
        "earthquakes nearest to the custom location"
    );
    for line in report.lines() {
        info!("{line}");
    }

    match report.nearest() {
        Some(nearest) => {
            info!(title = %nearest.title, distance_km = nearest.distance_km, "nearest earthquake");
            if let Some(quake) = markers.quakes.get_mut(nearest.index) {
                quake.base_mut().hidden = false;
            }
        }
        None => info!("no earthquakes loaded"),
    }

    report
}
