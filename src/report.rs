//! Startup summaries written to the log.

use std::collections::BTreeMap;

use tracing::info;

use crate::markers::{EarthquakeMarker, MarkerSet};

/// The `n` largest quakes, strongest first. Equal magnitudes keep the later
/// quake in load order ahead.
pub fn largest_quakes(quakes: &[EarthquakeMarker], n: usize) -> Vec<&EarthquakeMarker> {
    let mut sorted: Vec<&EarthquakeMarker> = quakes.iter().collect();
    sorted.sort();
    sorted.into_iter().rev().take(n).collect()
}

/// Quake count per country name, plus the number of ocean quakes
pub fn quakes_per_country(quakes: &[EarthquakeMarker]) -> (Vec<(String, usize)>, usize) {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut ocean = 0;
    for quake in quakes {
        match quake.country() {
            Some(country) => *counts.entry(country).or_default() += 1,
            None => ocean += 1,
        }
    }

    let mut per_country: Vec<(String, usize)> = counts.into_iter().collect();
    // Most quakes first; BTreeMap order breaks ties alphabetically
    per_country.sort_by(|a, b| b.1.cmp(&a.1));
    (per_country, ocean)
}

/// Log the largest quakes and the per-country tally
pub fn log_summary(markers: &MarkerSet, top: usize) {
    info!(
        cities = markers.cities.len(),
        quakes = markers.quakes.len(),
        land = markers.land_count(),
        ocean = markers.ocean_count(),
        "data loaded"
    );

    for (rank, quake) in largest_quakes(&markers.quakes, top).into_iter().enumerate() {
        info!(
            rank = rank + 1,
            magnitude = quake.magnitude(),
            depth_km = quake.depth_km(),
            age = quake.age().label(),
            "{}",
            quake.title()
        );
    }

    let (per_country, ocean) = quakes_per_country(&markers.quakes);
    for (country, count) in &per_country {
        info!(%country, count, "quakes per country");
    }
    info!(count = ocean, "quakes in the ocean");
}
