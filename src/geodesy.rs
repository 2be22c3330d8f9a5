use geo::{Contains, Point};

use crate::markers::CountryMarker;

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic position in decimal degrees
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to another location in kilometers
    #[inline]
    pub fn distance_km(&self, other: &Location) -> f64 {
        distance_km(*self, *other)
    }
}

/// Radius of the circle around an epicenter considered at risk, in kilometers.
///
/// `20 × 2^(2m − 5.76)`: roughly 0.37 km at magnitude 0 and a few thousand km at 8.
#[inline]
pub fn threat_circle_radius_km(magnitude: f64) -> f64 {
    20.0 * (2.0 * magnitude - 5.76).exp2()
}

/// Haversine distance in kilometers
pub fn distance_km(a: Location, b: Location) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points
    let c = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();
    EARTH_RADIUS_KM * c
}

/// True if any polygon of the country contains the location
pub fn point_in_country(loc: Location, country: &CountryMarker) -> bool {
    let point = Point::new(loc.lon, loc.lat);
    country.geometry().0.iter().any(|polygon| polygon.contains(&point))
}
