use geo::{BoundingRect, MultiPolygon};

/// A country region. Used for land/ocean classification and as the basemap
/// outline; never drawn as a marker.
#[derive(Clone, Debug)]
pub struct CountryMarker {
    name: String,
    geometry: MultiPolygon<f64>,
}

impl CountryMarker {
    pub fn new(name: &str, geometry: MultiPolygon<f64>) -> Self {
        Self {
            name: name.to_string(),
            geometry,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    /// (min_lon, min_lat, max_lon, max_lat), or None for empty geometry
    pub fn bounding_box(&self) -> Option<(f64, f64, f64, f64)> {
        self.geometry
            .bounding_rect()
            .map(|r| (r.min().x, r.min().y, r.max().x, r.max().y))
    }

    /// Exterior rings as (lon, lat) polylines
    pub fn outlines(&self) -> impl Iterator<Item = Vec<(f64, f64)>> + '_ {
        self.geometry
            .0
            .iter()
            .map(|poly| poly.exterior().coords().map(|c| (c.x, c.y)).collect())
    }
}
