use std::fs;
use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use geo::{Geometry, MultiPolygon};
use geojson::{Feature, FeatureCollection, GeoJson, Value};
use tracing::{info, warn};

use crate::config::{Config, QuakeSource};
use crate::error::LoadError;
use crate::geodesy::Location;
use crate::markers::{
    number_value, CityMarker, CountryMarker, MarkerSet, Properties, QuakeAge, QuakeFeature,
};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Load cities, countries and quakes and build the marker model
pub fn load_marker_set(config: &Config) -> Result<MarkerSet> {
    let start = Instant::now();

    let cities = load_cities(&config.cities).context("loading cities")?;
    let countries = load_countries(&config.countries).context("loading countries")?;
    let quakes = load_quakes(&config.quake_source(), now_ms()).context("loading earthquakes")?;

    let markers = MarkerSet::build(cities, countries, quakes);
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "markers ready");
    Ok(markers)
}

/// City point features
pub fn load_cities(path: &Path) -> Result<Vec<CityMarker>, LoadError> {
    let fc = parse_collection(read_file(path)?, &path.display().to_string())?;
    Ok(cities_from_collection(fc))
}

/// Country polygons, in file order
pub fn load_countries(path: &Path) -> Result<Vec<CountryMarker>, LoadError> {
    let fc = parse_collection(read_file(path)?, &path.display().to_string())?;
    Ok(countries_from_collection(fc))
}

/// Quake point features from a feed URL or a local snapshot
pub fn load_quakes(source: &QuakeSource, now_ms: i64) -> Result<Vec<QuakeFeature>, LoadError> {
    let (bytes, name) = match source {
        QuakeSource::Url(url) => (fetch(url)?, url.clone()),
        QuakeSource::File(path) => (read_file(path)?, path.display().to_string()),
    };
    let fc = parse_collection(bytes, &name)?;
    Ok(quakes_from_collection(fc, now_ms))
}

fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn fetch(url: &str) -> Result<Vec<u8>, LoadError> {
    info!(%url, "fetching earthquake feed");
    let to_err = |source| LoadError::Fetch {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(to_err)?;
    let body = client
        .get(url)
        .send()
        .and_then(|resp| resp.error_for_status())
        .and_then(|resp| resp.bytes())
        .map_err(to_err)?;
    Ok(body.to_vec())
}

fn parse_collection(
    mut bytes: Vec<u8>,
    source_name: &str,
) -> Result<FeatureCollection, LoadError> {
    let geojson: GeoJson =
        simd_json::serde::from_slice(&mut bytes).map_err(|source| LoadError::Parse {
            source_name: source_name.to_string(),
            source,
        })?;

    match geojson {
        GeoJson::FeatureCollection(fc) => Ok(fc),
        _ => Err(LoadError::NotACollection {
            source_name: source_name.to_string(),
        }),
    }
}

fn point_location(feature: &Feature) -> Option<(Location, Option<f64>)> {
    match &feature.geometry.as_ref()?.value {
        Value::Point(coords) if coords.len() >= 2 => {
            Some((Location::new(coords[1], coords[0]), coords.get(2).copied()))
        }
        _ => None,
    }
}

pub fn cities_from_collection(fc: FeatureCollection) -> Vec<CityMarker> {
    let mut cities = Vec::with_capacity(fc.features.len());
    for feature in fc.features {
        let Some((location, _)) = point_location(&feature) else {
            warn!(id = ?feature.id, "skipping city without point geometry");
            continue;
        };
        cities.push(CityMarker::new(location, feature.properties.unwrap_or_default()));
    }
    cities
}

pub fn countries_from_collection(fc: FeatureCollection) -> Vec<CountryMarker> {
    let mut countries = Vec::with_capacity(fc.features.len());
    for feature in fc.features {
        let name = feature
            .property("name")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string();

        let Some(geometry) = feature.geometry else {
            warn!(%name, "skipping country without geometry");
            continue;
        };
        let geometry: Geometry<f64> = match geometry.value.try_into() {
            Ok(g) => g,
            Err(e) => {
                warn!(%name, error = %e, "skipping country with unreadable geometry");
                continue;
            }
        };
        let regions: MultiPolygon<f64> = match geometry {
            Geometry::Polygon(p) => p.into(),
            Geometry::MultiPolygon(m) => m,
            _ => {
                warn!(%name, "skipping country without polygon geometry");
                continue;
            }
        };

        countries.push(CountryMarker::new(&name, regions));
    }
    countries
}

pub fn quakes_from_collection(fc: FeatureCollection, now_ms: i64) -> Vec<QuakeFeature> {
    let total = fc.features.len();
    let quakes: Vec<QuakeFeature> = fc
        .features
        .into_iter()
        .filter_map(|f| parse_quake_feature(f, now_ms))
        .collect();
    if quakes.len() < total {
        warn!(skipped = total - quakes.len(), "some earthquake features could not be read");
    }
    quakes
}

/// Read one feed entry.
///
/// Magnitude comes from `mag` or `magnitude`, depth from `depth` or the third
/// coordinate, the title from `title` or `place`. The age is the `age` label
/// when present, else derived from `time` (ms since epoch).
pub fn parse_quake_feature(feature: Feature, now_ms: i64) -> Option<QuakeFeature> {
    let (location, coord_depth) = point_location(&feature)?;
    let properties: Properties = feature.properties.unwrap_or_default();
    let number = |key: &str| properties.get(key).and_then(number_value);

    let Some(magnitude) = number("mag").or_else(|| number("magnitude")) else {
        warn!(id = ?feature.id, "skipping earthquake without magnitude");
        return None;
    };
    let depth_km = number("depth").or(coord_depth).unwrap_or(0.0);

    let title = ["title", "place"]
        .iter()
        .find_map(|key| properties.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("M {magnitude:.1}"));

    let age = match (properties.get("age").and_then(|v| v.as_str()), number("time")) {
        (Some(label), _) => QuakeAge::from_label(label),
        (None, Some(time)) => QuakeAge::from_elapsed_ms(now_ms - time as i64),
        (None, None) => QuakeAge::PastMonth,
    };

    Some(QuakeFeature::new(location, &title, magnitude, depth_km, age, properties))
}

/// Milliseconds since the Unix epoch
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: i64 = 60 * 60 * 1000;
    const NOW: i64 = 1_700_000_000_000;

    fn collection(json: &str) -> FeatureCollection {
        parse_collection(json.as_bytes().to_vec(), "test").unwrap()
    }

    #[test]
    fn test_usgs_feature() {
        let fc = collection(&format!(
            r#"{{"type":"FeatureCollection","features":[
                {{"type":"Feature","id":"us7000abcd",
                  "properties":{{"mag":4.6,"place":"50 km S of Somewhere","time":{},
                                 "title":"M 4.6 - 50 km S of Somewhere"}},
                  "geometry":{{"type":"Point","coordinates":[142.3,38.1,35.5]}}}}
            ]}}"#,
            NOW - 2 * HOUR
        ));
        let quakes = quakes_from_collection(fc, NOW);
        assert_eq!(quakes.len(), 1);
        let q = &quakes[0];
        assert!((q.location.lat - 38.1).abs() < 1e-9);
        assert!((q.location.lon - 142.3).abs() < 1e-9);
        assert!((q.magnitude - 4.6).abs() < 1e-9);
        assert!((q.depth_km - 35.5).abs() < 1e-9);
        assert_eq!(q.title, "M 4.6 - 50 km S of Somewhere");
        assert_eq!(q.age, QuakeAge::PastDay);
        assert_eq!(q.properties.get("age").and_then(|v| v.as_str()), Some("Past Day"));
    }

    #[test]
    fn test_explicit_properties_win() {
        let fc = collection(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature",
                 "properties":{"magnitude":"6.1","depth":"410","age":"Past Hour",
                               "place":"Deep place"},
                 "geometry":{"type":"Point","coordinates":[10.0,-5.0,12.0]}}
            ]}"#,
        );
        let q = &quakes_from_collection(fc, NOW)[0];
        assert_eq!(q.magnitude, 6.1);
        assert_eq!(q.depth_km, 410.0);
        assert_eq!(q.age, QuakeAge::PastHour);
        assert_eq!(q.title, "Deep place");
    }

    #[test]
    fn test_quake_without_magnitude_skipped() {
        let fc = collection(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{"place":"nowhere"},
                 "geometry":{"type":"Point","coordinates":[0,0]}},
                {"type":"Feature","properties":{"mag":3.0},"geometry":null}
            ]}"#,
        );
        assert!(quakes_from_collection(fc, NOW).is_empty());
    }

    #[test]
    fn test_cities_keep_properties() {
        let fc = collection(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{"name":"Lima","country":"Peru","population":"9.7"},
                 "geometry":{"type":"Point","coordinates":[-77.04,-12.05]}},
                {"type":"Feature","properties":{"name":"Nowhere"},"geometry":null}
            ]}"#,
        );
        let cities = cities_from_collection(fc);
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].title(), "Lima, Peru, 9.7");
    }

    #[test]
    fn test_countries_polygon_and_multipolygon() {
        let fc = collection(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{"name":"Squareland"},
                 "geometry":{"type":"Polygon","coordinates":[[[0,0],[10,0],[10,10],[0,10],[0,0]]]}},
                {"type":"Feature","properties":{"name":"Islands"},
                 "geometry":{"type":"MultiPolygon","coordinates":[
                    [[[20,20],[21,20],[21,21],[20,21],[20,20]]],
                    [[[30,30],[31,30],[31,31],[30,31],[30,30]]]]}},
                {"type":"Feature","properties":{"name":"Road"},
                 "geometry":{"type":"LineString","coordinates":[[0,0],[1,1]]}}
            ]}"#,
        );
        let countries = countries_from_collection(fc);
        let names: Vec<&str> = countries.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Squareland", "Islands"]);
        assert_eq!(countries[1].geometry().0.len(), 2);
    }

    #[test]
    fn test_not_a_collection() {
        let point = br#"{"type":"Point","coordinates":[0,0]}"#.to_vec();
        let err = parse_collection(point, "point").unwrap_err();
        assert!(matches!(err, LoadError::NotACollection { .. }));

        let err = parse_collection(b"not json".to_vec(), "junk").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_cities(Path::new("no/such/cities.json")).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }
}
