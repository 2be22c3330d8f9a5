use std::path::PathBuf;

use clap::Parser;

/// USGS summary feed: magnitude 2.5 and above, past seven days
pub const DEFAULT_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/2.5_week.geojson";

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Terminal world map of recent earthquakes and the cities they threaten"
)]
pub struct Config {
    /// Earthquake GeoJSON feed: an http(s) URL or a local file
    #[arg(long, default_value = DEFAULT_FEED_URL)]
    pub earthquakes: String,

    /// GeoJSON point features with name, country and population
    #[arg(long, default_value = "data/city-data.json")]
    pub cities: PathBuf,

    /// GeoJSON country polygons with a name property
    #[arg(long, default_value = "data/countries-geo.json")]
    pub countries: PathBuf,

    /// Read quakes from the bundled snapshot instead of the live feed
    #[arg(long)]
    pub offline: bool,

    /// Snapshot used with --offline
    #[arg(long, default_value = "data/2.5_week.geojson")]
    pub offline_feed: PathBuf,

    /// Number of largest quakes written to the log at startup
    #[arg(long, default_value_t = 100)]
    pub top: usize,

    /// Log file (the terminal is taken by the map)
    #[arg(long, default_value = "quake-map.log")]
    pub log_file: PathBuf,
}

/// Where quake features come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuakeSource {
    Url(String),
    File(PathBuf),
}

impl Config {
    pub fn quake_source(&self) -> QuakeSource {
        if self.offline {
            return QuakeSource::File(self.offline_feed.clone());
        }
        let src = self.earthquakes.trim();
        if src.starts_with("http://") || src.starts_with("https://") {
            QuakeSource::Url(src.to_string())
        } else {
            QuakeSource::File(PathBuf::from(src))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["quake-map"]).unwrap();
        assert_eq!(config.top, 100);
        assert_eq!(config.cities, PathBuf::from("data/city-data.json"));
        assert_eq!(config.quake_source(), QuakeSource::Url(DEFAULT_FEED_URL.to_string()));
    }

    #[test]
    fn test_offline_uses_snapshot() {
        let args = ["quake-map", "--offline", "--offline-feed", "snap.geojson"];
        let config = Config::try_parse_from(args).unwrap();
        assert_eq!(config.quake_source(), QuakeSource::File(PathBuf::from("snap.geojson")));
    }

    #[test]
    fn test_local_path_source() {
        let args = ["quake-map", "--earthquakes", "quakes.geojson", "--top", "5"];
        let config = Config::try_parse_from(args).unwrap();
        assert_eq!(config.quake_source(), QuakeSource::File(PathBuf::from("quakes.geojson")));
        assert_eq!(config.top, 5);
    }

    #[test]
    fn test_rejects_bad_top() {
        assert!(Config::try_parse_from(["quake-map", "--top", "many"]).is_err());
    }
}
