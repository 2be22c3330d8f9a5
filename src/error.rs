use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading cities, countries or quakes
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{source_name} is not valid GeoJSON")]
    Parse {
        source_name: String,
        #[source]
        source: simd_json::Error,
    },
    #[error("{source_name} is not a FeatureCollection")]
    NotACollection { source_name: String },
}
