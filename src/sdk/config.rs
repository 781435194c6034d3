use anyhow::Context;
use std::env;
use std::path::PathBuf;

/// Where rendered map images end up.
#[derive(Debug, Clone)]
pub enum MapStorage {
    /// Upload to imgbb and return the hosted URL.
    Imgbb { api_key: String },
    /// Write into a local directory served under `/static`.
    Local { dir: PathBuf },
    /// Skip map rendering entirely.
    Disabled,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub maps_api_key: String,
    pub map_storage: MapStorage,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// `GOOGLE_MAPS_API_KEY` is required. `IMGBB_API_KEY` selects hosted
    /// uploads; failing that, `MAP_IMAGE_DIR` selects local storage.
    pub fn from_env() -> anyhow::Result<Self> {
        let maps_api_key =
            env::var("GOOGLE_MAPS_API_KEY").context("GOOGLE_MAPS_API_KEY is not set")?;

        let map_storage = if let Ok(api_key) = env::var("IMGBB_API_KEY") {
            MapStorage::Imgbb { api_key }
        } else if let Ok(dir) = env::var("MAP_IMAGE_DIR") {
            MapStorage::Local {
                dir: PathBuf::from(dir),
            }
        } else {
            MapStorage::Disabled
        };

        Ok(Self {
            maps_api_key,
            map_storage,
        })
    }
}
