//! Best-effort map artifacts: render a static map for a quoted route and
//! publish it somewhere clients can fetch it.

pub mod imgbb;

use crate::sdk::config::MapStorage;
use crate::sdk::server::STATIC_PREFIX;
use async_trait::async_trait;
use chrono::Utc;
use imgbb::ImgbbClient;
use reqwest::Client;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const MAP_SIZE: &str = "600x400";

/// Publishes a rendered map image and returns its URL.
///
/// Publishing is best-effort by contract: implementations log failures and
/// return `None` instead of propagating them, so a broken image pipeline
/// never fails a quote.
#[async_trait]
pub trait MapPublisher: Send + Sync {
    async fn publish(&self, origin: &str, destination: &str, polyline: &str) -> Option<String>;
}

/// Builds the publisher matching the configured storage target.
pub fn publisher_for(maps_api_key: &str, storage: MapStorage) -> Arc<dyn MapPublisher> {
    match storage {
        MapStorage::Imgbb { api_key } => Arc::new(StaticMapPublisher::new(
            maps_api_key.to_string(),
            Storage::Imgbb(ImgbbClient::new(api_key)),
        )),
        MapStorage::Local { dir } => Arc::new(StaticMapPublisher::new(
            maps_api_key.to_string(),
            Storage::Local { dir },
        )),
        MapStorage::Disabled => Arc::new(NoopMapPublisher),
    }
}

enum Storage {
    Imgbb(ImgbbClient),
    Local { dir: PathBuf },
}

/// Renders via the Static Maps API, then stores per the configured target.
pub struct StaticMapPublisher {
    client: Client,
    api_key: String,
    base_url: String,
    storage: Storage,
}

impl StaticMapPublisher {
    fn new(api_key: String, storage: Storage) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap(),
            api_key,
            base_url: "https://maps.googleapis.com".to_string(),
            storage,
        }
    }

    async fn render_and_store(
        &self,
        origin: &str,
        destination: &str,
        polyline: &str,
    ) -> anyhow::Result<String> {
        let url = format!("{}/maps/api/staticmap", self.base_url);
        let params = map_query(origin, destination, polyline, &self.api_key);

        let response = self.client.get(&url).query(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("static map API returned {}", status);
        }
        let image = response.bytes().await?;

        match &self.storage {
            Storage::Imgbb(client) => client.upload(&image).await,
            Storage::Local { dir } => store_local(dir, &image),
        }
    }
}

#[async_trait]
impl MapPublisher for StaticMapPublisher {
    async fn publish(&self, origin: &str, destination: &str, polyline: &str) -> Option<String> {
        match self.render_and_store(origin, destination, polyline).await {
            Ok(url) => Some(url),
            Err(e) => {
                log::warn!(
                    "Map image skipped for \"{}\" -> \"{}\": {}",
                    origin,
                    destination,
                    e
                );
                None
            }
        }
    }
}

/// Used when no storage target is configured.
pub struct NoopMapPublisher;

#[async_trait]
impl MapPublisher for NoopMapPublisher {
    async fn publish(&self, _origin: &str, _destination: &str, _polyline: &str) -> Option<String> {
        None
    }
}

fn map_query(
    origin: &str,
    destination: &str,
    polyline: &str,
    api_key: &str,
) -> Vec<(&'static str, String)> {
    vec![
        ("size", MAP_SIZE.to_string()),
        ("path", format!("enc:{polyline}")),
        ("markers", format!("color:red|label:A|{origin}")),
        ("markers", format!("color:green|label:B|{destination}")),
        ("key", api_key.to_string()),
    ]
}

fn store_local(dir: &Path, image: &[u8]) -> anyhow::Result<String> {
    fs::create_dir_all(dir)?;
    // Nanosecond timestamp keeps concurrent requests from colliding.
    let name = format!("map-{}.png", Utc::now().format("%Y%m%d%H%M%S%f"));
    fs::write(dir.join(&name), image)?;
    Ok(format!("{STATIC_PREFIX}/{name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_query_carries_path_markers_and_size() {
        let params = map_query("Taipei", "Taichung", "gfo}EtohhU", "secret");
        assert!(params.contains(&("size", "600x400".to_string())));
        assert!(params.contains(&("path", "enc:gfo}EtohhU".to_string())));
        assert!(params.contains(&("markers", "color:red|label:A|Taipei".to_string())));
        assert!(params.contains(&("markers", "color:green|label:B|Taichung".to_string())));
        assert!(params.contains(&("key", "secret".to_string())));
    }

    #[test]
    fn local_store_writes_file_under_serving_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let url = store_local(dir.path(), b"png-bytes").unwrap();
        // The returned URL must resolve through the route the server mounts.
        let name = url.strip_prefix(&format!("{STATIC_PREFIX}/")).unwrap();
        assert!(name.starts_with("map-"));
        assert!(name.ends_with(".png"));
        assert_eq!(fs::read(dir.path().join(name)).unwrap(), b"png-bytes");
    }

    #[test]
    fn local_store_names_are_unique_per_call() {
        let dir = tempfile::tempdir().unwrap();
        let first = store_local(dir.path(), b"a").unwrap();
        let second = store_local(dir.path(), b"b").unwrap();
        assert_ne!(first, second);
    }
}
