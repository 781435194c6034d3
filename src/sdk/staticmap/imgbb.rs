use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(15);

/// Minimal imgbb upload client.
pub struct ImgbbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    data: UploadData,
}

#[derive(Deserialize)]
struct UploadData {
    url: String,
}

impl ImgbbClient {
    pub fn new(api_key: String) -> Self {
        Self::with_timeout(api_key, UPLOAD_TIMEOUT)
    }

    fn with_timeout(api_key: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder().timeout(timeout).build().unwrap(),
            api_key,
            base_url: "https://api.imgbb.com".to_string(),
        }
    }

    /// Uploads PNG bytes and returns the hosted image URL.
    pub async fn upload(&self, image: &[u8]) -> anyhow::Result<String> {
        let url = format!("{}/1/upload", self.base_url);
        let part = Part::bytes(image.to_vec())
            .file_name("map.png")
            .mime_str("image/png")?;
        let form = Form::new().part("image", part);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("imgbb returned {}", status);
        }
        let body: UploadResponse = response.json().await?;
        Ok(body.data.url)
    }
}
