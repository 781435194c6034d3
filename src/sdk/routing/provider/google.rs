use super::types::DirectionsResponse;
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::service::{DirectionsProvider, RouteLeg};
use crate::sdk::util::rate_limit::Limiter;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::Duration;

pub struct GoogleDirectionsProvider {
    client: Client,
    api_key: String,
    base_url: String,
    limiter: Limiter,
}

impl GoogleDirectionsProvider {
    pub fn new(api_key: String, limiter: Limiter) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap(),
            api_key,
            base_url: "https://maps.googleapis.com".to_string(),
            limiter,
        }
    }
}

/// Maps a parsed Directions response to route legs.
///
/// `ZERO_RESULTS` carries an empty route list; the caller decides what an
/// empty list means. Any other non-OK status is a provider error. Each
/// alternative contributes its first leg plus the route's overview polyline.
fn legs_from(resp: DirectionsResponse) -> Result<Vec<RouteLeg>, RoutingError> {
    match resp.status.as_str() {
        "OK" | "ZERO_RESULTS" => {}
        status => {
            return Err(RoutingError::ApiError {
                status: status.to_string(),
                message: resp.error_message.unwrap_or_default(),
            });
        }
    }

    Ok(resp
        .routes
        .into_iter()
        .filter_map(|route| {
            let leg = route.legs.into_iter().next()?;
            Some(RouteLeg {
                distance_m: leg.distance.value,
                duration_s: leg.duration.value as i64,
                polyline: route.overview_polyline.points,
            })
        })
        .collect())
}

#[async_trait]
impl DirectionsProvider for GoogleDirectionsProvider {
    async fn directions(
        &self,
        origin: &str,
        destination: &str,
        departure: DateTime<Utc>,
    ) -> Result<Vec<RouteLeg>, RoutingError> {
        self.limiter.until_ready().await;
        let url = format!("{}/maps/api/directions/json", self.base_url);
        log::debug!(
            "[PROVIDER] Requesting directions \"{}\" -> \"{}\"",
            origin,
            destination
        );

        let departure_time = departure.timestamp().to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("origin", origin),
                ("destination", destination),
                ("mode", "driving"),
                ("departure_time", departure_time.as_str()),
                ("alternatives", "true"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let text = response.text().await?;

        let resp: DirectionsResponse = serde_json::from_str(&text).map_err(|e| {
            log::error!(
                "Failed to parse DirectionsResponse. URL: {}\nError: {}. Body: {}",
                url,
                e,
                text
            );
            e
        })?;

        legs_from(resp)
    }
}
