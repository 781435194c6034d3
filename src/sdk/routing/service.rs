use super::error::RoutingError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// One driving alternative returned by a directions provider.
///
/// Distances are meters and durations seconds, exactly as reported;
/// `polyline` is the encoded overview path used for map rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLeg {
    pub distance_m: f64,
    pub duration_s: i64,
    pub polyline: String,
}

#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// Gets driving alternatives between two free-form addresses.
    ///
    /// An empty vector means the provider knows no route between the two
    /// points; that is not an error at this layer.
    async fn directions(
        &self,
        origin: &str,
        destination: &str,
        departure: DateTime<Utc>,
    ) -> Result<Vec<RouteLeg>, RoutingError>;
}
