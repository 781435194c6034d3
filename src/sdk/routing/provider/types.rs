use serde::Deserialize;

// --- Data structures for parsing Directions API responses, trimmed to the
// fields this service reads ---

#[derive(Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Deserialize)]
pub struct Route {
    pub legs: Vec<Leg>,
    pub overview_polyline: Polyline,
}

// Multi-stop queries produce several legs per route; this service only ever
// issues single-stop queries and reads the first leg.
#[derive(Deserialize)]
pub struct Leg {
    pub distance: Metric,
    pub duration: Metric,
}

#[derive(Deserialize, Clone, Copy)]
pub struct Metric {
    pub value: f64,
}

#[derive(Deserialize)]
pub struct Polyline {
    pub points: String,
}
