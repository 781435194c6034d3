use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoutingError {
    // The Directions API signals failures through a status string in an
    // otherwise-200 response body
    #[error("Directions API error ({status}): {message}")]
    ApiError { status: String, message: String },

    #[error("Underlying request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}
