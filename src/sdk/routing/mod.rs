pub mod error;
pub mod provider;
pub mod service;

pub use error::RoutingError;
pub use provider::GoogleDirectionsProvider;
pub use service::{DirectionsProvider, RouteLeg};
