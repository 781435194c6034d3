pub mod sdk;

pub use sdk::config::{AppConfig, MapStorage};
pub use sdk::quote::{build_quote, CandidateRoute, Quote, QuoteError};
pub use sdk::routing::provider::GoogleDirectionsProvider;
pub use sdk::routing::service::{DirectionsProvider, RouteLeg};
pub use sdk::server::{router, AppState, RouteRequest};
