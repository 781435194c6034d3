pub mod google;
pub mod types;

pub use google::GoogleDirectionsProvider;
