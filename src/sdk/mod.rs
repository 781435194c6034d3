pub mod config;
pub mod quote;
pub mod routing;
pub mod server;
pub mod staticmap;
pub mod util;
