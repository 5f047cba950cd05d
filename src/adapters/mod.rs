// Adapters layer: concrete implementations of the domain ports.

pub mod chart;
pub mod geocoding;
pub mod jitter;

pub use chart::{FixedChartProvider, HttpChartProvider};
pub use geocoding::{HttpGeocoder, StaticGeocoder};
pub use jitter::{FixedJitter, RandomJitter};
