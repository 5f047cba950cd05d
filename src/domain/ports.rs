use crate::domain::model::{AstrologicalChart, Coordinates};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDateTime};

/// Resolves a free-text place name to coordinates.
/// An unresolvable place must surface as `EngineError::LookupError`.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, place_name: &str) -> Result<Coordinates>;
}

/// Computes sun, moon and ascendant placements for a located civil moment.
#[async_trait]
pub trait ChartProvider: Send + Sync {
    async fn compute_chart(
        &self,
        civil_date_time: NaiveDateTime,
        timezone_offset: FixedOffset,
        coordinates: Coordinates,
    ) -> Result<AstrologicalChart>;
}

/// Small perturbation added to tier-based harmony scores.
pub trait JitterSource: Send + Sync {
    fn jitter(&self) -> u32;
}
