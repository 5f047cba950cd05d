pub mod arcana;
pub mod compatibility;
pub mod engine;
pub mod name_encoding;
pub mod profile;
pub mod reduction;
pub mod synastry;
pub mod tables;
pub mod zodiac;

pub use crate::domain::model::{BirthInput, Profile, SynastryReport};
pub use crate::domain::ports::{ChartProvider, Geocoder, JitterSource};
pub use crate::utils::error::Result;
