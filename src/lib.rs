pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::config::EngineConfig;
pub use crate::core::{
    engine::EsotericEngine, profile::ProfileComposer, synastry::SynastryComposer,
    tables::CompatibilityTables,
};
pub use crate::domain::model::{
    ArchetypeRecord, AstrologicalChart, BirthInput, CompatibilityAspect, Coordinates, Profile,
    SynastryReport, ZodiacSign,
};
pub use crate::utils::error::{EngineError, Result};
