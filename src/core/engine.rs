use crate::adapters::{
    FixedChartProvider, HttpChartProvider, HttpGeocoder, RandomJitter, StaticGeocoder,
};
use crate::config::toml_config::{ChartConfig, EngineConfig, GeocodingConfig};
use crate::core::profile::ProfileComposer;
use crate::core::synastry::SynastryComposer;
use crate::core::tables::CompatibilityTables;
use crate::domain::model::{AscendantPlacement, AstrologicalChart, BirthInput, Profile, SynastryReport};
use crate::domain::ports::{ChartProvider, Geocoder};
use crate::utils::error::{EngineError, Result};
use crate::utils::validation::Validate;
use std::sync::Arc;
use std::time::Duration;

pub struct EsotericEngine {
    profiles: Option<ProfileComposer>,
    synastry: SynastryComposer,
}

impl EsotericEngine {
    pub fn new(profiles: ProfileComposer, synastry: SynastryComposer) -> Self {
        Self {
            profiles: Some(profiles),
            synastry,
        }
    }

    /// Engine without a chart provider; only synastry is available.
    pub fn synastry_only(synastry: SynastryComposer) -> Self {
        Self {
            profiles: None,
            synastry,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;

        let tables = match &config.tables_path {
            Some(path) => CompatibilityTables::from_file(path)?,
            None => CompatibilityTables::embedded()?.clone(),
        };
        let synastry = SynastryComposer::new(
            Arc::new(tables),
            Arc::new(RandomJitter::new(config.max_jitter())),
        )
        .with_default_names(config.person1_default_name(), config.person2_default_name());

        let profiles = match &config.chart {
            Some(chart_config) => Some(ProfileComposer::new(
                build_geocoder(&config.geocoding),
                build_chart_provider(chart_config)?,
                config.timezone_offset()?,
                config.reference_year(),
            )),
            None => {
                tracing::debug!("No [chart] section configured, profiles disabled");
                None
            }
        };

        Ok(Self { profiles, synastry })
    }

    pub async fn profile(&self, input: &BirthInput) -> Result<Profile> {
        let composer = self
            .profiles
            .as_ref()
            .ok_or_else(|| EngineError::MissingConfigError {
                field: "chart".to_string(),
            })?;

        tracing::info!("Composing profile for birth date {}", input.birth_date);
        let profile = composer.compose(input).await?;
        tracing::info!(
            "Profile ready: personal arcanum {} ({})",
            profile.arcana.personal.name,
            profile.numerology.personal_number
        );

        Ok(profile)
    }

    pub fn synastry(&self, first: &BirthInput, second: &BirthInput) -> Result<SynastryReport> {
        tracing::info!(
            "Composing synastry for {} and {}",
            first.birth_date,
            second.birth_date
        );
        let report = self.synastry.compose(first, second)?;
        tracing::info!(
            "Synastry ready: {} & {} → overall harmony {}",
            report.person1_name,
            report.person2_name,
            report.overall_harmony
        );

        Ok(report)
    }
}

fn build_geocoder(config: &GeocodingConfig) -> Arc<dyn Geocoder> {
    match (config.r#type.as_str(), config.endpoint.as_deref()) {
        ("http", Some(endpoint)) => {
            let mut geocoder = HttpGeocoder::new(endpoint);
            if let Some(timeout) = config.timeout_seconds {
                geocoder = geocoder.with_timeout(Duration::from_secs(timeout));
            }
            Arc::new(geocoder)
        }
        _ => {
            let mut geocoder = StaticGeocoder::with_builtin_places();
            for (name, coordinates) in config.places.iter().flatten() {
                geocoder.insert(name, *coordinates);
            }
            tracing::debug!("Static geocoder with {} places", geocoder.len());
            Arc::new(geocoder)
        }
    }
}

fn build_chart_provider(config: &ChartConfig) -> Result<Arc<dyn ChartProvider>> {
    if config.r#type == "fixed" {
        let missing = |field: &str| EngineError::MissingConfigError {
            field: field.to_string(),
        };
        let chart = AstrologicalChart {
            sun: config.sun.ok_or_else(|| missing("chart.sun"))?,
            moon: config.moon.ok_or_else(|| missing("chart.moon"))?,
            ascendant: AscendantPlacement {
                sign: config.ascendant.ok_or_else(|| missing("chart.ascendant"))?,
            },
        };
        return Ok(Arc::new(FixedChartProvider::new(chart)));
    }

    let endpoint = config
        .endpoint
        .as_deref()
        .ok_or_else(|| EngineError::MissingConfigError {
            field: "chart.endpoint".to_string(),
        })?;
    let mut provider = HttpChartProvider::new(endpoint);
    if let Some(timeout) = config.timeout_seconds {
        provider = provider.with_timeout(Duration::from_secs(timeout));
    }
    Ok(Arc::new(provider))
}
