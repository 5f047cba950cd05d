use crate::domain::model::{Coordinates, Placement, ZodiacSign};
use crate::utils::error::{EngineError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_range,
    validate_url, Validate,
};
use chrono::{Datelike, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// 預設時區：UTC-3 (Brasília)
pub const DEFAULT_TIMEZONE_OFFSET_HOURS: i32 = -3;
pub const DEFAULT_MAX_JITTER: u32 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub tables_path: Option<String>,
    #[serde(default)]
    pub engine: EngineSection,
    #[serde(default)]
    pub synastry: SynastrySection,
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    pub chart: Option<ChartConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineSection {
    pub timezone_offset_hours: Option<i32>,
    pub reference_year: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynastrySection {
    pub person1_default_name: Option<String>,
    pub person2_default_name: Option<String>,
    pub max_jitter: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    #[serde(default = "default_geocoder_type")]
    pub r#type: String,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub places: Option<HashMap<String, Coordinates>>,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            r#type: default_geocoder_type(),
            endpoint: None,
            timeout_seconds: None,
            places: None,
        }
    }
}

fn default_geocoder_type() -> String {
    "static".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub r#type: String,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub sun: Option<Placement>,
    pub moon: Option<Placement>,
    pub ascendant: Option<ZodiacSign>,
}

impl EngineConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EngineError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EngineError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CHART_API_URL})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| EngineError::fault(format!("env substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_range(
            "engine.timezone_offset_hours",
            self.timezone_offset_hours(),
            -12,
            14,
        )?;

        if let Some(year) = self.engine.reference_year {
            validate_range("engine.reference_year", year, 1, 9999)?;
        }

        validate_range(
            "synastry.max_jitter",
            self.max_jitter(),
            0,
            DEFAULT_MAX_JITTER,
        )?;

        if let Some(name) = &self.synastry.person1_default_name {
            validate_non_empty_string("synastry.person1_default_name", name)?;
        }
        if let Some(name) = &self.synastry.person2_default_name {
            validate_non_empty_string("synastry.person2_default_name", name)?;
        }

        if let Some(path) = &self.tables_path {
            validate_path("tables_path", path)?;
        }

        self.validate_geocoding()?;
        if let Some(chart) = &self.chart {
            Self::validate_chart(chart)?;
        }

        Ok(())
    }

    fn validate_geocoding(&self) -> Result<()> {
        let geocoding = &self.geocoding;
        match geocoding.r#type.as_str() {
            "static" => {}
            "http" => {
                let endpoint =
                    geocoding
                        .endpoint
                        .as_deref()
                        .ok_or_else(|| EngineError::MissingConfigError {
                            field: "geocoding.endpoint".to_string(),
                        })?;
                validate_url("geocoding.endpoint", endpoint)?;
            }
            other => {
                return Err(EngineError::InvalidConfigValueError {
                    field: "geocoding.type".to_string(),
                    value: other.to_string(),
                    reason: "Valid types: static, http".to_string(),
                })
            }
        }

        if let Some(timeout) = geocoding.timeout_seconds {
            validate_positive_number("geocoding.timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }

    fn validate_chart(chart: &ChartConfig) -> Result<()> {
        match chart.r#type.as_str() {
            "http" => {
                let endpoint =
                    chart
                        .endpoint
                        .as_deref()
                        .ok_or_else(|| EngineError::MissingConfigError {
                            field: "chart.endpoint".to_string(),
                        })?;
                validate_url("chart.endpoint", endpoint)?;
            }
            "fixed" => {
                for (field, present) in [
                    ("chart.sun", chart.sun.is_some()),
                    ("chart.moon", chart.moon.is_some()),
                    ("chart.ascendant", chart.ascendant.is_some()),
                ] {
                    if !present {
                        return Err(EngineError::MissingConfigError {
                            field: field.to_string(),
                        });
                    }
                }
            }
            other => {
                return Err(EngineError::InvalidConfigValueError {
                    field: "chart.type".to_string(),
                    value: other.to_string(),
                    reason: "Valid types: http, fixed".to_string(),
                })
            }
        }

        if let Some(timeout) = chart.timeout_seconds {
            validate_positive_number("chart.timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }

    pub fn timezone_offset_hours(&self) -> i32 {
        self.engine
            .timezone_offset_hours
            .unwrap_or(DEFAULT_TIMEZONE_OFFSET_HOURS)
    }

    pub fn timezone_offset(&self) -> Result<FixedOffset> {
        let hours = self.timezone_offset_hours();
        FixedOffset::east_opt(hours * 3600).ok_or_else(|| EngineError::InvalidConfigValueError {
            field: "engine.timezone_offset_hours".to_string(),
            value: hours.to_string(),
            reason: "Offset out of range".to_string(),
        })
    }

    /// 未設定時使用系統時鐘的當年
    pub fn reference_year(&self) -> i32 {
        self.engine
            .reference_year
            .unwrap_or_else(|| chrono::Local::now().year())
    }

    pub fn max_jitter(&self) -> u32 {
        self.synastry.max_jitter.unwrap_or(DEFAULT_MAX_JITTER)
    }

    pub fn person1_default_name(&self) -> &str {
        self.synastry
            .person1_default_name
            .as_deref()
            .unwrap_or(crate::core::synastry::DEFAULT_PERSON1_NAME)
    }

    pub fn person2_default_name(&self) -> &str {
        self.synastry
            .person2_default_name
            .as_deref()
            .unwrap_or(crate::core::synastry::DEFAULT_PERSON2_NAME)
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
