//! Read-only compatibility reference data.
//!
//! The three tables differ in how a missing entry is handled, see
//! [`CompatibilityTables::sign_tier`], [`CompatibilityTables::life_path_tier`]
//! and [`CompatibilityTables::archetype_interpretation`].

use crate::core::arcana::arcana_catalog;
use crate::core::reduction::is_life_path_value;
use crate::domain::model::ZodiacSign;
use crate::utils::error::{EngineError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

const EMBEDDED_TABLES: &str = include_str!("../../data/compatibility.toml");

static EMBEDDED: OnceLock<std::result::Result<CompatibilityTables, String>> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub fn base_score(self) -> u32 {
        match self {
            Tier::Low => 0,
            Tier::Medium => 45,
            Tier::High => 90,
        }
    }

    fn from_code(code: char) -> Option<Self> {
        match code {
            'H' => Some(Tier::High),
            'M' => Some(Tier::Medium),
            'L' => Some(Tier::Low),
            _ => None,
        }
    }
}

/// Title/summary/details with `{first}` and `{second}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TierText {
    pub title: String,
    pub summary: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedText {
    pub title: String,
    pub summary: String,
    pub details: String,
}

impl TierText {
    pub fn render(&self, first: &str, second: &str) -> RenderedText {
        let fill = |template: &str| template.replace("{first}", first).replace("{second}", second);
        RenderedText {
            title: fill(&self.title),
            summary: fill(&self.summary),
            details: fill(&self.details),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TierTexts {
    pub high: TierText,
    pub medium: TierText,
    pub low: TierText,
}

impl TierTexts {
    pub fn for_tier(&self, tier: Tier) -> &TierText {
        match tier {
            Tier::High => &self.high,
            Tier::Medium => &self.medium,
            Tier::Low => &self.low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PairInterpretation {
    pub summary: String,
    pub details: String,
}

#[derive(Debug, Deserialize)]
struct RawTables {
    signs: RawSigns,
    tiers: RawTiers,
    life_paths: RawLifePaths,
    #[serde(default)]
    archetype_pairs: HashMap<String, PairInterpretation>,
}

#[derive(Debug, Deserialize)]
struct RawSigns {
    matrix: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTiers {
    sign: TierTexts,
    life_path: TierTexts,
}

#[derive(Debug, Deserialize)]
struct RawLifePaths {
    #[serde(default)]
    high: Vec<[u32; 2]>,
    #[serde(default)]
    medium: Vec<[u32; 2]>,
    #[serde(default)]
    low: Vec<[u32; 2]>,
}

#[derive(Debug, Clone)]
pub struct CompatibilityTables {
    sign_matrix: [[Tier; 12]; 12],
    sign_texts: TierTexts,
    life_path_texts: TierTexts,
    life_paths: HashMap<(u32, u32), Tier>,
    archetype_pairs: HashMap<String, PairInterpretation>,
}

impl CompatibilityTables {
    /// Tables compiled into the binary, parsed on first use.
    pub fn embedded() -> Result<&'static CompatibilityTables> {
        EMBEDDED
            .get_or_init(|| Self::from_toml_str(EMBEDDED_TABLES).map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|message| EngineError::fault(message.clone()))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EngineError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawTables = toml::from_str(content)
            .map_err(|e| EngineError::fault(format!("compatibility tables: {}", e)))?;

        Ok(Self {
            sign_matrix: parse_sign_matrix(&raw.signs.matrix)?,
            sign_texts: raw.tiers.sign,
            life_path_texts: raw.tiers.life_path,
            life_paths: collect_life_paths(&raw.life_paths)?,
            archetype_pairs: check_archetype_keys(raw.archetype_pairs)?,
        })
    }

    /// Ordered lookup; the matrix states both directions explicitly.
    pub fn sign_tier(&self, first: ZodiacSign, second: ZodiacSign) -> Tier {
        self.sign_matrix[first.index()][second.index()]
    }

    /// Ordered lookup, `Tier::Medium` when the pair is not listed.
    pub fn life_path_tier(&self, first: u32, second: u32) -> Tier {
        match self.life_paths.get(&(first, second)) {
            Some(tier) => *tier,
            None => {
                tracing::debug!(first, second, "life path pair not in table, using medium tier");
                Tier::Medium
            }
        }
    }

    /// `None` is an expected outcome: the table is incomplete.
    pub fn archetype_interpretation(&self, key: &str) -> Option<&PairInterpretation> {
        self.archetype_pairs.get(key)
    }

    pub fn sign_texts(&self) -> &TierTexts {
        &self.sign_texts
    }

    pub fn life_path_texts(&self) -> &TierTexts {
        &self.life_path_texts
    }
}

fn parse_sign_matrix(rows: &[String]) -> Result<[[Tier; 12]; 12]> {
    if rows.len() != 12 {
        return Err(EngineError::fault(format!(
            "sign matrix must have 12 rows, found {}",
            rows.len()
        )));
    }

    let mut matrix = [[Tier::Medium; 12]; 12];
    for (row_idx, row) in rows.iter().enumerate() {
        let codes: Vec<char> = row.trim().chars().collect();
        if codes.len() != 12 {
            return Err(EngineError::fault(format!(
                "sign matrix row {} ({}) must have 12 entries, found {}",
                row_idx,
                ZodiacSign::ALL[row_idx],
                codes.len()
            )));
        }
        for (col_idx, code) in codes.into_iter().enumerate() {
            matrix[row_idx][col_idx] = Tier::from_code(code).ok_or_else(|| {
                EngineError::fault(format!(
                    "sign matrix row {} column {}: unknown tier code '{}'",
                    row_idx, col_idx, code
                ))
            })?;
        }
    }
    Ok(matrix)
}

fn collect_life_paths(raw: &RawLifePaths) -> Result<HashMap<(u32, u32), Tier>> {
    let mut table = HashMap::new();
    let groups = [
        (Tier::High, &raw.high),
        (Tier::Medium, &raw.medium),
        (Tier::Low, &raw.low),
    ];

    for (tier, pairs) in groups {
        for [first, second] in pairs.iter().copied() {
            if !is_life_path_value(first) || !is_life_path_value(second) {
                return Err(EngineError::fault(format!(
                    "life path pair ({}, {}) uses a value outside 1-9, 11, 22, 33",
                    first, second
                )));
            }
            if let Some(previous) = table.insert((first, second), tier) {
                if previous != tier {
                    return Err(EngineError::fault(format!(
                        "life path pair ({}, {}) listed as both {:?} and {:?}",
                        first, second, previous, tier
                    )));
                }
            }
        }
    }
    Ok(table)
}

fn check_archetype_keys(
    pairs: HashMap<String, PairInterpretation>,
) -> Result<HashMap<String, PairInterpretation>> {
    let max_id = (arcana_catalog().len() - 1) as u8;

    for key in pairs.keys() {
        let parsed = key
            .split_once('-')
            .and_then(|(a, b)| Some((a.parse::<u8>().ok()?, b.parse::<u8>().ok()?)));

        match parsed {
            Some((low, high)) if low <= high && high <= max_id => {}
            _ => {
                return Err(EngineError::fault(format!(
                    "archetype pair key '{}' is not of the form \"min-max\" with ids 0-{}",
                    key, max_id
                )))
            }
        }
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[signs]
matrix = [
    "HLMLHLMLHLML", "LHLMLHLMLHLM", "MLHLMLHLMLHL", "LMLHLMLHLMLH",
    "HLMLHLMLHLML", "LHLMLHLMLHLM", "MLHLMLHLMLHL", "LMLHLMLHLMLH",
    "HLMLHLMLHLML", "LHLMLHLMLHLM", "MLHLMLHLMLHL", "LMLHLMLHLMLH",
]

[tiers.sign.high]
title = "High {first}/{second}"
summary = "s"
details = "d"
[tiers.sign.medium]
title = "Medium"
summary = "s"
details = "d"
[tiers.sign.low]
title = "Low"
summary = "s"
details = "d"
[tiers.life_path.high]
title = "High"
summary = "s"
details = "d"
[tiers.life_path.medium]
title = "Medium"
summary = "s"
details = "d"
[tiers.life_path.low]
title = "Low"
summary = "s"
details = "d"

[life_paths]
high = [[1, 3]]
low = [[4, 5]]
"#;

    #[test]
    fn test_embedded_tables_load() {
        let tables = CompatibilityTables::embedded().unwrap();
        assert_eq!(tables.sign_tier(ZodiacSign::Aries, ZodiacSign::Leo), Tier::High);
        assert_eq!(tables.sign_tier(ZodiacSign::Aries, ZodiacSign::Gemini), Tier::Medium);
        assert_eq!(tables.sign_tier(ZodiacSign::Aries, ZodiacSign::Taurus), Tier::Low);
        assert!(tables.archetype_interpretation("3-4").is_some());
    }

    #[test]
    fn test_sign_matrix_is_symmetric_in_embedded_data() {
        let tables = CompatibilityTables::embedded().unwrap();
        for a in ZodiacSign::ALL {
            for b in ZodiacSign::ALL {
                assert_eq!(tables.sign_tier(a, b), tables.sign_tier(b, a));
            }
        }
    }

    #[test]
    fn test_life_path_lookup_is_ordered_with_medium_default() {
        let tables = CompatibilityTables::from_toml_str(MINIMAL).unwrap();
        assert_eq!(tables.life_path_tier(1, 3), Tier::High);
        // 只列出單一方向
        assert_eq!(tables.life_path_tier(3, 1), Tier::Medium);
        assert_eq!(tables.life_path_tier(4, 5), Tier::Low);
        assert_eq!(tables.life_path_tier(33, 7), Tier::Medium);
    }

    #[test]
    fn test_tier_text_rendering() {
        let tables = CompatibilityTables::from_toml_str(MINIMAL).unwrap();
        let text = tables.sign_texts().for_tier(Tier::High).render("Leo", "Aries");
        assert_eq!(text.title, "High Leo/Aries");
    }

    #[test]
    fn test_rejects_short_matrix() {
        let broken = MINIMAL.replace("\"LMLHLMLHLMLH\",\n]", "]");
        assert!(matches!(
            CompatibilityTables::from_toml_str(&broken),
            Err(EngineError::ConfigurationFault { .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_tier_code() {
        let broken = MINIMAL.replacen("HLMLHLMLHLML", "HLMLHLMLHLMX", 1);
        assert!(CompatibilityTables::from_toml_str(&broken).is_err());
    }

    #[test]
    fn test_rejects_non_canonical_archetype_key() {
        let broken = format!(
            "{}\n[archetype_pairs.\"9-2\"]\nsummary = \"s\"\ndetails = \"d\"\n",
            MINIMAL
        );
        assert!(matches!(
            CompatibilityTables::from_toml_str(&broken),
            Err(EngineError::ConfigurationFault { .. })
        ));
    }

    #[test]
    fn test_rejects_invalid_life_path_value() {
        let broken = MINIMAL.replace("high = [[1, 3]]", "high = [[1, 10]]");
        assert!(CompatibilityTables::from_toml_str(&broken).is_err());
    }

    #[test]
    fn test_rejects_conflicting_life_path_tiers() {
        let broken = MINIMAL.replace("low = [[4, 5]]", "low = [[4, 5], [1, 3]]");
        assert!(CompatibilityTables::from_toml_str(&broken).is_err());
    }

    #[test]
    fn test_base_scores() {
        assert_eq!(Tier::Low.base_score(), 0);
        assert_eq!(Tier::Medium.base_score(), 45);
        assert_eq!(Tier::High.base_score(), 90);
    }
}
