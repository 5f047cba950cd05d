use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw birth data as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthInput {
    pub name: Option<String>,
    pub birth_date: String,
    pub birth_time: Option<String>,
    pub birth_place: Option<String>,
}

impl BirthInput {
    pub fn new(birth_date: impl Into<String>) -> Self {
        Self {
            birth_date: birth_date.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.birth_time = Some(time.into());
        self
    }

    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.birth_place = Some(place.into());
        self
    }

    /// Name with surrounding whitespace removed, `None` when blank.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    /// Signs in zodiac order, Aries first.
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZodiacSign {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ZodiacSign::ALL
            .iter()
            .copied()
            .find(|sign| sign.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown zodiac sign '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub sign: ZodiacSign,
    pub house: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AscendantPlacement {
    pub sign: ZodiacSign,
}

/// Output of the external chart provider. Read, never modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstrologicalChart {
    pub sun: Placement,
    pub moon: Placement,
    pub ascendant: AscendantPlacement,
}

/// One of the 22 major arcana.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ArchetypeRecord {
    pub id: u8,
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumerologyProfile {
    pub personal_number: u32,
    pub personality_number: u32,
    pub soul_number: u32,
    pub annual_number: u32,
    pub life_path_number: u32,
    pub destiny_number: Option<u32>,
    pub cabalistic_name_number: Option<u32>,
    pub gematria_name_number: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcanaSet {
    pub personal: &'static ArchetypeRecord,
    pub personality: &'static ArchetypeRecord,
    pub soul: &'static ArchetypeRecord,
    pub annual: &'static ArchetypeRecord,
    pub destiny: Option<&'static ArchetypeRecord>,
    pub cabalistic_name: Option<&'static ArchetypeRecord>,
    pub gematria_name: Option<&'static ArchetypeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub chart: AstrologicalChart,
    pub numerology: NumerologyProfile,
    pub arcana: ArcanaSet,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityAspect {
    pub title: String,
    pub harmony_score: u32,
    pub summary: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynastryReport {
    pub person1_name: String,
    pub person2_name: String,
    pub overall_harmony: u32,
    pub sun_sign_aspect: CompatibilityAspect,
    pub archetype_aspect: CompatibilityAspect,
    pub life_path_aspect: CompatibilityAspect,
}
