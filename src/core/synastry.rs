use crate::core::arcana::resolve_archetype;
use crate::core::compatibility::CompatibilityScorer;
use crate::core::reduction::{digit_sum, reduce_to_life_path_range};
use crate::core::tables::CompatibilityTables;
use crate::core::zodiac::sun_sign_for_date;
use crate::domain::model::{ArchetypeRecord, BirthInput, SynastryReport, ZodiacSign};
use crate::domain::ports::JitterSource;
use crate::utils::error::Result;
use crate::utils::validation::parse_birth_date;
use std::sync::Arc;

pub const DEFAULT_PERSON1_NAME: &str = "Person 1";
pub const DEFAULT_PERSON2_NAME: &str = "Person 2";

/// What synastry needs from one person; date only, no chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SynastryFigures {
    pub sun_sign: ZodiacSign,
    pub life_path: u32,
    pub archetype: &'static ArchetypeRecord,
}

impl SynastryFigures {
    pub fn from_input(field: &str, input: &BirthInput) -> Result<Self> {
        let date_text = input.birth_date.trim();
        let birth_date = parse_birth_date(field, date_text)?;
        let life_path = reduce_to_life_path_range(digit_sum(date_text));

        Ok(Self {
            sun_sign: sun_sign_for_date(birth_date),
            life_path,
            archetype: resolve_archetype(life_path)?,
        })
    }
}

pub struct SynastryComposer {
    tables: Arc<CompatibilityTables>,
    jitter: Arc<dyn JitterSource>,
    person1_default_name: String,
    person2_default_name: String,
}

impl SynastryComposer {
    pub fn new(tables: Arc<CompatibilityTables>, jitter: Arc<dyn JitterSource>) -> Self {
        Self {
            tables,
            jitter,
            person1_default_name: DEFAULT_PERSON1_NAME.to_string(),
            person2_default_name: DEFAULT_PERSON2_NAME.to_string(),
        }
    }

    pub fn with_default_names(mut self, person1: impl Into<String>, person2: impl Into<String>) -> Self {
        self.person1_default_name = person1.into();
        self.person2_default_name = person2.into();
        self
    }

    pub fn compose(&self, first: &BirthInput, second: &BirthInput) -> Result<SynastryReport> {
        let one = SynastryFigures::from_input("person1.birth_date", first)?;
        let two = SynastryFigures::from_input("person2.birth_date", second)?;
        tracing::debug!(?one, ?two, "synastry figures");

        let scorer = CompatibilityScorer::new(&self.tables, self.jitter.as_ref());
        let sun_sign_aspect = scorer.score_sun_signs(one.sun_sign, two.sun_sign);
        let archetype_aspect = scorer.score_archetypes(one.archetype, two.archetype);
        let life_path_aspect = scorer.score_life_paths(one.life_path, two.life_path);

        let overall_harmony = overall_harmony([
            sun_sign_aspect.harmony_score,
            archetype_aspect.harmony_score,
            life_path_aspect.harmony_score,
        ]);

        Ok(SynastryReport {
            person1_name: first
                .display_name()
                .unwrap_or(self.person1_default_name.as_str())
                .to_string(),
            person2_name: second
                .display_name()
                .unwrap_or(self.person2_default_name.as_str())
                .to_string(),
            overall_harmony,
            sun_sign_aspect,
            archetype_aspect,
            life_path_aspect,
        })
    }
}

/// Rounded mean of the three aspect scores.
pub fn overall_harmony(scores: [u32; 3]) -> u32 {
    let total: u32 = scores.iter().sum();
    (f64::from(total) / 3.0).round() as u32
}
