use crate::core::tables::{CompatibilityTables, Tier};
use crate::domain::model::{ArchetypeRecord, CompatibilityAspect, ZodiacSign};
use crate::domain::ports::JitterSource;

/// Upper bound of the random term added to tier scores.
pub const MAX_JITTER: u32 = 10;

/// Order-independent key for the archetype-pair table.
pub fn symmetric_pair_key(first: u8, second: u8) -> String {
    format!("{}-{}", first.min(second), first.max(second))
}

/// `(100 - |a - b| * 3) mod 101`.
///
/// The modulo is kept as is rather than clamped; with ids 0..=21 the
/// distance never exceeds 21, so the wrap never triggers in practice.
pub fn archetype_pair_score(first: u8, second: u8) -> u32 {
    let distance = (i32::from(first) - i32::from(second)).abs();
    (100 - distance * 3).rem_euclid(101) as u32
}

/// Tier base plus jitter, capped at 100.
pub fn tiered_score(tier: Tier, jitter: u32) -> u32 {
    (tier.base_score() + jitter.min(MAX_JITTER)).min(100)
}

pub struct CompatibilityScorer<'a> {
    tables: &'a CompatibilityTables,
    jitter: &'a dyn JitterSource,
}

impl<'a> CompatibilityScorer<'a> {
    pub fn new(tables: &'a CompatibilityTables, jitter: &'a dyn JitterSource) -> Self {
        Self { tables, jitter }
    }

    pub fn score_sun_signs(&self, first: ZodiacSign, second: ZodiacSign) -> CompatibilityAspect {
        let tier = self.tables.sign_tier(first, second);
        let text = self
            .tables
            .sign_texts()
            .for_tier(tier)
            .render(first.as_str(), second.as_str());
        let harmony_score = tiered_score(tier, self.jitter.jitter());

        tracing::debug!(%first, %second, ?tier, harmony_score, "sun sign aspect scored");

        CompatibilityAspect {
            title: text.title,
            harmony_score,
            summary: text.summary,
            details: text.details,
        }
    }

    pub fn score_archetypes(
        &self,
        first: &ArchetypeRecord,
        second: &ArchetypeRecord,
    ) -> CompatibilityAspect {
        // 依 id 排序，確保 (a, b) 與 (b, a) 產生相同文字
        let (low, high) = if first.id <= second.id {
            (first, second)
        } else {
            (second, first)
        };
        let key = symmetric_pair_key(low.id, high.id);
        let harmony_score = archetype_pair_score(low.id, high.id);

        let (summary, details) = match self.tables.archetype_interpretation(&key) {
            Some(interpretation) => (
                interpretation.summary.clone(),
                interpretation.details.clone(),
            ),
            None => {
                tracing::debug!(%key, "no archetype pair interpretation, synthesizing");
                synthesize_archetype_text(low, high)
            }
        };

        CompatibilityAspect {
            title: format!("{} & {}", low.name, high.name),
            harmony_score,
            summary,
            details,
        }
    }

    pub fn score_life_paths(&self, first: u32, second: u32) -> CompatibilityAspect {
        let tier = self.tables.life_path_tier(first, second);
        let text = self
            .tables
            .life_path_texts()
            .for_tier(tier)
            .render(&first.to_string(), &second.to_string());
        let harmony_score = tiered_score(tier, self.jitter.jitter());

        tracing::debug!(first, second, ?tier, harmony_score, "life path aspect scored");

        CompatibilityAspect {
            title: text.title,
            harmony_score,
            summary: text.summary,
            details: text.details,
        }
    }
}

fn synthesize_archetype_text(low: &ArchetypeRecord, high: &ArchetypeRecord) -> (String, String) {
    if low.id == high.id {
        let summary = format!(
            "Both partners carry the energy of {}, recognising themselves in each other.",
            low.name
        );
        let details = format!(
            "A shared archetype amplifies {}. {} The challenge is to avoid repeating the same blind spots together.",
            low.keywords.join(", "),
            low.description
        );
        return (summary, details);
    }

    let summary = format!(
        "{} and {} meet as complementary archetypes.",
        low.name, high.name
    );
    let details = format!(
        "{} contributes {} while {} contributes {}. The relationship grows when each partner learns from the qualities the other embodies.",
        low.name,
        low.keywords.join(", "),
        high.name,
        high.keywords.join(", ")
    );
    (summary, details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::arcana::archetype_by_id;

    struct Fixed(u32);

    impl JitterSource for Fixed {
        fn jitter(&self) -> u32 {
            self.0
        }
    }

    fn scorer_with(jitter: &'static Fixed) -> CompatibilityScorer<'static> {
        CompatibilityScorer::new(CompatibilityTables::embedded().unwrap(), jitter)
    }

    static ZERO: Fixed = Fixed(0);
    static FIVE: Fixed = Fixed(5);
    static HUGE: Fixed = Fixed(500);

    #[test]
    fn test_symmetric_pair_key() {
        assert_eq!(symmetric_pair_key(7, 3), "3-7");
        assert_eq!(symmetric_pair_key(3, 7), "3-7");
        assert_eq!(symmetric_pair_key(0, 0), "0-0");
        assert_eq!(symmetric_pair_key(12, 2), "2-12");
    }

    #[test]
    fn test_archetype_pair_score_formula() {
        assert_eq!(archetype_pair_score(3, 7), 88);
        assert_eq!(archetype_pair_score(7, 3), 88);
        assert_eq!(archetype_pair_score(0, 21), 37);
        assert_eq!(archetype_pair_score(9, 9), 100);
    }

    #[test]
    fn test_tiered_score_caps() {
        assert_eq!(tiered_score(Tier::High, 10), 100);
        assert_eq!(tiered_score(Tier::High, 500), 100);
        assert_eq!(tiered_score(Tier::Medium, 3), 48);
        assert_eq!(tiered_score(Tier::Low, 0), 0);
    }

    #[test]
    fn test_sun_sign_aspect_uses_tier_text() {
        let aspect = scorer_with(&FIVE).score_sun_signs(ZodiacSign::Aries, ZodiacSign::Leo);
        assert_eq!(aspect.harmony_score, 95);
        assert_eq!(aspect.title, "Natural Affinity");
        assert!(aspect.summary.contains("Aries"));
        assert!(aspect.summary.contains("Leo"));

        let low = scorer_with(&ZERO).score_sun_signs(ZodiacSign::Taurus, ZodiacSign::Leo);
        assert_eq!(low.harmony_score, 0);
        assert_eq!(low.title, "Creative Tension");
    }

    #[test]
    fn test_jitter_never_exceeds_bound() {
        let aspect = scorer_with(&HUGE).score_sun_signs(ZodiacSign::Aries, ZodiacSign::Gemini);
        assert_eq!(aspect.harmony_score, 55);
    }

    #[test]
    fn test_archetype_aspect_from_table() {
        let empress = archetype_by_id(3).unwrap();
        let emperor = archetype_by_id(4).unwrap();
        let aspect = scorer_with(&ZERO).score_archetypes(emperor, empress);
        assert_eq!(aspect.harmony_score, 97);
        assert_eq!(aspect.title, "The Empress & The Emperor");
        assert!(aspect.summary.starts_with("Nurture and structure"));
    }

    #[test]
    fn test_archetype_aspect_falls_back_without_entry() {
        let empress = archetype_by_id(3).unwrap();
        let chariot = archetype_by_id(7).unwrap();
        let aspect = scorer_with(&ZERO).score_archetypes(empress, chariot);
        assert_eq!(aspect.harmony_score, 88);
        assert!(aspect.summary.contains("The Empress"));
        assert!(aspect.summary.contains("The Chariot"));
        assert!(aspect.details.contains("abundance"));
    }

    #[test]
    fn test_archetype_aspect_is_symmetric() {
        let scorer = scorer_with(&ZERO);
        for a in 0..22u8 {
            for b in 0..22u8 {
                let first = archetype_by_id(a).unwrap();
                let second = archetype_by_id(b).unwrap();
                assert_eq!(
                    scorer.score_archetypes(first, second),
                    scorer.score_archetypes(second, first)
                );
            }
        }
    }

    #[test]
    fn test_same_archetype_fallback_text() {
        let star = archetype_by_id(17).unwrap();
        let aspect = scorer_with(&ZERO).score_archetypes(star, star);
        assert_eq!(aspect.harmony_score, 100);
        assert!(aspect.summary.contains("The Star"));
    }

    #[test]
    fn test_life_path_aspect_defaults_to_medium() {
        let scorer = scorer_with(&FIVE);
        let listed = scorer.score_life_paths(1, 3);
        assert_eq!(listed.harmony_score, 95);
        assert_eq!(listed.title, "Aligned Paths");

        let unlisted = scorer.score_life_paths(8, 33);
        assert_eq!(unlisted.harmony_score, 50);
        assert_eq!(unlisted.title, "Parallel Paths");
        assert!(unlisted.summary.contains("8"));
        assert!(unlisted.summary.contains("33"));

        let low = scorer.score_life_paths(4, 5);
        assert_eq!(low.harmony_score, 5);
    }
}
