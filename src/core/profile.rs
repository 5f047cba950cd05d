use crate::core::arcana::resolve_archetype;
use crate::core::name_encoding::{cabalistic_number, gematria_number};
use crate::core::reduction::{
    digit_sum, reduce_to_archetype_range, reduce_to_life_path_range, reduce_to_single_digit,
};
use crate::domain::model::{ArcanaSet, AstrologicalChart, BirthInput, NumerologyProfile, Profile};
use crate::domain::ports::{ChartProvider, Geocoder};
use crate::utils::error::Result;
use crate::utils::validation::{parse_birth_date, parse_birth_time, require_input};
use chrono::{Datelike, FixedOffset, NaiveDate};
use std::sync::Arc;

/// Builds a full profile: chart from the collaborators, numerology and
/// arcana from the date and name.
pub struct ProfileComposer {
    geocoder: Arc<dyn Geocoder>,
    chart_provider: Arc<dyn ChartProvider>,
    timezone_offset: FixedOffset,
    reference_year: i32,
}

impl ProfileComposer {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        chart_provider: Arc<dyn ChartProvider>,
        timezone_offset: FixedOffset,
        reference_year: i32,
    ) -> Self {
        Self {
            geocoder,
            chart_provider,
            timezone_offset,
            reference_year,
        }
    }

    pub async fn compose(&self, input: &BirthInput) -> Result<Profile> {
        let time_text = require_input("birth_time", &input.birth_time)?;
        let place = require_input("birth_place", &input.birth_place)?;
        let date_text = input.birth_date.trim();
        let birth_date = parse_birth_date("birth_date", date_text)?;
        let birth_time = parse_birth_time("birth_time", time_text)?;

        // 第二個呼叫依賴第一個的結果，依序等待
        let coordinates = self.geocoder.geocode(place).await?;
        tracing::debug!(
            place,
            latitude = coordinates.latitude,
            longitude = coordinates.longitude,
            "birth place resolved"
        );

        let chart = self
            .chart_provider
            .compute_chart(
                birth_date.and_time(birth_time),
                self.timezone_offset,
                coordinates,
            )
            .await?;

        let numerology = compute_numerology(
            date_text,
            birth_date,
            input.display_name(),
            self.reference_year,
        );
        tracing::debug!(?numerology, "numerology computed");

        let arcana = resolve_arcana(&numerology)?;
        let summary = compose_summary(&chart, &arcana);

        Ok(Profile {
            chart,
            numerology,
            arcana,
            summary,
        })
    }
}

/// Date- and name-derived figures. Pure; the year of the annual figure
/// is passed in.
pub fn compute_numerology(
    date_text: &str,
    birth_date: NaiveDate,
    name: Option<&str>,
    reference_year: i32,
) -> NumerologyProfile {
    let all_digits = digit_sum(date_text);
    let month_day = birth_date.month() + birth_date.day();

    let personal_number = reduce_to_archetype_range(all_digits);
    let personality_number =
        reduce_to_archetype_range(month_day + birth_date.year().unsigned_abs());
    let annual_number = reduce_to_archetype_range(month_day + reference_year.unsigned_abs());

    NumerologyProfile {
        personal_number,
        personality_number,
        soul_number: reduce_to_single_digit(personality_number),
        annual_number,
        life_path_number: reduce_to_life_path_range(all_digits),
        destiny_number: name.map(|n| reduce_to_archetype_range(digit_sum(n))),
        cabalistic_name_number: name.map(cabalistic_number),
        gematria_name_number: name.map(gematria_number),
    }
}

pub fn resolve_arcana(numerology: &NumerologyProfile) -> Result<ArcanaSet> {
    Ok(ArcanaSet {
        personal: resolve_archetype(numerology.personal_number)?,
        personality: resolve_archetype(numerology.personality_number)?,
        soul: resolve_archetype(numerology.soul_number)?,
        annual: resolve_archetype(numerology.annual_number)?,
        destiny: numerology.destiny_number.map(resolve_archetype).transpose()?,
        cabalistic_name: numerology
            .cabalistic_name_number
            .map(resolve_archetype)
            .transpose()?,
        gematria_name: numerology
            .gematria_name_number
            .map(resolve_archetype)
            .transpose()?,
    })
}

pub fn compose_summary(chart: &AstrologicalChart, arcana: &ArcanaSet) -> String {
    let mut sentences = vec![
        format!(
            "Sun in {} (house {}), Moon in {} (house {}), {} rising.",
            chart.sun.sign, chart.sun.house, chart.moon.sign, chart.moon.house, chart.ascendant.sign
        ),
        format!(
            "Your personal arcanum is {}, expressed through the personality of {} and the soul of {}.",
            arcana.personal.name, arcana.personality.name, arcana.soul.name
        ),
        format!("This year is guided by {}.", arcana.annual.name),
    ];

    if let Some(destiny) = arcana.destiny {
        sentences.push(format!("Your name carries the destiny of {}.", destiny.name));
    }

    match (arcana.cabalistic_name, arcana.gematria_name) {
        (Some(cabalistic), Some(gematria)) if cabalistic.id == gematria.id => {
            sentences.push(format!(
                "Both readings of your name point to {}, reinforcing its influence.",
                cabalistic.name
            ));
        }
        (Some(cabalistic), Some(gematria)) => {
            sentences.push(format!(
                "The cabalistic reading of your name reveals {}, while its gematria reveals {}.",
                cabalistic.name, gematria.name
            ));
        }
        _ => {}
    }

    sentences.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AscendantPlacement, Placement, ZodiacSign};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn chart() -> AstrologicalChart {
        AstrologicalChart {
            sun: Placement {
                sign: ZodiacSign::Taurus,
                house: 9,
            },
            moon: Placement {
                sign: ZodiacSign::Cancer,
                house: 11,
            },
            ascendant: AscendantPlacement {
                sign: ZodiacSign::Virgo,
            },
        }
    }

    #[test]
    fn test_date_figures() {
        let numerology = compute_numerology("1990-05-15", date(1990, 5, 15), None, 2024);
        assert_eq!(numerology.personal_number, 3);
        // 5 + 15 + 1990 = 2010 → 3
        assert_eq!(numerology.personality_number, 3);
        assert_eq!(numerology.soul_number, 3);
        // 5 + 15 + 2024 = 2044 → 10
        assert_eq!(numerology.annual_number, 10);
        assert_eq!(numerology.life_path_number, 3);
        assert_eq!(numerology.destiny_number, None);
        assert_eq!(numerology.cabalistic_name_number, None);
        assert_eq!(numerology.gematria_name_number, None);
    }

    #[test]
    fn test_soul_drops_master_numbers() {
        // 1 + 1 + 1991 = 1993 → 22, soul reduces it further to 4
        let numerology = compute_numerology("1991-01-01", date(1991, 1, 1), None, 2024);
        assert_eq!(numerology.personality_number, 22);
        assert_eq!(numerology.soul_number, 4);
    }

    #[test]
    fn test_name_figures() {
        let numerology = compute_numerology("1990-05-15", date(1990, 5, 15), Some("Maria"), 2024);
        // 名字不含數字，數字和為 0 → 22
        assert_eq!(numerology.destiny_number, Some(22));
        assert_eq!(numerology.cabalistic_name_number, Some(6));
        assert_eq!(numerology.gematria_name_number, Some(20));
    }

    #[test]
    fn test_arcana_follow_wraparound() {
        let numerology = compute_numerology("1991-01-01", date(1991, 1, 1), Some("Ana"), 2024);
        let arcana = resolve_arcana(&numerology).unwrap();
        assert_eq!(arcana.personality.id, 0);
        assert_eq!(arcana.destiny.unwrap().id, 0);
        assert_eq!(arcana.cabalistic_name.unwrap().id, 7);
    }

    #[test]
    fn test_summary_without_name() {
        let numerology = compute_numerology("1990-05-15", date(1990, 5, 15), None, 2024);
        let arcana = resolve_arcana(&numerology).unwrap();
        let summary = compose_summary(&chart(), &arcana);
        assert!(summary.contains("Sun in Taurus (house 9)"));
        assert!(summary.contains("Virgo rising"));
        assert!(summary.contains("The Empress"));
        assert!(!summary.contains("name"));
    }

    #[test]
    fn test_summary_with_matching_name_readings() {
        let numerology = compute_numerology("1990-05-15", date(1990, 5, 15), Some("Ana"), 2024);
        let arcana = resolve_arcana(&numerology).unwrap();
        let summary = compose_summary(&chart(), &arcana);
        assert!(summary.contains("Both readings of your name point to The Chariot"));
        assert!(!summary.contains("gematria reveals"));
    }

    #[test]
    fn test_summary_with_differing_name_readings() {
        let numerology = compute_numerology("1990-05-15", date(1990, 5, 15), Some("Maria"), 2024);
        let arcana = resolve_arcana(&numerology).unwrap();
        let summary = compose_summary(&chart(), &arcana);
        assert!(summary.contains("cabalistic reading of your name reveals The Lovers"));
        assert!(summary.contains("gematria reveals Judgement"));
    }
}
