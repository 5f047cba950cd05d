use anyhow::Result;
use esoteric_profile::adapters::{FixedJitter, RandomJitter};
use esoteric_profile::core::compatibility::archetype_pair_score;
use esoteric_profile::core::synastry::SynastryFigures;
use esoteric_profile::{BirthInput, CompatibilityTables, SynastryComposer};
use std::sync::Arc;

fn composer_with_jitter(jitter: u32) -> Result<SynastryComposer> {
    let tables = CompatibilityTables::embedded()?.clone();
    Ok(SynastryComposer::new(
        Arc::new(tables),
        Arc::new(FixedJitter(jitter)),
    ))
}

#[test]
fn test_identical_birth_dates_share_figures() -> Result<()> {
    let composer = composer_with_jitter(0)?;
    let first = BirthInput::new("1984-07-29").with_name("Ana");
    let second = BirthInput::new("1984-07-29").with_name("Bruno");

    let one = SynastryFigures::from_input("person1", &first)?;
    let two = SynastryFigures::from_input("person2", &second)?;
    assert_eq!(one.life_path, two.life_path);
    assert_eq!(one.archetype.id, two.archetype.id);

    let report = composer.compose(&first, &second)?;
    assert_eq!(report.archetype_aspect.harmony_score, 100);
    assert_eq!(report.person1_name, "Ana");
    assert_eq!(report.person2_name, "Bruno");
    Ok(())
}

#[test]
fn test_master_life_path_is_kept_in_report() -> Result<()> {
    let composer = composer_with_jitter(0)?;
    // 2 + 1 + 8 = 11 → master 11; 1 + 9 + 8 + 9 + 1 + 2 + 0 + 3 = 33 → master 33
    let first = BirthInput::new("2000-01-08");
    let second = BirthInput::new("1989-12-03");

    let report = composer.compose(&first, &second)?;

    assert!(report.life_path_aspect.summary.contains("11"));
    assert!(report.life_path_aspect.summary.contains("33"));
    // (11, 33) 在表中為 high
    assert_eq!(report.life_path_aspect.harmony_score, 90);
    // Justice (11) vs The Lovers (6)
    assert_eq!(report.archetype_aspect.harmony_score, archetype_pair_score(11, 6));
    assert_eq!(report.archetype_aspect.title, "The Lovers & Justice");
    Ok(())
}

#[test]
fn test_archetype_aspect_is_order_independent() -> Result<()> {
    let composer = composer_with_jitter(0)?;
    let first = BirthInput::new("1990-05-15");
    let second = BirthInput::new("1977-10-31");

    let forward = composer.compose(&first, &second)?;
    let backward = composer.compose(&second, &first)?;

    assert_eq!(forward.archetype_aspect, backward.archetype_aspect);
    Ok(())
}

#[test]
fn test_overall_harmony_is_rounded_mean() -> Result<()> {
    let composer = composer_with_jitter(7)?;
    let report = composer.compose(
        &BirthInput::new("1990-05-15"),
        &BirthInput::new("1993-11-02"),
    )?;

    let mean = f64::from(
        report.sun_sign_aspect.harmony_score
            + report.archetype_aspect.harmony_score
            + report.life_path_aspect.harmony_score,
    ) / 3.0;
    assert_eq!(report.overall_harmony, mean.round() as u32);
    Ok(())
}

#[test]
fn test_random_jitter_keeps_scores_in_bounds() -> Result<()> {
    let tables = CompatibilityTables::embedded()?.clone();
    let composer = SynastryComposer::new(Arc::new(tables), Arc::new(RandomJitter::new(10)));
    let first = BirthInput::new("1990-03-25");
    let second = BirthInput::new("1991-08-01");

    for _ in 0..200 {
        let report = composer.compose(&first, &second)?;
        // Aries / Leo: high tier
        assert!((90..=100).contains(&report.sun_sign_aspect.harmony_score));
        assert!(report.life_path_aspect.harmony_score <= 100);
        assert!(report.overall_harmony <= 100);
    }
    Ok(())
}

#[test]
fn test_report_serializes_for_transport() -> Result<()> {
    let composer = composer_with_jitter(0)?;
    let report = composer.compose(
        &BirthInput::new("1990-05-15").with_name("Ana"),
        &BirthInput::new("1990-05-15"),
    )?;

    let json = serde_json::to_value(&report)?;
    assert_eq!(json["person1Name"], "Ana");
    assert_eq!(json["person2Name"], "Person 2");
    assert_eq!(json["archetypeAspect"]["harmonyScore"], 100);
    assert!(json["lifePathAspect"]["title"].is_string());
    Ok(())
}
