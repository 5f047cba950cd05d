//! The 22 major arcana and the figure → arcana resolution rule.
//!
//! The catalog is a process-wide constant; nothing mutates it.

use crate::core::reduction::{reduce_to_archetype_range, ARCHETYPE_CEILING};
use crate::domain::model::ArchetypeRecord;
use crate::utils::error::{EngineError, Result};

const fn arcanum(
    id: u8,
    name: &'static str,
    keywords: &'static [&'static str],
    description: &'static str,
) -> ArchetypeRecord {
    ArchetypeRecord {
        id,
        name,
        keywords,
        description,
    }
}

static MAJOR_ARCANA: [ArchetypeRecord; 22] = [
    arcanum(0, "The Fool", &["beginnings", "freedom", "spontaneity"], "The leap into the unknown, trusting the road before it is visible."),
    arcanum(1, "The Magician", &["will", "skill", "manifestation"], "Focused intent that turns available tools into results."),
    arcanum(2, "The High Priestess", &["intuition", "mystery", "inner knowing"], "Quiet wisdom that listens before it speaks."),
    arcanum(3, "The Empress", &["abundance", "nurture", "creativity"], "Fertile creativity that makes things grow."),
    arcanum(4, "The Emperor", &["structure", "authority", "stability"], "Order, protection and the building of lasting foundations."),
    arcanum(5, "The Hierophant", &["tradition", "teaching", "belief"], "The keeper of shared values and the teacher who passes them on."),
    arcanum(6, "The Lovers", &["union", "choice", "harmony"], "Choices made from the heart and the bonds they create."),
    arcanum(7, "The Chariot", &["drive", "victory", "direction"], "Determination that harnesses opposing forces toward a goal."),
    arcanum(8, "Strength", &["courage", "patience", "compassion"], "Gentle power that tames instead of forcing."),
    arcanum(9, "The Hermit", &["introspection", "solitude", "guidance"], "The seeker who withdraws to find an inner light."),
    arcanum(10, "Wheel of Fortune", &["cycles", "change", "destiny"], "The turning of fate and the opportunities each turn brings."),
    arcanum(11, "Justice", &["fairness", "truth", "balance"], "Clear judgement and the consequences of every act."),
    arcanum(12, "The Hanged Man", &["surrender", "perspective", "pause"], "Letting go to see the world from another angle."),
    arcanum(13, "Death", &["transformation", "endings", "renewal"], "The end of a cycle that clears space for the next."),
    arcanum(14, "Temperance", &["moderation", "healing", "synthesis"], "Blending opposites with patience into something whole."),
    arcanum(15, "The Devil", &["attachment", "desire", "shadow"], "The chains we accept and the power in recognising them."),
    arcanum(16, "The Tower", &["upheaval", "revelation", "release"], "Sudden change that breaks false structures."),
    arcanum(17, "The Star", &["hope", "inspiration", "serenity"], "Renewed faith after the storm."),
    arcanum(18, "The Moon", &["dreams", "illusion", "the unconscious"], "The path through uncertainty guided by instinct."),
    arcanum(19, "The Sun", &["joy", "vitality", "success"], "Radiant clarity and confidence."),
    arcanum(20, "Judgement", &["awakening", "calling", "reckoning"], "The call to rise and answer one's purpose."),
    arcanum(21, "The World", &["completion", "integration", "fulfilment"], "A cycle brought to its full and joyful close."),
];

/// All 22 records, ordered by id.
pub fn arcana_catalog() -> &'static [ArchetypeRecord] {
    &MAJOR_ARCANA
}

pub fn archetype_by_id(id: u8) -> Result<&'static ArchetypeRecord> {
    MAJOR_ARCANA
        .iter()
        .find(|record| record.id == id)
        .ok_or_else(|| EngineError::fault(format!("arcana catalog has no entry for id {}", id)))
}

/// Catalog key for any figure: reduce into 1..=22, then 22 wraps to 0.
pub fn archetype_id_for(n: u32) -> u8 {
    let reduced = reduce_to_archetype_range(n);
    if reduced == ARCHETYPE_CEILING {
        0
    } else {
        reduced as u8
    }
}

pub fn resolve_archetype(n: u32) -> Result<&'static ArchetypeRecord> {
    archetype_by_id(archetype_id_for(n))
}
