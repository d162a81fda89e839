use crate::analysis::roadmap::RoadmapTable;
use crate::analysis::vocabulary::SkillVocabulary;

/// Static lookup tables, built once at startup and shared read-only via `AppState`.
#[derive(Debug, Clone)]
pub struct SkillCatalog {
    pub vocabulary: SkillVocabulary,
    pub roadmap: RoadmapTable,
}

impl SkillCatalog {
    pub fn builtin() -> Self {
        let vocabulary = SkillVocabulary::builtin();
        let roadmap = RoadmapTable::for_vocabulary(&vocabulary);
        debug_assert!(roadmap.entries().iter().all(|e| vocabulary.contains(e.skill)));
        Self { vocabulary, roadmap }
    }
}
