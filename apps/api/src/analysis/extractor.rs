//! Skill extraction: finds vocabulary skills in a normalized token sequence.
//!
//! A skill is detected when any of its synonyms occurs as a contiguous run of
//! whole tokens. No fuzzy or partial-token matching: `golang` never matches `golanguage`.

use crate::analysis::normalize::normalize;
use crate::analysis::vocabulary::{SkillSet, SkillVocabulary};

/// Returns the set of canonical skills present in `tokens`.
pub fn extract_skills(tokens: &[String], vocabulary: &SkillVocabulary) -> SkillSet {
    vocabulary
        .entries()
        .iter()
        .filter(|entry| {
            entry
                .synonyms
                .iter()
                .any(|synonym| contains_run(tokens, synonym))
        })
        .map(|entry| entry.canonical)
        .collect()
}

/// Convenience wrapper: normalize then extract.
pub fn extract_skills_from_text(text: &str, vocabulary: &SkillVocabulary) -> SkillSet {
    extract_skills(&normalize(text), vocabulary)
}

fn contains_run(haystack: &[String], needle: &[String]) -> bool {
    if needle.is_empty() || needle.len() > haystack.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|window| window == needle)
}
