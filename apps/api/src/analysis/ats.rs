//! ATS scoring: compares a résumé skill set with a job-description skill set.
//!
//! Algorithm:
//! 1. job set empty or absent → no result (comparison skipped, not an error)
//! 2. matched = résumé ∩ job, missing = job − résumé
//! 3. score = round_half_up(100 × |matched| / |job|)
//!
//! Also derives the improvement tips shown next to the score.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::normalize::normalize;
use crate::analysis::roadmap::RoadmapTable;
use crate::analysis::vocabulary::{SkillSet, SkillVocabulary};

static YEARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})\s*\+?\s*(?:years?|yrs?)\b").unwrap());

const MAX_TIPS: usize = 8;
const MAX_SKILL_TIPS: usize = 4;
const MIN_LISTED_SKILLS: usize = 6;

const IMPACT_MARKERS: &[&str] = &["increased", "improved", "reduced", "grew", "saved", "%"];
const ACTION_VERBS: &[&str] = &[
    "developed",
    "led",
    "designed",
    "built",
    "implemented",
    "architected",
    "delivered",
];

/// Outcome of a résumé vs job comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsResult {
    pub score: u8, // 0 – 100
    pub matched_skills: SkillSet,
    pub missing_skills: SkillSet,
}

/// A "N+ years" requirement found in the job text. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRequirement {
    pub years: u8,
}

/// Scores `resume` against `job`. Returns `None` when there is nothing to compare.
pub fn score(resume: &SkillSet, job: Option<&SkillSet>) -> Option<AtsResult> {
    let job = job.filter(|j| !j.is_empty())?;

    let matched_skills = resume.intersection(job);
    let missing_skills = job.difference(resume);
    debug_assert!(matched_skills.is_disjoint(&missing_skills));
    let score = percent_round_half_up(matched_skills.len(), job.len());

    Some(AtsResult {
        score,
        matched_skills,
        missing_skills,
    })
}

/// `round(100 × part / whole)` with halves rounded up, in integer arithmetic.
fn percent_round_half_up(part: usize, whole: usize) -> u8 {
    debug_assert!(whole > 0 && part <= whole);
    let pct = (200 * part + whole) / (2 * whole);
    pct.min(100) as u8
}

/// Collects distinct "N+ years" requirements from a job description, in order of appearance.
pub fn experience_requirements(job_text: &str) -> Vec<ExperienceRequirement> {
    let mut found: Vec<ExperienceRequirement> = Vec::new();
    for caps in YEARS_RE.captures_iter(job_text) {
        let Some(years) = caps.get(1).and_then(|m| m.as_str().parse::<u8>().ok()) else {
            continue;
        };
        let req = ExperienceRequirement { years };
        if !found.contains(&req) {
            found.push(req);
        }
    }
    found
}

/// Builds up to eight improvement tips from the comparison and the résumé text.
pub fn improvement_tips(
    resume_text: &str,
    resume_skills: &SkillSet,
    result: Option<&AtsResult>,
    requirements: &[ExperienceRequirement],
    vocabulary: &SkillVocabulary,
    roadmap: &RoadmapTable,
) -> Vec<String> {
    let lower = resume_text.to_lowercase();
    let tokens = normalize(resume_text);
    let mut tips = Vec::new();

    if let Some(result) = result {
        for entry in roadmap.prioritize(&result.missing_skills).take(MAX_SKILL_TIPS) {
            let resource = entry
                .resources
                .first()
                .map(|r| r.title)
                .unwrap_or("official documentation");
            tips.push(format!(
                "Add \"{}\" to your CV. Learn via: {} (~{} weeks).",
                vocabulary.display_name(entry.skill),
                resource,
                entry.weeks
            ));
        }
    }

    if !lower.contains("project") {
        tips.push(
            "Add a 'Projects' section: concrete examples boost ATS ranking and recruiter trust."
                .to_string(),
        );
    }
    if !IMPACT_MARKERS.iter().any(|m| lower.contains(m)) {
        tips.push("Include quantifiable achievements (e.g. 'Reduced load time by 40%').".to_string());
    }
    if !lower.contains("certification") && !lower.contains("certified") {
        tips.push("Add certifications. Free ones from Google, AWS or Meta still add credibility.".to_string());
    }
    // whole words only: "led" must not match "skilled" or "called"
    if !ACTION_VERBS.iter().any(|v| tokens.iter().any(|t| t == v)) {
        tips.push("Use strong action verbs: Developed, Led, Architected, Implemented.".to_string());
    }
    if resume_skills.len() < MIN_LISTED_SKILLS {
        tips.push("Expand your Skills section: aim for 8-12 listed skills.".to_string());
    }
    for req in requirements {
        tips.push(format!(
            "The role asks for {}+ years of experience. Make your timeline and dates explicit.",
            req.years
        ));
    }

    tips.truncate(MAX_TIPS);
    tips
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> SkillSet {
        items.iter().copied().collect()
    }

    #[test]
    fn test_worked_example_scores_67() {
        let job = set(&["python", "sql", "docker"]);
        let resume = set(&["python", "docker"]);

        let result = score(&resume, Some(&job)).unwrap();
        assert_eq!(result.score, 67);
        assert_eq!(result.matched_skills, set(&["python", "docker"]));
        assert_eq!(result.missing_skills, set(&["sql"]));
    }

    #[test]
    fn test_superset_resume_scores_100() {
        let job = set(&["python", "sql"]);
        let resume = set(&["python", "sql", "rust", "docker"]);
        let result = score(&resume, Some(&job)).unwrap();
        assert_eq!(result.score, 100);
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_disjoint_sets_score_0() {
        let job = set(&["java", "spring boot"]);
        let resume = set(&["python"]);
        let result = score(&resume, Some(&job)).unwrap();
        assert_eq!(result.score, 0);
        assert!(result.matched_skills.is_empty());
        assert_eq!(result.missing_skills, job);
    }

    #[test]
    fn test_empty_resume_misses_everything() {
        let job = set(&["python", "sql", "docker"]);
        let result = score(&SkillSet::new(), Some(&job)).unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.missing_skills, job);
    }

    #[test]
    fn test_absent_or_empty_job_returns_none() {
        let resume = set(&["python"]);
        assert!(score(&resume, None).is_none());
        assert!(score(&resume, Some(&SkillSet::new())).is_none());
    }

    #[test]
    fn test_matched_and_missing_partition_job_set() {
        let resume = set(&["a", "c", "e", "x"]);
        let jobs = [
            set(&["a"]),
            set(&["b"]),
            set(&["a", "b", "c"]),
            set(&["a", "b", "c", "d", "e", "f", "g"]),
        ];
        for job in &jobs {
            let result = score(&resume, Some(job)).unwrap();
            assert_eq!(result.matched_skills.union(&result.missing_skills), *job);
            assert!(result.matched_skills.is_disjoint(&result.missing_skills));
        }
    }

    #[test]
    fn test_rounding_is_half_up() {
        assert_eq!(percent_round_half_up(1, 8), 13); // 12.5
        assert_eq!(percent_round_half_up(1, 3), 33); // 33.3
        assert_eq!(percent_round_half_up(2, 3), 67); // 66.7
        assert_eq!(percent_round_half_up(1, 2), 50);
        assert_eq!(percent_round_half_up(3, 8), 38); // 37.5
    }

    #[test]
    fn test_experience_requirements_are_deduplicated() {
        let reqs = experience_requirements(
            "We want 5+ years of Rust, 3 years Kubernetes and ideally 5 yrs leadership.",
        );
        assert_eq!(
            reqs,
            vec![
                ExperienceRequirement { years: 5 },
                ExperienceRequirement { years: 3 }
            ]
        );
    }

    #[test]
    fn test_tips_lead_with_missing_skills_and_cap_at_eight() {
        let vocab = SkillVocabulary::builtin();
        let roadmap = RoadmapTable::for_vocabulary(&vocab);
        let result = score(
            &SkillSet::new(),
            Some(&set(&["python", "docker", "kubernetes", "aws", "sql"])),
        )
        .unwrap();
        let reqs = [ExperienceRequirement { years: 4 }];

        let tips = improvement_tips("", &SkillSet::new(), Some(&result), &reqs, &vocab, &roadmap);
        assert_eq!(tips.len(), MAX_TIPS);
        assert!(tips[0].contains("Python"), "got {}", tips[0]);
        assert_eq!(
            tips.iter().filter(|t| t.starts_with("Add \"")).count(),
            MAX_SKILL_TIPS
        );
    }

    #[test]
    fn test_strong_resume_gets_no_heuristic_tips() {
        let vocab = SkillVocabulary::builtin();
        let roadmap = RoadmapTable::for_vocabulary(&vocab);
        let text = "Led projects, improved throughput 30%, AWS certified, built services.";
        let skills = set(&["a", "b", "c", "d", "e", "f"]);

        let tips = improvement_tips(text, &skills, None, &[], &vocab, &roadmap);
        assert!(tips.is_empty(), "unexpected tips: {tips:?}");
    }

    #[test]
    fn test_action_verbs_match_whole_words_only() {
        let vocab = SkillVocabulary::builtin();
        let roadmap = RoadmapTable::for_vocabulary(&vocab);
        let skills = set(&["a", "b", "c", "d", "e", "f"]);
        let verb_tip = |text: &str| {
            improvement_tips(text, &skills, None, &[], &vocab, &roadmap)
                .iter()
                .any(|t| t.starts_with("Use strong action verbs"))
        };

        assert!(verb_tip("Skilled engineer who enabled teams and called APIs."));
        assert!(!verb_tip("Led a team of four. Developed the billing service."));
    }
}
