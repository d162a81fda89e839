//! The per-request analysis: résumé text + optional job text → report.
//!
//! Pure and synchronous. Remote fetches happen before this runs and arrive here
//! as already-folded results; nothing in this module touches the network.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::ats::{
    experience_requirements, improvement_tips, score, AtsResult, ExperienceRequirement,
};
use crate::analysis::catalog::SkillCatalog;
use crate::analysis::extractor::extract_skills_from_text;
use crate::analysis::roadmap::{build_roadmap, render_markdown, RoadmapEntry};
use crate::analysis::vocabulary::SkillSet;
use crate::ingest::profile::{parse_profile, CandidateProfile, ExperienceEntry};
use crate::ingest::remote::{FetchError, LinkedInPage};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No résumé text or LinkedIn profile could be read")]
    NoUsableInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    EmptyInput,
    ExternalFetchFailure,
    NoJobSkills,
    RenderFailure,
}

/// A non-fatal condition surfaced next to the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn fetch_failed(what: &str, err: &FetchError) -> Self {
        warn!("{what} fetch failed: {err}");
        Self::new(
            WarningKind::ExternalFetchFailure,
            format!("Could not fetch {what}: {err}"),
        )
    }
}

/// Everything `analyze` needs, already extracted and fetched.
#[derive(Debug, Default)]
pub struct AnalysisInput {
    pub resume_text: Option<String>,
    pub job_text: Option<String>,
    pub linkedin: Option<Result<LinkedInPage, FetchError>>,
    /// Warnings raised while gathering the input (e.g. a failed job URL fetch).
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub profile: CandidateProfile,
    pub resume_skills: SkillSet,
    /// Absent when no job description was supplied or it named no known skill.
    pub ats: Option<AtsResult>,
    pub experience_requirements: Vec<ExperienceRequirement>,
    pub tips: Vec<String>,
    pub roadmap: Vec<RoadmapEntry>,
    pub roadmap_markdown: Option<String>,
    pub warnings: Vec<Warning>,
}

/// Runs the full analysis for one request.
pub fn analyze(
    input: &AnalysisInput,
    catalog: &SkillCatalog,
    today: NaiveDate,
) -> Result<AnalysisReport, AnalysisError> {
    let mut warnings = input.warnings.clone();

    let linkedin = match &input.linkedin {
        Some(Ok(page)) => Some(page),
        Some(Err(e)) => {
            warnings.push(Warning::fetch_failed("LinkedIn profile", e));
            None
        }
        None => None,
    };

    // With a résumé present, LinkedIn only contributes extra skills (and a
    // fallback name); without one, the page stands in for the résumé.
    let (resume_text, profile, resume_skills) = match (&input.resume_text, linkedin) {
        (Some(text), page) => {
            let mut profile = parse_profile(text);
            let mut skills = extract_skills_from_text(text, &catalog.vocabulary);
            if let Some(page) = page {
                if profile.name.is_none() {
                    profile.name = page.name.clone();
                }
                skills = skills.union(&extract_skills_from_text(
                    &linkedin_text(page),
                    &catalog.vocabulary,
                ));
            }
            (text.clone(), profile, skills)
        }
        (None, Some(page)) => {
            let text = linkedin_text(page);
            let skills = extract_skills_from_text(&text, &catalog.vocabulary);
            (text, profile_from_linkedin(page), skills)
        }
        (None, None) => return Err(AnalysisError::NoUsableInput),
    };

    if resume_text.trim().is_empty() {
        warnings.push(Warning::new(
            WarningKind::EmptyInput,
            "The résumé contained no readable text",
        ));
    }

    let job_text = input.job_text.as_deref().map(str::trim).filter(|t| !t.is_empty());
    let job_skills = job_text.map(|t| extract_skills_from_text(t, &catalog.vocabulary));
    if matches!(&job_skills, Some(skills) if skills.is_empty()) {
        warnings.push(Warning::new(
            WarningKind::NoJobSkills,
            "No known skills were found in the job description; ATS comparison skipped",
        ));
    }

    let ats = score(&resume_skills, job_skills.as_ref());
    let requirements = job_text.map(experience_requirements).unwrap_or_default();
    let tips = improvement_tips(
        &resume_text,
        &resume_skills,
        ats.as_ref(),
        &requirements,
        &catalog.vocabulary,
        &catalog.roadmap,
    );

    let roadmap = ats
        .as_ref()
        .map(|r| build_roadmap(&r.missing_skills, &catalog.roadmap))
        .unwrap_or_default();
    let roadmap_markdown = ats
        .as_ref()
        .map(|_| render_markdown(&roadmap, &catalog.vocabulary, today));

    let analysis_id = Uuid::new_v4();
    info!(
        %analysis_id,
        resume_skills = resume_skills.len(),
        score = ats.as_ref().map(|r| r.score),
        warnings = warnings.len(),
        "Analysis complete"
    );

    Ok(AnalysisReport {
        analysis_id,
        profile,
        resume_skills,
        ats,
        experience_requirements: requirements,
        tips,
        roadmap,
        roadmap_markdown,
        warnings,
    })
}

fn linkedin_text(page: &LinkedInPage) -> String {
    format!("{}\n{}", page.description, page.body_text)
}

fn profile_from_linkedin(page: &LinkedInPage) -> CandidateProfile {
    let experience = if page.description.is_empty() {
        Vec::new()
    } else {
        vec![ExperienceEntry {
            title: page.name.clone().unwrap_or_else(|| "LinkedIn profile".to_string()),
            description: page.description.clone(),
        }]
    };
    CandidateProfile {
        name: page.name.clone(),
        experience,
        ..CandidateProfile::default()
    }
}
