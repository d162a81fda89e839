//! The regenerated, ATS-friendly résumé.

use crate::analysis::pipeline::AnalysisReport;
use crate::analysis::vocabulary::SkillVocabulary;
use crate::compose::templates::{escape_html, render_template, RESUME_TEMPLATE};
use crate::compose::RenderError;
use crate::ingest::profile::ExperienceEntry;

const MAX_SKILLS: usize = 16;
const SUMMARY_SKILLS: usize = 5;
const MAX_EXPERIENCE: usize = 5;
const MAX_EDUCATION: usize = 3;
const DEFAULT_NAME: &str = "Professional";

/// Render input for the résumé. Built from a finished analysis; immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeDocument {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Display names; skills the job asked for come first.
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<String>,
}

impl ResumeDocument {
    pub fn from_report(report: &AnalysisReport, vocabulary: &SkillVocabulary) -> Self {
        let profile = &report.profile;

        let matched = report.ats.as_ref().map(|ats| &ats.matched_skills);
        let ordered = matched.into_iter().flat_map(|m| m.iter()).chain(
            report
                .resume_skills
                .iter()
                .filter(|s| !matched.is_some_and(|m| m.contains(s))),
        );

        Self {
            name: profile
                .name
                .clone()
                .unwrap_or_else(|| DEFAULT_NAME.to_string()),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            skills: ordered
                .take(MAX_SKILLS)
                .map(|s| vocabulary.display_name(s).to_string())
                .collect(),
            experience: profile.experience.iter().take(MAX_EXPERIENCE).cloned().collect(),
            education: profile.education.iter().take(MAX_EDUCATION).cloned().collect(),
        }
    }

    pub fn summary(&self) -> String {
        let expertise = if self.skills.is_empty() {
            "diverse technologies".to_string()
        } else {
            self.skills
                .iter()
                .take(SUMMARY_SKILLS)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!(
            "Results-driven professional with hands-on expertise in {expertise}. \
             Passionate about delivering high-quality, scalable solutions and continuously \
             expanding technical skills. Proven track record of collaborating in fast-paced \
             environments to meet and exceed project goals."
        )
    }

    pub fn render_html(&self) -> Result<String, RenderError> {
        let contact = [self.email.as_deref(), self.phone.as_deref()]
            .into_iter()
            .flatten()
            .map(escape_html)
            .collect::<Vec<_>>()
            .join(" &bull; ");

        let skills_section = if self.skills.is_empty() {
            String::new()
        } else {
            let list = self
                .skills
                .iter()
                .map(|s| escape_html(s))
                .collect::<Vec<_>>()
                .join(" &nbsp;&bull;&nbsp; ");
            format!("  <h2>Skills</h2>\n  <p>{list}</p>")
        };

        let experience = self
            .experience
            .iter()
            .map(|e| {
                let mut block = format!("  <p class=\"role\">{}</p>", escape_html(&e.title));
                if !e.description.is_empty() {
                    block.push_str(&format!(
                        "\n  <p class=\"role-detail\">&bull; {}</p>",
                        escape_html(&e.description)
                    ));
                }
                block
            })
            .collect::<Vec<_>>()
            .join("\n");

        let education_section = if self.education.is_empty() {
            String::new()
        } else {
            let lines = self
                .education
                .iter()
                .map(|e| format!("  <p>{}</p>", escape_html(e)))
                .collect::<Vec<_>>()
                .join("\n");
            format!("  <h2>Education</h2>\n{lines}")
        };

        render_template(
            RESUME_TEMPLATE,
            &[
                ("name", escape_html(&self.name)),
                ("contact", contact),
                ("summary", escape_html(&self.summary())),
                ("skills_section", skills_section),
                ("experience", experience),
                ("education_section", education_section),
            ],
        )
    }
}
