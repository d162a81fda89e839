//! Single-page portfolio site, optionally bundled as a deployable ZIP.

use std::io::{Cursor, Write};

use chrono::{Datelike, NaiveDate};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::analysis::pipeline::AnalysisReport;
use crate::analysis::vocabulary::SkillVocabulary;
use crate::compose::templates::{
    escape_html, render_template, PORTFOLIO_README_TEMPLATE, PORTFOLIO_TEMPLATE,
};
use crate::compose::RenderError;
use crate::ingest::profile::ExperienceEntry;

const MAX_SKILLS: usize = 16;
const MAX_EXPERIENCE: usize = 5;
const MAX_EDUCATION: usize = 4;
const ABOUT_SKILLS: usize = 3;
const DEFAULT_NAME: &str = "Professional";
const DEFAULT_EMAIL: &str = "contact@example.com";
const DEFAULT_SKILLS: &[&str] = &["Software Development", "Problem Solving"];
const DEFAULT_ROLE_DESCRIPTION: &str = "Delivered impactful results in a professional setting.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioPage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<String>,
    pub generated_on: NaiveDate,
}

impl PortfolioPage {
    pub fn from_report(
        report: &AnalysisReport,
        vocabulary: &SkillVocabulary,
        generated_on: NaiveDate,
    ) -> Self {
        let profile = &report.profile;
        let mut skills: Vec<String> = report
            .resume_skills
            .iter()
            .take(MAX_SKILLS)
            .map(|s| vocabulary.display_name(s).to_string())
            .collect();
        if skills.is_empty() {
            skills = DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect();
        }

        Self {
            name: profile
                .name
                .clone()
                .unwrap_or_else(|| DEFAULT_NAME.to_string()),
            email: profile
                .email
                .clone()
                .unwrap_or_else(|| DEFAULT_EMAIL.to_string()),
            phone: profile.phone.clone(),
            skills,
            experience: profile.experience.iter().take(MAX_EXPERIENCE).cloned().collect(),
            education: profile.education.iter().take(MAX_EDUCATION).cloned().collect(),
            generated_on,
        }
    }

    pub fn render_html(&self) -> Result<String, RenderError> {
        let skill_cards = self
            .skills
            .iter()
            .map(|s| {
                let initial = s.chars().next().map(|c| c.to_uppercase().to_string());
                format!(
                    "      <div class=\"skill-card\"><div class=\"skill-icon\">{}</div><span>{}</span></div>",
                    escape_html(&initial.unwrap_or_default()),
                    escape_html(s)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let timeline = self
            .experience
            .iter()
            .map(|e| {
                let description: &str = if e.description.is_empty() {
                    DEFAULT_ROLE_DESCRIPTION
                } else {
                    e.description.as_str()
                };
                format!(
                    "      <div class=\"timeline-item\"><div class=\"timeline-content\"><h3>{}</h3><p>{}</p></div></div>",
                    escape_html(&e.title),
                    escape_html(description)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let education_items = self
            .education
            .iter()
            .map(|e| format!("      <li>{}</li>", escape_html(e)))
            .collect::<Vec<_>>()
            .join("\n");

        let mut contact_items = format!(
            "      <div class=\"contact-item\">Email: <strong>{}</strong></div>",
            escape_html(&self.email)
        );
        if let Some(phone) = &self.phone {
            contact_items.push_str(&format!(
                "\n      <div class=\"contact-item\">Phone: <strong>{}</strong></div>",
                escape_html(phone)
            ));
        }

        let about = format!(
            "Results-driven professional with deep expertise in {}. \
             I thrive on solving complex problems and turning ideas into polished, scalable products.",
            self.skills
                .iter()
                .take(ABOUT_SKILLS)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        );

        render_template(
            PORTFOLIO_TEMPLATE,
            &[
                ("name", escape_html(&self.name)),
                ("about", escape_html(&about)),
                ("skill_count", self.skills.len().to_string()),
                ("role_count", self.experience.len().to_string()),
                ("education_count", self.education.len().to_string()),
                ("skill_cards", skill_cards),
                ("timeline", timeline),
                ("education_items", education_items),
                ("contact_items", contact_items),
                ("year", self.generated_on.year().to_string()),
            ],
        )
    }

    pub fn render_readme(&self) -> Result<String, RenderError> {
        render_template(
            PORTFOLIO_README_TEMPLATE,
            &[
                ("name", self.name.clone()),
                ("date", self.generated_on.format("%Y-%m-%d").to_string()),
            ],
        )
    }

    /// `index.html` plus a deploy `README.md`, deflate-compressed.
    pub fn render_zip(&self) -> Result<Vec<u8>, RenderError> {
        let html = self.render_html()?;
        let readme = self.render_readme()?;

        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for (path, content) in [("index.html", html), ("README.md", readme)] {
            writer
                .start_file(path, options)
                .map_err(archive_err)?;
            writer
                .write_all(content.as_bytes())
                .map_err(archive_err)?;
        }

        let cursor = writer.finish().map_err(archive_err)?;
        Ok(cursor.into_inner())
    }
}

fn archive_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Archive(e.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use uuid::Uuid;

    use super::*;
    use crate::ingest::profile::CandidateProfile;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn report(profile: CandidateProfile, skills: &[&str]) -> AnalysisReport {
        AnalysisReport {
            analysis_id: Uuid::nil(),
            profile,
            resume_skills: skills.iter().copied().collect(),
            ats: None,
            experience_requirements: Vec::new(),
            tips: Vec::new(),
            roadmap: Vec::new(),
            roadmap_markdown: None,
            warnings: Vec::new(),
        }
    }

    fn sample() -> PortfolioPage {
        let profile = CandidateProfile {
            name: Some("Ada Lovelace".into()),
            email: Some("ada@example.com".into()),
            phone: Some("+44 20 7946 0000".into()),
            experience: vec![ExperienceEntry {
                title: "Analyst & Programmer".into(),
                description: String::new(),
            }],
            education: vec!["Self-taught mathematics".into()],
        };
        PortfolioPage::from_report(
            &report(profile, &["python", "rust"]),
            &SkillVocabulary::builtin(),
            today(),
        )
    }

    #[test]
    fn test_defaults_for_sparse_profile() {
        let page = PortfolioPage::from_report(
            &report(CandidateProfile::default(), &[]),
            &SkillVocabulary::builtin(),
            today(),
        );
        assert_eq!(page.name, "Professional");
        assert_eq!(page.email, "contact@example.com");
        assert_eq!(page.skills, ["Software Development", "Problem Solving"]);
    }

    #[test]
    fn test_html_contains_sections() {
        let html = sample().render_html().unwrap();
        assert!(html.contains("Hi, I'm <span>Ada Lovelace</span>"));
        assert!(html.contains("<span>Python</span>"));
        assert!(html.contains("Analyst &amp; Programmer"));
        assert!(html.contains(DEFAULT_ROLE_DESCRIPTION));
        assert!(html.contains("+44 20 7946 0000"));
        assert!(html.contains("&copy; 2025 Ada Lovelace"));
    }

    #[test]
    fn test_zip_bundle_contents() {
        let bytes = sample().render_zip().unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut index = String::new();
        archive
            .by_name("index.html")
            .unwrap()
            .read_to_string(&mut index)
            .unwrap();
        assert!(index.starts_with("<!DOCTYPE html>"));

        let mut readme = String::new();
        archive
            .by_name("README.md")
            .unwrap()
            .read_to_string(&mut readme)
            .unwrap();
        assert!(readme.starts_with("# Ada Lovelace - Portfolio"));
        assert!(readme.contains("2025-03-14"));
    }
}
