//! Candidate profile extraction: contact details and résumé sections from plain text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[\-.\s]?)?(?:\(?\d{2,4}\)?[\-.\s]?)?\d{3,4}[\-.\s]?\d{4}").unwrap()
});
static SECTION_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(experience|education|skills|summary|objective|contact|profile|projects|curriculum|resume)\b",
    )
    .unwrap()
});
static EXPERIENCE_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(work\s*experience|professional\s*experience|employment(\s*history)?|experience\s*&?\s*history)",
    )
    .unwrap()
});
static NEXT_SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*(education|skills|certifications|projects|awards|languages)\b").unwrap()
});
static DEGREE_WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(bachelor|master|doctorate|phd|mba|university|college)").unwrap()
});
// Abbreviations are case-sensitive so "ms" in "50 ms latency" does not count.
static DEGREE_ABBREV_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(B\.?\s?Sc?|M\.?\s?Sc?|B\.?\s?Tech|M\.?\s?Tech|B\.?\s?A|M\.?\s?A|B\.?\s?E|Ph\.?\s?D)\b")
        .unwrap()
});

const MAX_EXPERIENCE_LINES: usize = 10;
const MAX_EXPERIENCE_ENTRIES: usize = 5;
const MAX_EDUCATION_LINES: usize = 4;
const MAX_TITLE_CHARS: usize = 120;
const MIN_DESCRIPTION_CHARS: usize = 20;

/// A single experience item: a title line and an optional description line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub description: String,
}

/// Structured data recovered from a résumé (or a LinkedIn page).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<String>,
}

/// Parses contact details and sections out of résumé text. Never fails.
pub fn parse_profile(text: &str) -> CandidateProfile {
    CandidateProfile {
        name: guess_name(text),
        email: extract_email(text),
        phone: extract_phone(text),
        experience: extract_experience(text),
        education: extract_education(text),
    }
}

/// First short line that looks like a person's name.
pub fn guess_name(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .find(|line| {
            let words = line.split_whitespace().count();
            (2..=4).contains(&words)
                && line.len() > 3
                && !line.contains('@')
                && !line.chars().any(|c| c.is_ascii_digit())
                && !SECTION_HEADER_RE.is_match(line)
        })
        .map(String::from)
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_lowercase())
}

pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().trim().to_string())
}

/// Lines between an experience header and the next section, paired into
/// title/description entries.
pub fn extract_experience(text: &str) -> Vec<ExperienceEntry> {
    let Some(header) = EXPERIENCE_HEADER_RE.find(text) else {
        return Vec::new();
    };

    let rest = &text[header.end()..];
    let chunk = match NEXT_SECTION_RE.find(rest) {
        Some(next) => &rest[..next.start()],
        None => rest,
    };

    let lines: Vec<String> = chunk
        .lines()
        .map(|l| l.trim().trim_start_matches(['•', '-', '*', '·']).trim())
        .filter(|l| l.chars().count() > 8)
        .take(MAX_EXPERIENCE_LINES)
        .map(|l| l.chars().take(MAX_TITLE_CHARS).collect())
        .collect();

    let mut entries = Vec::new();
    let mut i = 0;
    while i < lines.len() && entries.len() < MAX_EXPERIENCE_ENTRIES {
        let title = lines[i].clone();
        let description = lines
            .get(i + 1)
            .filter(|next| next.chars().count() > MIN_DESCRIPTION_CHARS)
            .cloned()
            .unwrap_or_default();
        i += if description.is_empty() { 1 } else { 2 };
        entries.push(ExperienceEntry { title, description });
    }
    entries
}

/// Lines mentioning a degree or institution, deduplicated, in document order.
pub fn extract_education(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for line in text.lines().map(str::trim) {
        let mentions_degree = DEGREE_WORD_RE.is_match(line) || DEGREE_ABBREV_RE.is_match(line);
        if line.is_empty() || line.len() > 160 || !mentions_degree {
            continue;
        }
        if !found.iter().any(|f| f == line) {
            found.push(line.to_string());
        }
        if found.len() >= MAX_EDUCATION_LINES {
            break;
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = r#"
Jane Q Doe
jane.doe@Example.com | +1 415-555-0132
Summary
Backend engineer with a taste for reliable systems.

Work Experience
Senior Engineer, Acme Corp (2021 - Present)
Built event-driven billing pipeline processing 2M invoices per day.
Software Engineer, Globex (2018 - 2021)
Intern
Maintained internal tooling and CI pipelines for 40 engineers.

Education
B.S. Computer Science, State University, 2018
Skills
Python, Go, Docker
"#;

    #[test]
    fn test_parses_contact_details() {
        let profile = parse_profile(RESUME);
        assert_eq!(profile.name.as_deref(), Some("Jane Q Doe"));
        assert_eq!(profile.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(profile.phone.as_deref(), Some("+1 415-555-0132"));
    }

    #[test]
    fn test_name_skips_headers_and_contact_lines() {
        let text = "Professional Summary\njohn@x.io\n+1 555 123 4567\nJohn Smith\n";
        assert_eq!(guess_name(text).as_deref(), Some("John Smith"));
        assert_eq!(guess_name(""), None);
    }

    #[test]
    fn test_experience_pairs_titles_with_descriptions() {
        let entries = extract_experience(RESUME);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Senior Engineer, Acme Corp (2021 - Present)");
        assert!(entries[0].description.starts_with("Built event-driven"));
        assert_eq!(entries[1].title, "Software Engineer, Globex (2018 - 2021)");
        // "Intern" is too short to count as a line, so the next long line pairs up
        assert!(entries[1].description.starts_with("Maintained"));
    }

    #[test]
    fn test_experience_stops_at_next_section() {
        let entries = extract_experience(RESUME);
        assert!(entries.iter().all(|e| !e.title.contains("Python")));
        assert!(entries.iter().all(|e| !e.title.starts_with("B.S.")));
    }

    #[test]
    fn test_no_experience_header_yields_empty() {
        assert!(extract_experience("Just some text about skills").is_empty());
    }

    #[test]
    fn test_education_lines_detected() {
        let education = extract_education(RESUME);
        assert_eq!(education, ["B.S. Computer Science, State University, 2018"]);
    }

    #[test]
    fn test_empty_text_yields_default_profile() {
        assert_eq!(parse_profile(""), CandidateProfile::default());
    }
}
