//! Text normalization: turns free text into comparable lowercase tokens.
//!
//! Separators are whitespace and every non-alphanumeric character except `+`, `#`
//! and `.`, which carry meaning inside skill names (`c++`, `c#`, `node.js`, `.net`).

/// Characters kept inside tokens even though they are not alphanumeric.
const TOKEN_PUNCTUATION: &[char] = &['+', '#', '.'];

/// Normalizes raw text into a token sequence. Never fails; empty input yields
/// an empty sequence. Re-normalizing the space-joined output is a no-op.
pub fn normalize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || TOKEN_PUNCTUATION.contains(&c)))
        .filter_map(clean_token)
        .collect()
}

fn clean_token(raw: &str) -> Option<String> {
    // Sentence punctuation: "python." / "docker..."
    let trimmed = raw.trim_end_matches('.');

    let body = trimmed.trim_start_matches('.');
    if body.is_empty() {
        return None;
    }

    let had_leading_dot = body.len() != trimmed.len();
    let starts_alnum = body.chars().next().is_some_and(char::is_alphanumeric);

    if had_leading_dot && starts_alnum {
        Some(format!(".{body}"))
    } else {
        Some(body.to_string())
    }
}
