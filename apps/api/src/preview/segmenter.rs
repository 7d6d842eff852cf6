//! Text segmenter. Splits free-text fields into bullet and tag lists.
//!
//! One pass over the text: split on any delimiter in the set, trim each piece,
//! drop the empty ones. Pieces are never re-split or merged afterwards.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    Newline,
    Bullet,
    Comma,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Newline => '\n',
            Delimiter::Bullet => '•',
            Delimiter::Comma => ',',
        }
    }
}

/// Achievements are one per line, optionally bullet-prefixed.
pub const ACHIEVEMENT_DELIMITERS: &[Delimiter] = &[Delimiter::Newline, Delimiter::Bullet];

/// Skills may additionally be comma-separated.
pub const SKILL_DELIMITERS: &[Delimiter] =
    &[Delimiter::Comma, Delimiter::Newline, Delimiter::Bullet];

pub fn segment(text: &str, delimiters: &[Delimiter]) -> Vec<String> {
    text.split(|c: char| delimiters.iter().any(|d| d.as_char() == c))
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_yields_nothing() {
        assert!(segment("", ACHIEVEMENT_DELIMITERS).is_empty());
        assert!(segment("", SKILL_DELIMITERS).is_empty());
        assert!(segment("", &[]).is_empty());
    }

    #[test]
    fn test_only_delimiters_and_whitespace_yields_nothing() {
        assert!(segment("  \n • \n ", ACHIEVEMENT_DELIMITERS).is_empty());
    }

    #[test]
    fn test_achievements_split_on_newline_and_bullet() {
        assert_eq!(
            segment("A\n B \n•C", ACHIEVEMENT_DELIMITERS),
            vec!["A", "B", "C"]
        );
    }

    #[test]
    fn test_skills_split_on_comma() {
        assert_eq!(segment("a, b ,c", SKILL_DELIMITERS), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_commas_survive_when_not_a_delimiter() {
        assert_eq!(
            segment("Cut costs by $1,200\nShipped v2, v3", ACHIEVEMENT_DELIMITERS),
            vec!["Cut costs by $1,200", "Shipped v2, v3"]
        );
    }

    #[test]
    fn test_crlf_line_endings_are_trimmed() {
        assert_eq!(
            segment("Rust\r\nGo\r\n", SKILL_DELIMITERS),
            vec!["Rust", "Go"]
        );
    }

    #[test]
    fn test_mixed_skill_delimiters_preserve_order() {
        assert_eq!(
            segment("• Rust\n• SQL, Kubernetes •Terraform", SKILL_DELIMITERS),
            vec!["Rust", "SQL", "Kubernetes", "Terraform"]
        );
    }

    #[test]
    fn test_no_delimiters_returns_trimmed_whole() {
        assert_eq!(segment("  one, two  ", &[]), vec!["one, two"]);
    }
}
