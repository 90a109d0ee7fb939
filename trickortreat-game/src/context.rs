//! Player context derived from the intro form.
use serde::{Deserialize, Serialize};

use crate::constants::{LIKE_FALLBACK, MAX_LIKES, NAME_FALLBACK};

/// Ephemeral view of the player's input, rebuilt whenever name or likes change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlayContext {
    /// Trimmed name, `None` when blank.
    pub name: Option<String>,
    /// Up to three liked items, in input order.
    pub likes: Vec<String>,
    /// First like, or the generic fallback when nothing was entered.
    pub like_fallback: String,
}

impl PlayContext {
    #[must_use]
    pub fn new(raw_name: &str, likes: &[String]) -> Self {
        let trimmed = raw_name.trim();
        let likes: Vec<String> = likes.iter().take(MAX_LIKES).cloned().collect();
        let like_fallback = likes
            .first()
            .cloned()
            .unwrap_or_else(|| LIKE_FALLBACK.to_string());
        Self {
            name: (!trimmed.is_empty()).then(|| trimmed.to_string()),
            likes,
            like_fallback,
        }
    }

    /// Name as it appears inside messages.
    #[must_use]
    pub fn display_name(&self) -> String {
        format_name(self.name.as_deref())
    }

    #[must_use]
    pub fn has_likes(&self) -> bool {
        !self.likes.is_empty()
    }
}

/// Trim a raw name, substituting the friendly fallback when nothing is left.
#[must_use]
pub fn format_name(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => NAME_FALLBACK.to_string(),
    }
}

/// Parse the comma separated likes field: trimmed, empties dropped, first three kept.
#[must_use]
pub fn extract_likes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .take(MAX_LIKES)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_likes_trims_drops_and_caps() {
        assert_eq!(
            extract_likes("mèo, , cà phê ,sách,extra"),
            vec!["mèo", "cà phê", "sách"]
        );
        assert!(extract_likes(" , ,").is_empty());
        assert!(extract_likes("").is_empty());
    }

    #[test]
    fn whitespace_name_uses_fallback() {
        assert_eq!(format_name(Some("   ")), "bạn");
        assert_eq!(format_name(None), "bạn");
        assert_eq!(format_name(Some("  Ánh ")), "Ánh");
    }

    #[test]
    fn context_uses_first_like_as_fallback() {
        let ctx = PlayContext::new("  ", &["trà".to_string(), "mèo".to_string()]);
        assert_eq!(ctx.name, None);
        assert_eq!(ctx.like_fallback, "trà");
        assert_eq!(ctx.display_name(), "bạn");

        let empty = PlayContext::new("Linh", &[]);
        assert_eq!(empty.like_fallback, "niềm vui pixel");
        assert!(!empty.has_likes());
    }
}
