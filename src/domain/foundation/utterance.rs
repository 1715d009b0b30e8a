//! Utterance value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The raw text a user sent for one turn.
///
/// Kept byte-for-byte as received: keyword matching in the response policy
/// is exact, so no trimming or case folding happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Utterance(String);

impl Utterance {
    /// Wraps the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the user sent no text at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of characters, used for log fields instead of the text itself.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl From<&str> for Utterance {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Utterance {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl AsRef<str> for Utterance {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Utterance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utterance_preserves_text_exactly() {
        let utterance = Utterance::new("  Angry ");
        assert_eq!(utterance.as_str(), "  Angry ");
    }

    #[test]
    fn utterance_counts_characters_not_bytes() {
        assert_eq!(Utterance::new("😃 hi").char_count(), 4);
    }

    #[test]
    fn default_utterance_is_empty() {
        assert!(Utterance::default().is_empty());
    }
}
