//! Moods offered as quick replies after a negative-sounding answer.
//!
//! Each mood's canonical utterance is what its button re-submits, so the
//! next turn can recognise it with [`Mood::from_utterance`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the user says they feel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Angry,
    Unhappy,
    Neutral,
    Happy,
    Love,
}

impl Mood {
    /// All moods in button order.
    pub const ALL: [Mood; 5] = [
        Mood::Angry,
        Mood::Unhappy,
        Mood::Neutral,
        Mood::Happy,
        Mood::Love,
    ];

    /// Emoji shown on the quick-reply button.
    pub fn label(self) -> &'static str {
        match self {
            Mood::Angry => "😡",
            Mood::Unhappy => "🙁",
            Mood::Neutral => "😐",
            Mood::Happy => "😃",
            Mood::Love => "😍",
        }
    }

    /// Text the button sends back as the next utterance.
    pub fn utterance(self) -> &'static str {
        match self {
            Mood::Angry => "angry",
            Mood::Unhappy => "unhappy",
            Mood::Neutral => "alright",
            Mood::Happy => "happy",
            Mood::Love => "love",
        }
    }

    /// Exact, case-sensitive match of an utterance to a mood.
    pub fn from_utterance(text: &str) -> Option<Mood> {
        Self::ALL.into_iter().find(|mood| mood.utterance() == text)
    }

    /// True for moods that get pointed at the support center.
    pub fn is_distressed(self) -> bool {
        matches!(self, Mood::Angry | Mood::Unhappy)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.utterance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_utterance_inverts_utterance_for_every_mood() {
        for mood in Mood::ALL {
            assert_eq!(Mood::from_utterance(mood.utterance()), Some(mood));
        }
    }

    #[test]
    fn from_utterance_is_case_sensitive() {
        assert_eq!(Mood::from_utterance("Angry"), None);
        assert_eq!(Mood::from_utterance("HAPPY"), None);
    }

    #[test]
    fn from_utterance_does_not_trim() {
        assert_eq!(Mood::from_utterance(" love"), None);
        assert_eq!(Mood::from_utterance("love\n"), None);
    }

    #[test]
    fn neutral_mood_round_trips_through_alright() {
        assert_eq!(Mood::Neutral.utterance(), "alright");
        assert_eq!(Mood::from_utterance("alright"), Some(Mood::Neutral));
    }

    #[test]
    fn only_angry_and_unhappy_are_distressed() {
        let distressed: Vec<Mood> = Mood::ALL.into_iter().filter(|m| m.is_distressed()).collect();
        assert_eq!(distressed, vec![Mood::Angry, Mood::Unhappy]);
    }
}
