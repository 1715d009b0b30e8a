//! Response Policy - Chooses the single reply for a turn.
//!
//! Precedence, evaluated top to bottom:
//!
//! 1. A distressed mood keyword (`angry`, `unhappy`) gets a pointer to the
//!    support center.
//! 2. A content mood keyword (`alright`, `happy`, `love`) gets a smile.
//! 3. No knowledge-base answer gets a fixed "not found" message.
//! 4. An answer with sentiment below [`MOOD_CHECK_THRESHOLD`] gets a mood
//!    check with one button per [`Mood`].
//! 5. Anything else gets the plain answer.
//!
//! Steps 1-2 only look at the utterance, so [`ResponsePolicy::short_circuit`]
//! lets callers skip the outbound service calls entirely.

use serde::Serialize;
use std::fmt;

use super::answer::AnswerCandidate;
use super::mood::Mood;
use super::response_action::{CardAction, ResponseAction};
use crate::domain::foundation::{SentimentScore, Utterance};

/// Sentiment strictly below this triggers the mood check.
pub const MOOD_CHECK_THRESHOLD: f64 = 0.5;

/// Reply to a distressed mood.
pub const SYMPATHY_MESSAGE: &str = "\n\nSorry to see you are stressed 🙁. We recommend you contact our service center for counseling. Contact us";

/// Title of the support-center button.
pub const SUPPORT_CENTER_TITLE: &str = "contact our support center";

/// Where the support-center button leads.
pub const SUPPORT_CENTER_URL: &str = "http://www.ltas.co.za/contact/";

/// Reply to a content mood.
pub const CONTENT_MOOD_REPLY: &str = "😃";

/// Reply when the knowledge base has nothing.
pub const NO_ANSWER_MESSAGE: &str = "No QnA Maker answers were found.";

/// Appended to the answer when asking how the user feels.
pub const MOOD_CHECK_PROMPT: &str = "how do you feel?";

/// Which rule produced the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseBranch {
    DistressedMood,
    ContentMood,
    NoAnswer,
    MoodCheck,
    Answer,
}

impl ResponseBranch {
    /// Returns the branch name used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseBranch::DistressedMood => "distressed_mood",
            ResponseBranch::ContentMood => "content_mood",
            ResponseBranch::NoAnswer => "no_answer",
            ResponseBranch::MoodCheck => "mood_check",
            ResponseBranch::Answer => "answer",
        }
    }
}

impl fmt::Display for ResponseBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reply together with the rule that chose it.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyDecision {
    pub branch: ResponseBranch,
    pub action: ResponseAction,
}

impl PolicyDecision {
    fn new(branch: ResponseBranch, action: ResponseAction) -> Self {
        Self { branch, action }
    }
}

/// Stateless reply selection.
pub struct ResponsePolicy;

impl ResponsePolicy {
    /// Applies the keyword rules only.
    ///
    /// Returns `None` when the utterance is not a mood keyword and the
    /// services have to be consulted.
    pub fn short_circuit(utterance: &Utterance) -> Option<PolicyDecision> {
        let mood = Mood::from_utterance(utterance.as_str())?;
        let decision = if mood.is_distressed() {
            PolicyDecision::new(ResponseBranch::DistressedMood, Self::sympathy())
        } else {
            PolicyDecision::new(
                ResponseBranch::ContentMood,
                ResponseAction::text(CONTENT_MOOD_REPLY),
            )
        };
        Some(decision)
    }

    /// Applies the full precedence.
    ///
    /// A missing sentiment score is treated as non-negative: the user gets
    /// the plain answer rather than a mood check nobody asked for.
    pub fn decide(
        utterance: &Utterance,
        top_answer: Option<&AnswerCandidate>,
        sentiment: Option<SentimentScore>,
    ) -> PolicyDecision {
        if let Some(decision) = Self::short_circuit(utterance) {
            return decision;
        }

        let Some(top) = top_answer else {
            return PolicyDecision::new(
                ResponseBranch::NoAnswer,
                ResponseAction::text(NO_ANSWER_MESSAGE),
            );
        };

        match sentiment {
            Some(score) if Self::needs_mood_check(score) => PolicyDecision::new(
                ResponseBranch::MoodCheck,
                Self::mood_check(&top.answer),
            ),
            _ => PolicyDecision::new(ResponseBranch::Answer, ResponseAction::text(&top.answer)),
        }
    }

    /// True when the score is low enough to ask how the user feels.
    pub fn needs_mood_check(score: SentimentScore) -> bool {
        score.value() < MOOD_CHECK_THRESHOLD
    }

    fn sympathy() -> ResponseAction {
        ResponseAction::suggested(
            SYMPATHY_MESSAGE,
            vec![CardAction::open_url(SUPPORT_CENTER_TITLE, SUPPORT_CENTER_URL)],
        )
    }

    fn mood_check(answer: &str) -> ResponseAction {
        let actions = Mood::ALL
            .into_iter()
            .map(|mood| CardAction::im_back(mood.label(), mood.utterance()))
            .collect();
        ResponseAction::suggested(format!("{}\n{}", answer, MOOD_CHECK_PROMPT), actions)
    }
}
