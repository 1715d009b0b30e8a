//! Knowledge-base answer candidates.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Confidence;

/// One ranked answer returned by the QnA service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerCandidate {
    /// Answer text as authored in the knowledge base.
    pub answer: String,
    /// How well the answer matched the utterance.
    pub confidence: Confidence,
    /// Knowledge-base questions that matched.
    #[serde(default)]
    pub questions: Vec<String>,
    /// Source document or editorial label.
    pub source: Option<String>,
    /// Knowledge-base entry id.
    pub id: Option<i64>,
}

impl AnswerCandidate {
    /// Creates a candidate with only text and confidence.
    pub fn new(answer: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            answer: answer.into(),
            confidence,
            questions: Vec::new(),
            source: None,
            id: None,
        }
    }

    /// Sets the matched questions.
    pub fn with_questions(mut self, questions: Vec<String>) -> Self {
        self.questions = questions;
        self
    }

    /// Sets the source.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the knowledge-base id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Picks the highest-confidence candidate.
///
/// Services already rank their answers, but ties and unsorted stubs are
/// resolved here so callers never depend on list order. The first of equal
/// candidates wins.
pub fn top_candidate(candidates: Vec<AnswerCandidate>) -> Option<AnswerCandidate> {
    candidates.into_iter().reduce(|best, next| {
        if next.confidence > best.confidence {
            next
        } else {
            best
        }
    })
}
