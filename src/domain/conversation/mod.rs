//! Conversation module - What the bot says back.
//!
//! Pure types and the response policy. No I/O happens here; the
//! application layer gathers the answer and sentiment and hands them in.

mod answer;
mod mood;
mod policy;
mod response_action;

pub use answer::{top_candidate, AnswerCandidate};
pub use mood::Mood;
pub use policy::{
    PolicyDecision, ResponseBranch, ResponsePolicy, CONTENT_MOOD_REPLY, MOOD_CHECK_PROMPT,
    MOOD_CHECK_THRESHOLD, NO_ANSWER_MESSAGE, SUPPORT_CENTER_TITLE, SUPPORT_CENTER_URL,
    SYMPATHY_MESSAGE,
};
pub use response_action::{ActionType, CardAction, ResponseAction};
