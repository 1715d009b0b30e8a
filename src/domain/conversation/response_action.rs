//! What the bot sends back for a turn.

use serde::{Deserialize, Serialize};

/// How a client handles a clicked card action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionType {
    /// Post the value back to the bot as if the user typed it.
    ImBack,
    /// Open the value as a URL.
    OpenUrl,
}

/// A quick-reply button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardAction {
    pub title: String,
    pub action_type: ActionType,
    pub value: String,
}

impl CardAction {
    /// Creates a button that re-submits `value` as the next utterance.
    pub fn im_back(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            action_type: ActionType::ImBack,
            value: value.into(),
        }
    }

    /// Creates a button that opens `url`.
    pub fn open_url(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            action_type: ActionType::OpenUrl,
            value: url.into(),
        }
    }
}

/// The single reply produced by one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseAction {
    /// A plain text message.
    PlainText(String),
    /// Text with quick-reply buttons underneath.
    SuggestedActions {
        text: String,
        actions: Vec<CardAction>,
    },
}

impl ResponseAction {
    /// Creates a plain text reply.
    pub fn text(text: impl Into<String>) -> Self {
        ResponseAction::PlainText(text.into())
    }

    /// Creates a reply with suggested actions.
    pub fn suggested(text: impl Into<String>, actions: Vec<CardAction>) -> Self {
        ResponseAction::SuggestedActions {
            text: text.into(),
            actions,
        }
    }

    /// Message text, regardless of variant.
    pub fn message_text(&self) -> &str {
        match self {
            ResponseAction::PlainText(text) => text,
            ResponseAction::SuggestedActions { text, .. } => text,
        }
    }

    /// Buttons attached to the reply; empty for plain text.
    pub fn actions(&self) -> &[CardAction] {
        match self {
            ResponseAction::PlainText(_) => &[],
            ResponseAction::SuggestedActions { actions, .. } => actions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_has_no_actions() {
        let reply = ResponseAction::text("hello");
        assert_eq!(reply.message_text(), "hello");
        assert!(reply.actions().is_empty());
    }

    #[test]
    fn suggested_actions_expose_buttons() {
        let reply = ResponseAction::suggested(
            "pick one",
            vec![CardAction::im_back("Yes", "yes"), CardAction::open_url("Docs", "https://example.com")],
        );
        assert_eq!(reply.message_text(), "pick one");
        assert_eq!(reply.actions().len(), 2);
        assert_eq!(reply.actions()[0].action_type, ActionType::ImBack);
        assert_eq!(reply.actions()[1].action_type, ActionType::OpenUrl);
    }

    #[test]
    fn action_type_serializes_camel_case() {
        assert_eq!(serde_json::to_string(&ActionType::ImBack).unwrap(), "\"imBack\"");
        assert_eq!(serde_json::to_string(&ActionType::OpenUrl).unwrap(), "\"openUrl\"");
    }
}
