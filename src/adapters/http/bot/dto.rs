//! HTTP DTOs for the bot messaging endpoint.
//!
//! A subset of the Bot Framework activity schema: enough to read the user's
//! text and address a reply back to the same conversation.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::conversation::{ActionType, CardAction, ResponseAction};

/// Activity type carrying user text.
pub const MESSAGE_ACTIVITY: &str = "message";

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A channel participant (user or bot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelAccount {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The conversation an activity belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationAccount {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_group: Option<bool>,
}

/// Inbound activity posted by the channel.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingActivity {
    #[serde(rename = "type")]
    pub activity_type: String,
    pub id: Option<String>,
    pub text: Option<String>,
    pub from: Option<ChannelAccount>,
    pub recipient: Option<ChannelAccount>,
    pub conversation: Option<ConversationAccount>,
    pub channel_id: Option<String>,
    pub service_url: Option<String>,
    pub locale: Option<String>,
}

impl IncomingActivity {
    /// True for activities that carry user text.
    pub fn is_message(&self) -> bool {
        self.activity_type == MESSAGE_ACTIVITY
    }

    /// The user's text; absent text is the empty utterance.
    pub fn utterance_text(&self) -> String {
        self.text.clone().unwrap_or_default()
    }

    /// Conversation id, if the channel sent one.
    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation.as_ref().map(|c| c.id.as_str())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A quick-reply button in activity form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardActionDto {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub title: String,
    pub value: String,
}

impl From<&CardAction> for CardActionDto {
    fn from(action: &CardAction) -> Self {
        Self {
            action_type: action.action_type,
            title: action.title.clone(),
            value: action.value.clone(),
        }
    }
}

/// Buttons shown under a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedActionsDto {
    pub actions: Vec<CardActionDto>,
}

/// Outbound reply activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingActivity {
    #[serde(rename = "type")]
    pub activity_type: String,
    pub id: String,
    pub timestamp: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_actions: Option<SuggestedActionsDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<ChannelAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<ChannelAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation: Option<ConversationAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,
}

impl OutgoingActivity {
    /// Builds a reply to `incoming`, swapping sender and recipient.
    pub fn reply_to(incoming: &IncomingActivity, action: &ResponseAction) -> Self {
        let suggested_actions = match action.actions() {
            [] => None,
            actions => Some(SuggestedActionsDto {
                actions: actions.iter().map(CardActionDto::from).collect(),
            }),
        };

        Self {
            activity_type: MESSAGE_ACTIVITY.to_string(),
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().to_rfc3339(),
            text: action.message_text().to_string(),
            suggested_actions,
            reply_to_id: incoming.id.clone(),
            from: incoming.recipient.clone(),
            recipient: incoming.from.clone(),
            conversation: incoming.conversation.clone(),
            channel_id: incoming.channel_id.clone(),
            service_url: incoming.service_url.clone(),
        }
    }
}

/// Body returned from the messaging endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResponse {
    pub activities: Vec<OutgoingActivity>,
}

/// Health check body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Error body for rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }
}
