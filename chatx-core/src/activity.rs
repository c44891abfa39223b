//! Chat activity envelope and adaptive-card attachment types.
//!
//! An [`Activity`] is the message envelope exchanged with a bot-framework
//! channel: a type tag, optional text body, and optional card attachments.

use serde::{Deserialize, Serialize};

/// Content type of an adaptive-card attachment.
pub const ADAPTIVE_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";

/// A chat message envelope (type, text, attachments).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "type")]
    pub activity_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl Activity {
    /// Text-only message activity.
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            activity_type: "message".to_string(),
            text: Some(text.into()),
            attachments: Vec::new(),
        }
    }

    /// Message activity carrying a single adaptive card, no text body.
    pub fn with_card(card: AdaptiveCard) -> Self {
        Self {
            activity_type: "message".to_string(),
            text: None,
            attachments: vec![Attachment::adaptive_card(card)],
        }
    }
}

/// A rendered attachment on an activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub content_type: String,
    pub content: AdaptiveCard,
}

impl Attachment {
    /// Wraps a card with the adaptive-card content type.
    pub fn adaptive_card(card: AdaptiveCard) -> Self {
        Self {
            content_type: ADAPTIVE_CARD_CONTENT_TYPE.to_string(),
            content: card,
        }
    }
}

/// Minimal adaptive card: a vertical list of text blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptiveCard {
    #[serde(rename = "type")]
    pub card_type: String,
    #[serde(rename = "$schema")]
    pub schema: String,
    pub version: String,
    pub body: Vec<TextBlock>,
}

impl AdaptiveCard {
    /// Card with the given body blocks.
    pub fn new(body: Vec<TextBlock>) -> Self {
        Self {
            card_type: "AdaptiveCard".to_string(),
            schema: "http://adaptivecards.io/schemas/adaptive-card.json".to_string(),
            version: "1.5".to_string(),
            body,
        }
    }
}

/// A text block in an adaptive card body. Text supports markdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: String,
    pub wrap: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl TextBlock {
    /// Plain wrapped text block.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            block_type: "TextBlock".to_string(),
            text: text.into(),
            wrap: true,
            weight: None,
            size: None,
        }
    }

    /// Bolder, medium-sized heading block.
    pub fn heading(text: impl Into<String>) -> Self {
        Self {
            weight: Some("Bolder".to_string()),
            size: Some("Medium".to_string()),
            ..Self::new(text)
        }
    }
}
