//! Message types for OpenAI-compatible API
//!
//! This module defines chat messages, roles and content parts, and how a
//! message collapses into the single text block the upstream accepts.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sentinel sent upstream in place of a message with no usable text
pub const EMPTY_MESSAGE_PLACEHOLDER: &str = "[Empty message]";

/// Chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role
    pub role: MessageRole,
    /// Message content
    pub content: MessageContent,
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System message role
    System,
    /// User message role
    User,
    /// Assistant message role
    Assistant,
}

/// Message content (can be string or array of content parts)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text content
    Text(String),
    /// Multi-part content
    Parts(Vec<ContentPart>),
}

/// Content part of a multi-part message.
///
/// Only `text` and `content` are read; any other fields are carried along
/// untouched so the part serializes back the way it arrived.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentPart {
    /// Part type tag
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub part_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentPart {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self {
            part_type: Some("text".to_string()),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// First non-empty of `text` and `content`
    fn value(&self) -> Option<&str> {
        [self.text.as_deref(), self.content.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
    }
}

impl MessageContent {
    /// Join the text of every non-empty part with newlines
    pub fn flatten(&self) -> String {
        match self {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Parts(parts) => parts
                .iter()
                .filter_map(ContentPart::value)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: MessageContent::Text(content.into()),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Text sent upstream for this message, never blank
    pub fn upstream_text(&self) -> String {
        let text = self.content.flatten();
        if text.trim().is_empty() {
            EMPTY_MESSAGE_PLACEHOLDER.to_string()
        } else {
            text
        }
    }
}
