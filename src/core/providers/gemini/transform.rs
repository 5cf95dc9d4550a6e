//! Request transformation
//!
//! Gemini request payloads and their construction from OpenAI requests.
//! All text is sanitized on the way out.

use serde::{Deserialize, Serialize};

use super::models::EMBEDDING_MODEL;
use crate::core::models::openai::{ChatMessage, MessageRole};
use crate::core::sanitize::sanitize_text;

/// Role of a Gemini content block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeminiRole {
    User,
    Model,
}

impl From<MessageRole> for GeminiRole {
    fn from(role: MessageRole) -> Self {
        match role {
            MessageRole::Assistant => GeminiRole::Model,
            // Gemini has no system role
            MessageRole::System | MessageRole::User => GeminiRole::User,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiPart {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<GeminiRole>,
    pub parts: Vec<GeminiPart>,
}

impl GeminiContent {
    /// Single-part content with sanitized text
    pub fn text(role: Option<GeminiRole>, text: &str) -> Self {
        Self {
            role,
            parts: vec![GeminiPart {
                text: sanitize_text(text).into_owned(),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub top_p: f64,
    pub top_k: u32,
}

impl GenerationConfig {
    pub const DEFAULT_TEMPERATURE: f64 = 0.7;
    pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;
    pub const TOP_P: f64 = 0.8;
    pub const TOP_K: u32 = 40;

    pub fn new(temperature: Option<f64>, max_tokens: Option<u32>) -> Self {
        Self {
            temperature: temperature.unwrap_or(Self::DEFAULT_TEMPERATURE),
            max_output_tokens: max_tokens.unwrap_or(Self::DEFAULT_MAX_OUTPUT_TOKENS),
            top_p: Self::TOP_P,
            top_k: Self::TOP_K,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Body of `models/{model}:generateContent`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<GeminiContent>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    pub fn new(contents: Vec<GeminiContent>, generation_config: GenerationConfig) -> Self {
        Self {
            contents,
            generation_config,
        }
    }

    /// Chat history in Gemini form
    pub fn from_messages(
        messages: &[ChatMessage],
        temperature: Option<f64>,
        max_tokens: Option<u32>,
    ) -> Self {
        let contents = messages
            .iter()
            .map(|message| {
                GeminiContent::text(Some(message.role.into()), &message.upstream_text())
            })
            .collect();
        Self::new(contents, GenerationConfig::new(temperature, max_tokens))
    }

    /// Single role-less prompt
    pub fn from_prompt(prompt: &str, temperature: Option<f64>, max_tokens: Option<u32>) -> Self {
        Self::new(
            vec![GeminiContent::text(None, prompt)],
            GenerationConfig::new(temperature, max_tokens),
        )
    }

    /// Same request with every content reduced to its first part
    pub fn degraded(&self) -> Self {
        Self {
            contents: self
                .contents
                .iter()
                .map(|content| GeminiContent {
                    role: content.role,
                    parts: content.parts.iter().take(1).cloned().collect(),
                })
                .collect(),
            generation_config: self.generation_config.clone(),
        }
    }
}

/// Body of `:embedContent`, also one entry of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedContentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub content: GeminiContent,
}

/// Body of `:batchEmbedContents`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEmbedContentsRequest {
    pub requests: Vec<EmbedContentRequest>,
}

impl EmbedContentRequest {
    pub fn single(input: &str) -> Self {
        Self {
            model: None,
            content: GeminiContent::text(None, input),
        }
    }
}

impl BatchEmbedContentsRequest {
    pub fn new(inputs: &[String]) -> Self {
        Self {
            requests: inputs
                .iter()
                .map(|input| EmbedContentRequest {
                    model: Some(format!("models/{}", EMBEDDING_MODEL)),
                    content: GeminiContent::text(None, input),
                })
                .collect(),
        }
    }
}
