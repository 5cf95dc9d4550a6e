//! Token usage estimation
//!
//! The upstream does not report usage in a form that maps onto the OpenAI
//! fields, so counts are approximated at four characters per token. Lengths
//! are measured in Unicode scalar values.

use crate::core::models::openai::{ChatMessage, EmbeddingUsage, MessageContent, Usage};

const CHARS_PER_TOKEN: usize = 4;

/// Character length of a string
pub fn text_len(text: &str) -> usize {
    text.chars().count()
}

/// Measured length of a chat message.
///
/// Multi-part content is measured by its serialized JSON length rather than
/// by its flattened text.
pub fn message_len(message: &ChatMessage) -> usize {
    match &message.content {
        MessageContent::Text(text) => text_len(text),
        MessageContent::Parts(parts) => serde_json::to_string(parts)
            .map(|json| text_len(&json))
            .unwrap_or(0),
    }
}

fn tokens(chars: usize) -> u32 {
    u32::try_from(chars.div_ceil(CHARS_PER_TOKEN)).unwrap_or(u32::MAX)
}

/// Usage for a chat completion
pub fn estimate_chat_usage(messages: &[ChatMessage], generated: &str) -> Usage {
    let prompt_chars: usize = messages.iter().map(message_len).sum();
    usage_from_chars(prompt_chars, text_len(generated))
}

/// Usage for a text completion
pub fn estimate_completion_usage(prompt: &str, generated: &str) -> Usage {
    usage_from_chars(text_len(prompt), text_len(generated))
}

/// Usage for an embedding batch; no completion side
pub fn estimate_embedding_usage(inputs: &[String]) -> EmbeddingUsage {
    let chars: usize = inputs.iter().map(|input| text_len(input)).sum();
    EmbeddingUsage {
        prompt_tokens: tokens(chars),
        total_tokens: tokens(chars),
    }
}

fn usage_from_chars(prompt_chars: usize, generated_chars: usize) -> Usage {
    Usage {
        prompt_tokens: tokens(prompt_chars),
        completion_tokens: tokens(generated_chars),
        total_tokens: tokens(prompt_chars + generated_chars),
    }
}
