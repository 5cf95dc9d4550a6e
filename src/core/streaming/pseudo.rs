//! Pseudo-streaming
//!
//! Gemini is called once and synchronously; a streaming client is then fed
//! the complete answer as two chunks followed by `[DONE]`.

use bytes::Bytes;

use super::types::{DONE_MARKER, Event};
use crate::core::models::openai::{ChatCompletionChunk, ChatCompletionResponse};
use crate::utils::error::GatewayError;

/// Where the stream is after the upstream call has completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    EmittingContent,
    EmittingFinal,
    EmittingDone,
    Closed,
}

/// SSE frames for one finished chat completion
#[derive(Debug)]
pub struct PseudoStream {
    response: ChatCompletionResponse,
    state: StreamState,
}

impl PseudoStream {
    pub fn new(response: ChatCompletionResponse) -> Self {
        Self {
            response,
            state: StreamState::EmittingContent,
        }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    fn frame(chunk: &ChatCompletionChunk) -> Result<Bytes, GatewayError> {
        let json = serde_json::to_string(chunk)?;
        Ok(Event::new().data(&json).to_bytes())
    }
}

impl Iterator for PseudoStream {
    type Item = Result<Bytes, GatewayError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (frame, next) = match self.state {
            StreamState::EmittingContent => (
                Self::frame(&ChatCompletionChunk::content(&self.response)),
                StreamState::EmittingFinal,
            ),
            StreamState::EmittingFinal => (
                Self::frame(&ChatCompletionChunk::finish(&self.response)),
                StreamState::EmittingDone,
            ),
            StreamState::EmittingDone => (
                Ok(Event::new().data(DONE_MARKER).to_bytes()),
                StreamState::Closed,
            ),
            StreamState::Closed => return None,
        };
        // A frame that failed to encode ends the stream
        self.state = if frame.is_ok() { next } else { StreamState::Closed };
        Some(frame)
    }
}
