//! Server-Sent Events framing for chat completions

pub mod pseudo;
pub mod types;

pub use pseudo::{PseudoStream, StreamState};
pub use types::{DONE_MARKER, Event};
