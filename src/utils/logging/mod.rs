//! Logging utilities
//!
//! Subscriber installation for the process. Code elsewhere only uses the
//! `tracing` macros.

#[allow(clippy::module_inception)]
pub mod logging;

pub use logging::{LogGuard, env_filter, init_logging};
