//! HTTP server implementation
//!
//! This module provides the HTTP server and routing functionality.

// Submodules
pub mod middleware;
pub mod routes;

pub mod builder;
#[allow(clippy::module_inception)]
pub mod server;
pub mod state;

pub use builder::{DEFAULT_CONFIG_PATH, ServerBuilder, serve};
pub use server::{HttpServer, create_app};
pub use state::AppState;
