//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use crate::config::{Config, CorsConfig, ServerConfig};
use crate::server::middleware::RequestLogging;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use tracing::{info, warn};

/// Index document served from the static directory
pub const STATIC_INDEX: &str = "admin.html";

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

fn build_cors(cors_config: &CorsConfig) -> Cors {
    let mut cors = Cors::default();
    if !cors_config.enabled {
        return cors;
    }

    if cors_config.allows_all_origins() {
        cors = cors.allow_any_origin();
        cors_config.validate().unwrap_or_else(|e| {
            warn!(error = %e, "CORS Configuration Warning");
        });
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors.allow_any_method()
        .allow_any_header()
        .expose_headers(["x-request-id"])
        .max_age(cors_config.max_age)
}

/// Create the Actix-web application
///
/// Shared by [`HttpServer::start`] and the integration tests.
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let server_config = state.config.server().clone();
    let static_dir = server_config.static_dir.clone();

    App::new()
        .app_data(state)
        .app_data(routes::json_config(server_config.max_body_size))
        .app_data(routes::payload_config(server_config.max_body_size))
        .wrap(RequestLogging::new(server_config.max_body_size))
        .wrap(DefaultHeaders::new().add(("Server", "Gemini-Gateway")))
        .wrap(build_cors(&server_config.cors))
        .configure(routes::health::configure_routes)
        .configure(routes::ai::configure_routes)
        .configure(routes::api_keys::configure_routes)
        .configure(|cfg| {
            if let Some(dir) = static_dir {
                cfg.service(Files::new("/", dir).index_file(STATIC_INDEX));
            }
        })
        .default_service(web::to(routes::not_found))
}

fn format_bind_error(error: std::io::Error, bind_addr: &str, port: u16) -> GatewayError {
    if error.kind() == std::io::ErrorKind::AddrInUse {
        GatewayError::server(format!(
            "Port {} is already in use; pick another with --port or PORT",
            port
        ))
    } else {
        GatewayError::server(format!("Failed to bind to {}: {}", bind_addr, error))
    }
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        if config.gemini().api_key().is_none() {
            warn!("GEMINI_API_KEY is not set; gateway requests will fail until it is configured");
        }

        Ok(Self {
            config: config.server().clone(),
            state: AppState::new(config.clone())?,
        })
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let port = self.config.port;

        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);

        let mut server = ActixHttpServer::new(move || create_app(state.clone()));
        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        let server = server
            .bind(&bind_addr)
            .map_err(|e| format_bind_error(e, &bind_addr, port))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| GatewayError::server(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
