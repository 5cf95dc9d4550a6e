//! Gemini gateway - OpenAI-compatible front end for the Google Gemini API

#![allow(missing_docs)]

use clap::Parser;
use gemini_gateway::config::Config;
use gemini_gateway::server::{self, DEFAULT_CONFIG_PATH};
use gemini_gateway::utils::logging::init_logging;
use std::process::ExitCode;

/// OpenAI-compatible gateway backed by Google Gemini
#[derive(Debug, Parser)]
#[command(name = "gateway", version, about)]
struct Cli {
    /// YAML configuration file; defaults are used when it does not exist
    #[arg(short, long, env = "GATEWAY_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory served at `/`
    #[arg(long)]
    static_dir: Option<String>,

    /// Log level or `RUST_LOG`-style filter
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn apply(self, mut config: Config) -> Config {
        if let Some(host) = self.host {
            config.gateway.server.host = host;
        }
        if let Some(port) = self.port {
            config.gateway.server.port = port;
        }
        if let Some(dir) = self.static_dir {
            config.gateway.server.static_dir = Some(dir);
        }
        if let Some(level) = self.log_level {
            config.gateway.logging.level = level;
        }
        config
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is normal
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = match Config::load(&cli.config).await {
        Ok(config) => cli.apply(config),
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let _log_guard = init_logging(config.logging());

    match server::serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
