//! Command-line interface for the request logger demo host.
//!
//! # Commands
//!
//! - `serve`: Run an HTTP server whose every request is logged
//!
//! # Example
//!
//! ```bash
//! # Listen on the configured address (SERVER_HOST / SERVER_PORT)
//! http-request-logger serve
//!
//! # Override the port
//! http-request-logger serve --port 9000
//! ```

use crate::api::server::run_server;
use crate::config::Config;
use crate::error::LoggerResult;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::net::IpAddr;
use tracing::info;

/// Request/response logging demo host
#[derive(Parser, Debug)]
#[command(name = "http-request-logger")]
#[command(about = "Logs every HTTP request/response pair with timing", long_about = None)]
#[command(version)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve HTTP with request logging enabled
    Serve {
        /// Bind address (overrides SERVER_HOST)
        #[arg(long)]
        host: Option<IpAddr>,

        /// Bind port (overrides SERVER_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Parse CLI arguments and execute the appropriate command.
///
/// `config` is the environment configuration; command-line flags override it.
///
/// # Errors
///
/// Returns an error if the server cannot bind or stops with an error.
pub async fn run(config: Config) -> LoggerResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => run_serve_command(config, host, port).await,
    }
}

/// Execute the serve command.
async fn run_serve_command(
    config: Config,
    host: Option<IpAddr>,
    port: Option<u16>,
) -> LoggerResult<()> {
    let config = apply_overrides(config, host, port);

    info!(addr = %config.bind_addr(), "Starting request logger host");
    println!(
        "{} {}",
        "Logging requests on".cyan().bold(),
        format!("http://{}", config.bind_addr()).green()
    );

    run_server(&config).await?;

    println!("{}", "Shutdown complete".green().bold());
    Ok(())
}

fn apply_overrides(config: Config, host: Option<IpAddr>, port: Option<u16>) -> Config {
    let config = match host {
        Some(host) => config.with_host(host),
        None => config,
    };
    match port {
        Some(port) => config.with_port(port),
        None => config,
    }
}
