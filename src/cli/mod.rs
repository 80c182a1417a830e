//! CLI module for the semantic query cache
//!
//! Provides subcommands:
//! - `serve`: HTTP API server
//! - `ask`: answer a single query and print it

pub mod ask;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Semantic Query Cache - web search answers with a semantic cache in front
#[derive(Parser)]
#[command(name = "semantic-query-cache")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Answer one query and print the result
    Ask(ask::AskArgs),
}

/// Load configuration and install the log subscriber
pub(crate) fn load_config() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&logging::LoggingConfig {
        level: config.logging.level.clone(),
        format: config.logging.format.clone(),
    });

    Ok(config)
}
