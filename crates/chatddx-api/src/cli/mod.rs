//! CLI command definitions for the `chatddx` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod check;
pub mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// ChatDDX web client: server-rendered pages and the chat relay.
#[derive(Parser)]
#[command(name = "chatddx", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config.toml (defaults to $CHATDDX_CONFIG, then the user config dir).
    #[arg(long, global = true, env = "CHATDDX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Backend base URL (overrides config and $CHATDDX_API_SSR).
        #[arg(long)]
        api_ssr: Option<String>,

        /// Export tracing spans through OpenTelemetry (stdout exporter).
        #[arg(long)]
        otel: bool,
    },

    /// Probe the backend: authentication and CMS content.
    Check {
        /// Session key to probe with (the `sessionid` cookie value).
        #[arg(long)]
        session: Option<String>,

        /// Language to request the CMS content in.
        #[arg(long)]
        lang: Option<String>,
    },

    /// Print the effective configuration.
    Config,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

impl Cli {
    /// Default log filter for the chosen verbosity when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn,chatddx=info,chatddx_api=info",
            1 => "info,chatddx_api=debug,chatddx_core=debug,chatddx_infra=debug",
            _ => "trace",
        }
    }
}
