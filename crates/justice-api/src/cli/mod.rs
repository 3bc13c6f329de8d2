//! CLI command definitions for the `justice` binary.

pub mod ingest;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Local legal assistant backend for police officers.
#[derive(Parser)]
#[command(name = "justice", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors. `--json` output is still printed.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    /// Data directory holding config.toml, the document store and model cache.
    #[arg(long, global = true, env = "JUSTICE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output(&self) -> OutputMode {
        OutputMode::from_flags(self.json, self.quiet)
    }
}

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable, console-styled text.
    Styled,
    /// One pretty-printed JSON document on stdout.
    Json,
    /// Nothing on stdout; failures surface as the exit status.
    Quiet,
}

impl OutputMode {
    /// `--json` wins over `--quiet`.
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        match (json, quiet) {
            (true, _) => OutputMode::Json,
            (false, true) => OutputMode::Quiet,
            (false, false) => OutputMode::Styled,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Bind address (defaults to `[server].host` in config.toml).
        #[arg(long)]
        host: Option<String>,

        /// Port (defaults to `[server].port` in config.toml).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Index legal documents into the document store.
    Ingest {
        /// Files or directories to index.
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Drop the existing document table before indexing.
        #[arg(long)]
        rebuild: bool,
    },

    /// Show configuration and document store status.
    Status {
        /// Also send a test request to the LLM endpoint.
        #[arg(long)]
        check: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
