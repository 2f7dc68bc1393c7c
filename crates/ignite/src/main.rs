//! `ignite` - build, parse and update IGNITE envelopes from the shell.
//!
//! Agents exchange envelopes as files; this tool is the shell-facing side
//! of the `ignite-mime` codec.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod commands;
mod error;
mod files;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ignite_mime::{DEFAULT_DOMAIN, DEFAULT_HEADER_PREFIX, EnvelopeConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{BuildArgs, UpdateStatusArgs};

/// IGNITE envelope tool
#[derive(Parser)]
#[command(name = "ignite")]
#[command(about = "Build, parse and update IGNITE MIME envelopes", long_about = None)]
#[command(version)]
struct Cli {
    /// Reserved prefix of agent-specific headers
    #[arg(long, global = true, env = "IGNITE_HEADER_PREFIX", default_value = DEFAULT_HEADER_PREFIX)]
    prefix: String,

    /// Domain used in generated Message-IDs
    #[arg(long, global = true, env = "IGNITE_DOMAIN", default_value = DEFAULT_DOMAIN)]
    domain: String,

    /// Log debug output to standard error
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Build an envelope
    Build(BuildArgs),

    /// Print an envelope as JSON
    Parse {
        /// Envelope file (`-` for standard input)
        file: PathBuf,
    },

    /// Print only the body of an envelope
    ExtractBody {
        /// Envelope file (`-` for standard input)
        file: PathBuf,
    },

    /// Add or replace the status header
    UpdateStatus(UpdateStatusArgs),

    /// Add or replace any header
    UpdateHeader {
        /// Envelope file, rewritten in place
        #[arg(value_parser = commands::parse_rewrite_path)]
        file: PathBuf,
        /// Header name
        header: String,
        /// Header value
        value: String,
    },

    /// Remove every occurrence of a header
    RemoveHeader {
        /// Envelope file, rewritten in place
        #[arg(value_parser = commands::parse_rewrite_path)]
        file: PathBuf,
        /// Header name
        header: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Standard output carries envelopes and JSON, so logs go to stderr.
    let default_filter = if cli.verbose {
        "ignite=debug,ignite_mime=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = EnvelopeConfig::new()
        .with_header_prefix(cli.prefix)
        .with_domain(cli.domain);

    match cli.command {
        Commands::Build(args) => commands::build(args, &config)?,
        Commands::Parse { file } => commands::parse(&file, &config)?,
        Commands::ExtractBody { file } => commands::extract_body_of(&file)?,
        Commands::UpdateStatus(args) => commands::update_status(args, &config)?,
        Commands::UpdateHeader {
            file,
            header,
            value,
        } => commands::update_header(&file, &header, &value)?,
        Commands::RemoveHeader { file, header } => commands::remove_header_from(&file, &header)?,
    }

    Ok(())
}
