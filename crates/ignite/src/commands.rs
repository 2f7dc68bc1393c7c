//! Subcommand implementations.

use std::path::{Path, PathBuf};

use clap::Args;
use ignite_mime::{
    EnvelopeConfig, EnvelopeFields, SystemStamp, build_envelope_with, extract_body,
    parse_envelope_with, remove_header, set_header, update_status_with,
};

use crate::error::CliResult;
use crate::files::{self, Permissions};

/// Arguments of `build`.
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Sending agent
    #[arg(long = "from")]
    pub from_agent: String,

    /// Receiving agents
    #[arg(long, required = true, num_args = 1..)]
    pub to: Vec<String>,

    /// Carbon-copied agents
    #[arg(long, num_args = 0..)]
    pub cc: Vec<String>,

    /// Message type
    #[arg(long = "type")]
    pub message_type: String,

    /// Message priority
    #[arg(long, default_value = ignite_mime::DEFAULT_PRIORITY)]
    pub priority: String,

    /// Conversation thread identifier
    #[arg(long)]
    pub thread_id: Option<String>,

    /// Message-ID this message replies to
    #[arg(long)]
    pub in_reply_to: Option<String>,

    /// Repository the message concerns
    #[arg(long)]
    pub repo: Option<String>,

    /// Issue the message concerns
    #[arg(long)]
    pub issue: Option<String>,

    /// Initial delivery status
    #[arg(long)]
    pub status: Option<String>,

    /// Body text
    #[arg(long)]
    pub body: Option<String>,

    /// Read the body from a file (`-` for standard input); wins over --body
    #[arg(long)]
    pub body_file: Option<PathBuf>,

    /// Write the envelope to this file instead of standard output
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments of `update-status`.
#[derive(Debug, Args)]
pub struct UpdateStatusArgs {
    /// Envelope file, rewritten in place
    #[arg(value_parser = parse_rewrite_path)]
    pub file: PathBuf,

    /// New status
    pub status: String,

    /// Timestamp recorded in the Processed-At header
    #[arg(long)]
    pub processed_at: Option<String>,

    /// Additional headers as KEY=VALUE
    #[arg(long, num_args = 0.., value_parser = parse_key_value)]
    pub extra: Vec<(String, String)>,
}

/// Splits `KEY=VALUE` on the first `=`; a missing `=` means an empty value.
///
/// # Errors
///
/// Returns an error if the key is empty.
pub fn parse_key_value(pair: &str) -> Result<(String, String), String> {
    let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
    if key.is_empty() {
        return Err(format!("missing header name in {pair:?}"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Parses the path of a file that is rewritten in place.
///
/// # Errors
///
/// Returns an error for `-`, since standard input has nowhere to be
/// written back to.
pub fn parse_rewrite_path(arg: &str) -> Result<PathBuf, String> {
    if arg == files::STDIO {
        return Err("standard input cannot be rewritten in place, pass a file path".to_string());
    }
    Ok(PathBuf::from(arg))
}

/// Builds an envelope and writes it to the output file or standard output.
pub fn build(args: BuildArgs, config: &EnvelopeConfig) -> CliResult<()> {
    let body = match (&args.body_file, args.body) {
        (Some(path), _) => files::read_text(path)?,
        (None, Some(body)) => body,
        (None, None) => String::new(),
    };

    let fields = EnvelopeFields {
        body,
        cc: args.cc,
        priority: args.priority,
        thread_id: args.thread_id,
        in_reply_to: args.in_reply_to,
        repository: args.repo,
        issue: args.issue,
        status: args.status,
        ..EnvelopeFields::new(args.from_agent, args.to, args.message_type)
    };
    let envelope = build_envelope_with(&fields, config, &SystemStamp)?;

    match args.output {
        Some(path) => files::write_atomic(&path, &envelope, Permissions::Private),
        None => files::write_stdout(&envelope),
    }
}

/// Prints an envelope as JSON.
pub fn parse(file: &Path, config: &EnvelopeConfig) -> CliResult<()> {
    let raw = files::read_text(file)?;
    let envelope = parse_envelope_with(&raw, config);

    // Extension keys share the top level with the typed fields.
    let value = serde_json::to_value(&envelope)?;
    let mut json = serde_json::to_string_pretty(&value)?;
    json.push('\n');
    files::write_stdout(&json)
}

/// Prints the body of an envelope.
pub fn extract_body_of(file: &Path) -> CliResult<()> {
    let raw = files::read_text(file)?;
    files::write_stdout(extract_body(&raw))
}

/// Updates the status header, plus Processed-At and any extra headers.
pub fn update_status(args: UpdateStatusArgs, config: &EnvelopeConfig) -> CliResult<()> {
    let raw = files::read_text(&args.file)?;

    let processed_at = args
        .processed_at
        .map(|at| (config.prefixed("Processed-At"), at));
    let extra = processed_at.into_iter().chain(args.extra);

    let updated = update_status_with(&raw, &args.status, extra, config);
    files::write_atomic(&args.file, &updated, Permissions::Preserve)
}

/// Sets one header of an envelope file.
pub fn update_header(file: &Path, header: &str, value: &str) -> CliResult<()> {
    let raw = files::read_text(file)?;
    files::write_atomic(file, &set_header(&raw, header, value), Permissions::Preserve)
}

/// Removes one header from an envelope file.
pub fn remove_header_from(file: &Path, header: &str) -> CliResult<()> {
    let raw = files::read_text(file)?;
    files::write_atomic(file, &remove_header(&raw, header), Permissions::Preserve)
}
