// crates/formpipe-cli/src/main.rs
// ============================================================================
// Module: Formpipe CLI Entry Point
// Description: Command dispatcher for offline submission processing.
// Purpose: Process submissions against form definitions from the shell.
// Dependencies: clap, formpipe-core, formpipe-config, serde, serde_json, time
// ============================================================================

//! ## Overview
//! The Formpipe CLI processes a raw submission against a form definition and
//! reports the outcome through the exit code: success, processing failure,
//! conflict, or field validation failure each map to a distinct code so
//! wrappers can branch without parsing output. Inputs are untrusted files
//! and are read under hard size limits.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use formpipe_config::FormpipeConfig;
use formpipe_core::FormDefinition;
use formpipe_core::ProcessingContext;
use formpipe_core::RawResponse;
use formpipe_core::SubmissionError;
use formpipe_core::process_submission;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;
use time::Date;
use time::Month;
use time::OffsetDateTime;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted size of a form or responses file in bytes.
const MAX_INPUT_BYTES: usize = 4 * 1024 * 1024;
/// Exit code for structural processing failures.
const EXIT_PROCESSING: u8 = 2;
/// Exit code for form-state conflicts.
const EXIT_CONFLICT: u8 = 3;
/// Exit code for per-field validation failures.
const EXIT_FIELD_VALIDATION: u8 = 4;

// ============================================================================
// SECTION: CLI Definition
// ============================================================================

/// Formpipe command-line interface.
#[derive(Debug, Parser)]
#[command(name = "formpipe", disable_help_subcommand = true)]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Process a submission against a form definition.
    Process(ProcessArgs),
    /// Summarize a form definition.
    Inspect(InspectArgs),
}

/// Arguments for `formpipe process`.
#[derive(Debug, Args)]
struct ProcessArgs {
    /// Path to the form definition JSON file.
    #[arg(long)]
    form: PathBuf,
    /// Path to the raw responses JSON file.
    #[arg(long)]
    responses: PathBuf,
    /// Optional path to the formpipe.toml configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Processing day as `YYYY-MM-DD`; defaults to the current UTC day.
    #[arg(long)]
    today: Option<String>,
    /// Processing instant as unix seconds; defaults to the system clock.
    #[arg(long)]
    now: Option<i64>,
}

/// Arguments for `formpipe inspect`.
#[derive(Debug, Args)]
struct InspectArgs {
    /// Path to the form definition JSON file.
    #[arg(long)]
    form: PathBuf,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Process(args) => run_process(&args),
        Commands::Inspect(args) => run_inspect(&args),
    }
}

// ============================================================================
// SECTION: Process Command
// ============================================================================

/// Processes a submission and reports the outcome through the exit code.
fn run_process(args: &ProcessArgs) -> CliResult<ExitCode> {
    let config = FormpipeConfig::load(args.config.as_deref())
        .map_err(|err| CliError::new(err.to_string()))?;

    let form: FormDefinition = read_json_file(&args.form)?;
    let responses: Vec<RawResponse> = read_json_file(&args.responses)?;

    let now_unix = match args.now {
        Some(now) => now,
        None => system_now_unix()?,
    };
    let today = match &args.today {
        Some(text) => parse_iso_date(text)
            .ok_or_else(|| CliError::new(format!("invalid --today date: {text}")))?,
        None => OffsetDateTime::from_unix_timestamp(now_unix)
            .map_err(|err| CliError::new(format!("invalid processing instant: {err}")))?
            .date(),
    };

    let mut ctx =
        ProcessingContext::new(today, now_unix).with_limits(config.pipeline_limits());
    if let Some(params) =
        config.verification_params().map_err(|err| CliError::new(err.to_string()))?
    {
        ctx = ctx.with_verification(params);
    }

    match process_submission(&form, responses, &ctx) {
        Ok(processed) => {
            let rendered = serde_json::to_string_pretty(&processed)
                .map_err(|err| CliError::new(format!("failed to render output: {err}")))?;
            write_stdout_line(&rendered)
                .map_err(|err| CliError::new(format!("stdout write failed: {err}")))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let failure = json!({
                "error": failure_kind(&err),
                "message": err.to_string(),
            });
            let rendered = serde_json::to_string_pretty(&failure)
                .map_err(|err| CliError::new(format!("failed to render failure: {err}")))?;
            write_stderr_line(&rendered)
                .map_err(|err| CliError::new(format!("stderr write failed: {err}")))?;
            Ok(ExitCode::from(failure_exit_code(&err)))
        }
    }
}

/// Maps a submission failure onto its exit code.
const fn failure_exit_code(err: &SubmissionError) -> u8 {
    match err {
        SubmissionError::Processing(_) => EXIT_PROCESSING,
        SubmissionError::Conflict(_) => EXIT_CONFLICT,
        SubmissionError::FieldValidation(_) => EXIT_FIELD_VALIDATION,
    }
}

/// Stable failure-family name for the CLI error object.
const fn failure_kind(err: &SubmissionError) -> &'static str {
    match err {
        SubmissionError::Processing(_) => "processing",
        SubmissionError::Conflict(_) => "conflict",
        SubmissionError::FieldValidation(_) => "field_validation",
    }
}

// ============================================================================
// SECTION: Inspect Command
// ============================================================================

/// Prints a one-line-per-field summary of a form definition.
fn run_inspect(args: &InspectArgs) -> CliResult<ExitCode> {
    let form: FormDefinition = read_json_file(&args.form)?;

    let mut lines = Vec::with_capacity(form.fields.len() + 2);
    lines.push(format!(
        "form {} ({} fields, {} logic units)",
        form.form_id,
        form.fields.len(),
        form.logic.len(),
    ));
    for field in &form.fields {
        let type_name = serde_json::to_string(&field.field_type)
            .map_err(|err| CliError::new(format!("failed to render field type: {err}")))?;
        let mut markers = String::new();
        if field.required {
            markers.push_str(" required");
        }
        if field.is_verifiable() {
            markers.push_str(" verifiable");
        }
        lines.push(format!(
            "  {} {}{}: {}",
            field.field_id,
            type_name.trim_matches('"'),
            markers,
            field.question(),
        ));
    }

    write_stdout_line(&lines.join("\n"))
        .map_err(|err| CliError::new(format!("stdout write failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Reads and parses a JSON file under the input size limit.
fn read_json_file<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let bytes = fs::read(path)
        .map_err(|err| CliError::new(format!("failed to read {}: {err}", path.display())))?;
    if bytes.len() > MAX_INPUT_BYTES {
        return Err(CliError::new(format!("{} exceeds the input size limit", path.display())));
    }
    serde_json::from_slice(&bytes)
        .map_err(|err| CliError::new(format!("failed to parse {}: {err}", path.display())))
}

/// Parses a strict `YYYY-MM-DD` calendar date.
fn parse_iso_date(value: &str) -> Option<Date> {
    let mut parts = value.split('-');
    let year_part = parts.next()?;
    let month_part = parts.next()?;
    let day_part = parts.next()?;
    if parts.next().is_some()
        || year_part.len() != 4
        || month_part.len() != 2
        || day_part.len() != 2
    {
        return None;
    }
    let year: i32 = year_part.parse().ok()?;
    let month = Month::try_from(month_part.parse::<u8>().ok()?).ok()?;
    let day: u8 = day_part.parse().ok()?;
    Date::from_calendar_date(year, month, day).ok()
}

/// Returns the current system time as unix seconds.
fn system_now_unix() -> CliResult<i64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| CliError::new(format!("system clock before unix epoch: {err}")))?;
    i64::try_from(elapsed.as_secs())
        .map_err(|err| CliError::new(format!("system clock out of range: {err}")))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
