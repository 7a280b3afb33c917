//! # QRIS CLI Library
//!
//! Everything behind the `qris` binary: argument parsing, configuration,
//! logging setup and the command dispatch. `main.rs` only parses argv and
//! maps the outcome to an exit code.
//!
//! ## Module Organization
//! ```text
//! qris_cli/
//! ├── lib.rs          ◄─── You are here (clap types, dispatch, tracing setup)
//! ├── config.rs       ◄─── QRIS_* environment configuration
//! ├── error.rs        ◄─── CliError + exit status mapping
//! └── commands/
//!     ├── mod.rs      ◄─── stdin handling, size limit, output rendering
//!     ├── convert.rs  ◄─── static → dynamic
//!     ├── inspect.rs  ◄─── decoded view
//!     ├── verify.rs   ◄─── checksum verification
//!     └── checksum.rs ◄─── raw CRC
//! ```
//!
//! ## Streams
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdout ──► command output only (text or one JSON document)            │
//! │             JSON mode also prints CliError here, so scripts can parse   │
//! │             failures                                                    │
//! │                                                                         │
//! │  stderr ──► tracing events + "error: ..." in text mode                 │
//! │                                                                         │
//! │  exit   ──► 0 ok, 1 checksum mismatch, 2 anything else                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;

use std::io::{self, Read, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use commands::Output;
use config::{CliConfig, OutputFormat};
use error::CliError;

// =============================================================================
// Arguments
// =============================================================================

/// Convert, inspect and verify QRIS payment payloads.
#[derive(Debug, Parser)]
#[command(name = "qris", version)]
pub struct Cli {
    /// Output format; defaults to QRIS_OUTPUT_FORMAT, then text
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Turn a static payload into a dynamic one carrying an amount
    Convert {
        /// Amount, e.g. 15000 or 150.50
        #[arg(long)]
        amount: String,

        /// Static payload, or - to read stdin
        payload: String,
    },

    /// List the entries of a payload with their names
    Inspect {
        /// Payload, or - to read stdin
        payload: String,
    },

    /// Check the trailing checksum (exit 1 when wrong)
    Verify {
        /// Payload, or - to read stdin
        payload: String,
    },

    /// Print the CRC-16/CCITT-FALSE of arbitrary text
    Checksum {
        /// Text, or - to read stdin
        text: String,
    },
}

// =============================================================================
// Dispatch
// =============================================================================

/// Runs one command against already loaded configuration.
///
/// `stdin` is only read when an argument is `-`.
pub fn execute(
    command: Command,
    config: &CliConfig,
    stdin: &mut dyn Read,
) -> Result<Output, CliError> {
    match command {
        Command::Convert { amount, payload } => {
            let payload = load_payload(&payload, config, stdin)?;
            commands::convert::run(&payload, &amount).map(Output::Convert)
        }
        Command::Inspect { payload } => {
            let payload = load_payload(&payload, config, stdin)?;
            commands::inspect::run(&payload).map(Output::Inspect)
        }
        Command::Verify { payload } => {
            let payload = load_payload(&payload, config, stdin)?;
            commands::verify::run(&payload).map(Output::Verify)
        }
        Command::Checksum { text } => {
            let text = commands::read_input(&text, stdin)?;
            Ok(Output::Checksum(commands::checksum::run(&text)))
        }
    }
}

fn load_payload(
    arg: &str,
    config: &CliConfig,
    stdin: &mut dyn Read,
) -> Result<String, CliError> {
    let payload = commands::read_input(arg, stdin)?;
    commands::enforce_limit(payload.trim(), config.max_payload_len)?;
    Ok(payload)
}

/// Runs the CLI.
///
/// ## Startup Sequence
/// ```text
/// 1. CliConfig::load()   ──► Err ──► anyhow (exit 2 from main)
/// 2. init_tracing()
/// 3. execute()           ──► Ok  ──► render to stdout, exit 0
///                        ──► Err ──► CliError to stdout (json) or
///                                    stderr (text), exit 1 or 2
/// ```
pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = CliConfig::load().context("failed to load configuration")?;
    init_tracing(&config);

    let format = cli.format.unwrap_or(config.output_format);
    debug!(%format, max_payload_len = config.max_payload_len, "configuration loaded");

    let result = execute(cli.command, &config, &mut io::stdin().lock());

    let mut stdout = io::stdout().lock();
    match result {
        Ok(output) => {
            let rendered = output
                .render(format)
                .context("failed to serialize output")?;
            writeln!(stdout, "{}", rendered).context("failed to write output")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            info!(code = err.code.as_str(), "command failed");
            match format {
                OutputFormat::Json => {
                    let rendered =
                        serde_json::to_string(&err).context("failed to serialize error")?;
                    writeln!(stdout, "{}", rendered).context("failed to write output")?;
                }
                OutputFormat::Text => eprintln!("error: {}", err),
            }
            Ok(ExitCode::from(err.code.exit_status()))
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages, overrides everything
/// - `QRIS_LOG=qris_cli=debug` - Used when `RUST_LOG` is unset
/// - Default: WARN level
///
/// Events go to stderr; stdout is reserved for command output.
fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

// =============================================================================
// Unit Tests
// =============================================================================
