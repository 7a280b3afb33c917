//! # QRIS CLI Entry Point
//!
//! ```text
//! qris convert --amount 15000 <STATIC_PAYLOAD>
//! qris inspect <PAYLOAD>
//! qris verify  <PAYLOAD>
//! qris checksum <TEXT>
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

use clap::Parser;
use qris_cli::Cli;

fn main() -> ExitCode {
    match qris_cli::run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(2)
        }
    }
}
