//! Thin entry point for the dispatch-demo binary.
//!
//! All dispatch semantics live in `command-dispatch-core`; this layer
//! only wires up logging, the terminal prompter, and the final
//! process exit on the returned outcome.

mod commands;
mod prompt;

use std::process::ExitCode;

use anyhow::Context;
use command_dispatch_core::Dispatcher;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

use crate::commands::build_registry;
use crate::prompt::TerminalPrompter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_target(false).with_env_filter(filter).init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let registry = build_registry();
    let argv: Vec<String> = std::env::args().skip(1).collect();

    let mut dispatcher =
        Dispatcher::new(&registry, TerminalPrompter::new()).context("invalid command registry")?;
    let outcome = dispatcher
        .dispatch(&argv)
        .map_err(|err| anyhow::anyhow!(err))
        .context("command failed")?;

    if let Some(message) = &outcome.message {
        if outcome.is_success() {
            println!("{message}");
        } else {
            eprintln!("{message}");
        }
    }
    Ok(ExitCode::from(u8::try_from(outcome.code).unwrap_or(1)))
}
