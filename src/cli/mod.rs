//! One-shot command front end over the resort ledger.

pub mod commands;
pub mod context;
pub mod output;
pub mod registry;

use std::env;

use tracing::debug;

pub use crate::errors::CliError;
use context::CliContext;
use registry::CommandRegistry;

/// Runs the command named by the process arguments.
pub fn run_cli() -> Result<(), CliError> {
    let args: Vec<String> = env::args().skip(1).collect();
    run_with_args(&args)
}

pub fn run_with_args(args: &[String]) -> Result<(), CliError> {
    let registry = CommandRegistry::with_defaults();
    let Some((name, rest)) = args.split_first() else {
        commands::system::print_help(&registry);
        return Ok(());
    };
    let name = name.to_lowercase();
    if name == "help" || name == "--help" || name == "-h" {
        commands::system::print_help(&registry);
        return Ok(());
    }
    let entry = registry
        .get(&name)
        .ok_or_else(|| CliError::UnknownCommand(name.clone()))?;

    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();
    debug!(command = entry.name, args = ?rest, "dispatching command");
    let mut context = CliContext::open()?;
    (entry.handler)(&mut context, &rest)
}
