use crate::cli::commands::CommandResult;
use crate::cli::context::CliContext;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "version",
        "Show build metadata",
        "version",
        cmd_version,
    )]
}

fn cmd_version(context: &mut CliContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Resort Ledger {}", meta.version));
    output::line(format!("  CLI version : {}", build_info::CLI_VERSION));
    output::line(format!("  Build hash  : {}", meta.git_hash));
    output::line(format!("  Built at    : {}", meta.timestamp));
    output::line(format!("  Profile     : {}", meta.profile));
    output::line(format!("  Data dir    : {}", context.base_dir().display()));
    Ok(())
}

pub fn print_help(registry: &CommandRegistry) {
    output::section("Commands");
    let rows: Vec<Vec<String>> = registry
        .list()
        .iter()
        .map(|entry| vec![entry.name.to_string(), entry.description.to_string()])
        .collect();
    output::render_table(&["Command", "Description"], &rows);
    output::line("");
    for entry in registry.list() {
        output::line(format!("  {}", entry.usage));
    }
}
