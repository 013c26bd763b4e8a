use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};

const USAGE_WIDTH: usize = 28;

/// Every command, one section per group, usage first.
pub fn print_overview(registry: &CommandRegistry) {
    for (group, entries) in registry.groups() {
        output::section(group.title());
        for entry in entries {
            output::info(overview_line(entry));
        }
    }
    output::hint("Use `help <command>` for details.");
}

pub fn print_command(registry: &CommandRegistry, entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    output::info(format!("  {}", entry.summary));
    output::info(format!("  Usage: {}", entry.usage));
    if let Some(group) = registry.group_of(entry.name) {
        output::info(format!("  Group: {}", group.title()));
    }
}

fn overview_line(entry: &CommandEntry) -> String {
    format!("  {:<width$} {}", entry.usage, entry.summary, width = USAGE_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::core::{CommandResult, ShellContext};

    fn noop(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn overview_lines_align_summaries() {
        let short = CommandEntry::new("next", "Go to the next form screen", "next", noop);
        let long = CommandEntry::new("pick", "Press a button", "pick <container> <label>", noop);
        let short_line = overview_line(&short);
        let long_line = overview_line(&long);
        assert_eq!(short_line.find("Go to"), long_line.find("Press"));
        assert!(long_line.starts_with("  pick <container> <label>"));
    }
}
