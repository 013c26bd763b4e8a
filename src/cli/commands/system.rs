use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::domain::WineCategory;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "menu",
            "Main menu actions",
            "menu <archive <rosso|bianco|rosato>|tasting|exit>",
            cmd_menu,
        ),
        CommandEntry::new("status", "Show the current screen and evaluation", "status", cmd_status),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_menu(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        Some("archive") | Some("archivio") => {
            let category = context.category_arg(args.get(1).copied())?;
            context.controller.open_archive(category)?;
            context.print_archive();
            Ok(())
        }
        Some("tasting") | Some("degustazione") => {
            context.controller.go_to_tasting();
            Ok(())
        }
        Some("exit") | Some("esci") => {
            context.controller.quit();
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: menu <archive <rosso|bianco|rosato>|tasting|exit>".into(),
        )),
    }
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    tracing::debug!(screen = %context.controller.screen(), "status requested");
    let controller = &context.controller;
    output::section("Status");
    output::info(format!("  Screen   : {}", controller.screen()));
    output::info(format!("  Data     : {}", context.home.display()));
    if let Some(action) = controller.pending() {
        output::info(format!("  Pending  : {}", action.title()));
    }
    let session = controller.session();
    if let Some(category) = session.category() {
        output::info(format!("  Category : {}", category.display_name()));
        output::info(format!("  Selected : {} field(s)", session.selections().len()));
        if let Some(edit) = session.edit() {
            output::info(format!("  Editing  : #{}", edit.id));
        }
    }
    for category in WineCategory::ALL {
        let count = controller
            .stores()
            .store(category)
            .all()
            .map(|records| records.len())?;
        output::info(format!("  {:<9}: {count} saved", category.display_name()));
    }
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(command) = args.first().map(|name| name.to_lowercase()) {
        if let Some(entry) = context.registry.find(&command) {
            help::print_command(&context.registry, entry);
        } else {
            context.suggest_command(args[0]);
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
