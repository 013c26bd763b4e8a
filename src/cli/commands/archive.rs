use crate::cli::core::{parse_id, CommandError, CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;
use crate::domain::DocId;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "archive",
            "List the saved evaluations of a category",
            "archive <rosso|bianco|rosato>",
            cmd_archive,
        ),
        CommandEntry::new("show", "Open an archived evaluation", "show <id>", cmd_show),
        CommandEntry::new("close", "Close the open evaluation", "close", cmd_close),
        CommandEntry::new("edit", "Edit an archived evaluation", "edit <id>", cmd_edit),
        CommandEntry::new(
            "delete",
            "Ask to delete an archived evaluation",
            "delete <id>",
            cmd_delete,
        ),
    ]
}

fn id_arg(args: &[&str], usage: &str) -> Result<DocId, CommandError> {
    match args.first() {
        Some(raw) => parse_id(raw),
        None => Err(CommandError::InvalidArguments(format!("usage: {usage}"))),
    }
}

fn cmd_archive(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let category = context.category_arg(args.first().copied())?;
    context.controller.open_archive(category)?;
    context.print_archive();
    Ok(())
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = id_arg(args, "show <id>")?;
    context.controller.open_detail(id)?;
    context.print_detail();
    Ok(())
}

fn cmd_close(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.controller.close_detail();
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = id_arg(args, "edit <id>")?;
    context.controller.start_edit(id)?;
    context.print_form();
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = id_arg(args, "delete <id>")?;
    context.controller.request_delete(id)?;
    Ok(())
}
