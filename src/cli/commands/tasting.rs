use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::{ConfirmOutcome, Screen};
use crate::domain::{schema::CONTAINER_SUFFIX, TextField};
use crate::errors::TastingError;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("start", "Leave the welcome screen", "start", cmd_start),
        CommandEntry::new(
            "taste",
            "Begin a new evaluation",
            "taste <rosso|bianco|rosato>",
            cmd_taste,
        ),
        CommandEntry::new("form", "Show the current form screen", "form", cmd_form),
        CommandEntry::new("next", "Go to the next form screen", "next", cmd_next),
        CommandEntry::new("prev", "Go to the previous form screen", "prev", cmd_prev),
        CommandEntry::new(
            "pick",
            "Press a button on the current form screen",
            "pick <container> <label>",
            cmd_pick,
        ),
        CommandEntry::new(
            "text",
            "Set a text field on the info screen",
            "text <nome|produttore|annata|alcol> <value>",
            cmd_text,
        ),
        CommandEntry::new("save", "Ask to save the evaluation", "save", cmd_save),
        CommandEntry::new("confirm", "Confirm the open dialog", "confirm", cmd_confirm),
        CommandEntry::new("dismiss", "Close the open dialog", "dismiss", cmd_dismiss),
        CommandEntry::new("back", "Back key", "back", cmd_back),
    ]
}

fn cmd_start(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.controller.start()?;
    Ok(())
}

fn cmd_taste(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let category = context.category_arg(args.first().copied())?;
    context.controller.begin_tasting(category)?;
    context.print_form();
    Ok(())
}

fn cmd_form(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.is_form() {
        return Err(TastingError::InvalidState(format!(
            "`{}` is not a form screen",
            context.controller.screen()
        ))
        .into());
    }
    context.print_form();
    Ok(())
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.controller.next_step()?;
    context.print_form();
    Ok(())
}

fn cmd_prev(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.controller.previous_step()?;
    context.print_form();
    Ok(())
}

fn cmd_pick(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [container, label @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: pick <container> <label>".into(),
        ));
    };
    if label.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: pick <container> <label>".into(),
        ));
    }
    let label = label.join(" ");
    let container_id = resolve_container(context, container);

    match context.controller.press(&container_id, &label)? {
        Some(true) => output::success(format!("{label} selected.")),
        Some(false) => output::info(format!("{label} deselected.")),
        None => context.print_warning(&format!("No button `{label}` in `{container_id}`.")),
    }
    Ok(())
}

/// Accepts `colore_rosso_box`, `colore_rosso` or `colore` on a red screen.
fn resolve_container(context: &ShellContext, raw: &str) -> String {
    let Some(screen) = context.controller.form_screen() else {
        return raw.to_string();
    };
    let candidates = [
        raw.to_string(),
        format!("{raw}{CONTAINER_SUFFIX}"),
        format!("{}{CONTAINER_SUFFIX}", screen.category().field(raw)),
    ];
    candidates
        .iter()
        .find(|candidate| screen.group(candidate).is_some())
        .cloned()
        .unwrap_or_else(|| raw.to_string())
}

fn cmd_text(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((key, value)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: text <field> <value>".into(),
        ));
    };
    let category = match context.controller.screen() {
        Screen::Form { category, .. } => category,
        other => {
            return Err(TastingError::InvalidState(format!(
                "text fields live on the info screen, not `{other}`"
            ))
            .into())
        }
    };
    let field = TextField::from_key(category, key)
        .ok_or_else(|| TastingError::UnknownField((*key).to_string()))?;
    context.controller.set_text(field, value.join(" "))?;
    Ok(())
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.controller.request_save()?;
    Ok(())
}

fn cmd_confirm(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let outcome = context.controller.confirm()?;
    context.report_outcome(&outcome);
    if matches!(
        outcome,
        ConfirmOutcome::Updated { .. } | ConfirmOutcome::Deleted { .. }
    ) {
        context.print_archive();
    }
    Ok(())
}

fn cmd_dismiss(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.controller.dismiss() {
        context.print_warning("No dialog is open.");
    }
    Ok(())
}

fn cmd_back(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.controller.back();
    Ok(())
}
