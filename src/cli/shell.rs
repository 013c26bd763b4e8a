use std::io::{self, BufRead};

use shell_words::split;

use crate::cli::core::{CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::menus::{self, MenuAction, MenuError};
use crate::cli::output::info as output_info;
use crate::cli::ui::prompts::{self, ChoicePromptResult, TextPromptResult};
use crate::domain::schema::{ALCOHOL_LEVELS, ALCOHOL_PLACEHOLDER};
use crate::domain::TextField;
use crate::errors::CliError;

pub const SCRIPT_MODE_ENV: &str = "TASTING_CORE_CLI_SCRIPT";

const CUSTOM_ALCOHOL: &str = "Altro";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_MODE_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match context.mode() {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut cursor = 0;
    while context.running {
        let action = match menus::next_action(context, &mut cursor) {
            Ok(action) => action,
            Err(MenuError::Interrupted) | Err(MenuError::EndOfInput) => {
                output_info("Exiting.");
                break;
            }
            Err(MenuError::Io(err)) => return Err(err.into()),
        };

        let result = match action {
            MenuAction::Command(line) => handle_line(context, &line),
            MenuAction::EditText(field) => {
                edit_text(context, field).map(|()| LoopControl::Continue)
            }
            MenuAction::Stay => Ok(LoopControl::Continue),
        };
        match result {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        let line = line?;
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            context.print_warning(&err.message);
            return Ok(LoopControl::Continue);
        }
    };

    if tokens.is_empty() || tokens[0].starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let raw = &tokens[0];
    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    tracing::debug!(line = line.trim(), "dispatching command");

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

/// Prompts for one info-screen field and stores the answer.
fn edit_text(context: &mut ShellContext, field: TextField) -> Result<(), CommandError> {
    let current = context.controller.session().text(field).to_string();

    let value = if field == TextField::Alcohol {
        let mut options = ALCOHOL_LEVELS.to_vec();
        options.push(CUSTOM_ALCOHOL);
        let current_option = (!current.is_empty()).then_some(current.as_str());
        match prompts::choice_menu(ALCOHOL_PLACEHOLDER, None, &options, current_option)? {
            ChoicePromptResult::Value(choice) if choice == CUSTOM_ALCOHOL => {
                prompt_text(context, field, &current)?
            }
            ChoicePromptResult::Value(choice) => Some(choice),
            ChoicePromptResult::Cancel => None,
        }
    } else {
        prompt_text(context, field, &current)?
    };

    if let Some(value) = value {
        context.controller.set_text(field, value)?;
    }
    Ok(())
}

fn prompt_text(
    context: &ShellContext,
    field: TextField,
    current: &str,
) -> Result<Option<String>, CommandError> {
    match prompts::text_input(&context.theme, field.label(), current)? {
        TextPromptResult::Value(value) => Ok(Some(value)),
        TextPromptResult::Keep => Ok(None),
    }
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_labels_stay_together() {
        let tokens = parse_command_line("pick profumo_primari_rosso_box 'Frutti rossi'").ok();
        assert_eq!(
            tokens,
            Some(vec![
                "pick".to_string(),
                "profumo_primari_rosso_box".to_string(),
                "Frutti rossi".to_string(),
            ])
        );
    }

    #[test]
    fn unbalanced_quotes_are_reported() {
        assert!(parse_command_line("text nome 'Barolo").is_err());
    }
}
