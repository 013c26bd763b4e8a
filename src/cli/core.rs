//! Core CLI loop, dispatch, and shell context helpers.

use std::{io, path::PathBuf};

use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    core::{ConfirmOutcome, NavigationController, PendingAction, Screen, Selectable},
    domain::{DocId, FormStep, TextField, WineCategory},
    errors::{CliError, TastingError},
    storage::RecordStores,
};

use super::commands;
use super::output::{self, OutputPreferences};
use super::registry::CommandRegistry;
use super::ui::{DetailView, Formatter, MenuRenderError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// State shared by the shell loop and every command handler.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub controller: NavigationController,
    pub theme: ColorfulTheme,
    pub config: Config,
    pub home: PathBuf,
    pub running: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        output::set_preferences(OutputPreferences::from_config(&config));

        let home = config_manager.base_dir().to_path_buf();
        let stores = RecordStores::open_json(Some(home.clone()), config.backup_retention)?;
        tracing::debug!(home = %home.display(), ?mode, "shell ready");

        Ok(ShellContext {
            mode,
            registry,
            controller: NavigationController::new(stores),
            theme: ColorfulTheme::default(),
            config,
            home,
            running: true,
        })
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    /// Category named by `arg`, falling back to the configured default.
    pub(crate) fn category_arg(&self, arg: Option<&str>) -> Result<WineCategory, CommandError> {
        match arg {
            Some(raw) => WineCategory::parse(raw).ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "unknown category `{raw}` (use rosso, bianco or rosato)"
                ))
            }),
            None => self.config.default_category.ok_or_else(|| {
                CommandError::InvalidArguments("a category is required".into())
            }),
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.find(command).map(|entry| entry.handler) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };

        let screen_before = self.controller.screen();
        let pending_before = self.controller.pending();
        let result = handler(self, args);

        if self.controller.screen() != screen_before {
            self.announce_screen();
        }
        if let Some(action) = self.controller.pending() {
            if pending_before != Some(action) {
                self.announce_modal(action);
            }
        }

        match result {
            Ok(()) if !self.controller.is_running() => Ok(LoopControl::Exit),
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.registry.suggest(input) {
            output::info(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                self.print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(TastingError::InvalidState(message)) => {
                self.print_warning(&message);
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn announce_screen(&self) {
        output::info(format!("Screen: {}", self.controller.screen()));
    }

    fn announce_modal(&self, action: PendingAction) {
        output::section(action.title());
        output::info(action.message());
        self.print_hint(&format!(
            "`confirm` to {}, `dismiss` to {}.",
            action.confirm_label(),
            action.cancel_label()
        ));
    }

    pub(crate) fn report_outcome(&self, outcome: &ConfirmOutcome) {
        match outcome {
            ConfirmOutcome::Inserted { category, id } => output::success(format!(
                "Saved {} evaluation #{id}.",
                category.display_name()
            )),
            ConfirmOutcome::Updated {
                category,
                id,
                applied: true,
            } => output::success(format!(
                "Updated {} evaluation #{id}.",
                category.display_name()
            )),
            ConfirmOutcome::Updated {
                category,
                id,
                applied: false,
            } => self.print_warning(&format!(
                "{} evaluation #{id} no longer exists; nothing was updated.",
                category.display_name()
            )),
            ConfirmOutcome::Deleted { category, id } => output::success(format!(
                "Deleted {} evaluation #{id}.",
                category.display_name()
            )),
            ConfirmOutcome::DeleteFailed { id, reason, .. } => {
                self.print_error(&format!("Could not delete #{id}: {reason}"))
            }
            ConfirmOutcome::ExitConfirmed => output::info("Arrivederci."),
        }
    }

    /// Prints the current form screen with its highlighted buttons.
    pub(crate) fn print_form(&self) {
        let Some(screen) = self.controller.form_screen() else {
            return;
        };
        let formatter = Formatter::new();
        let category = screen.category();
        output::section(format!(
            "{} {} ({}/{})",
            screen.step().title(),
            category.display_name(),
            screen.step().position(),
            FormStep::ALL.len()
        ));
        for group in screen.groups() {
            println!(
                "{} [{}]",
                formatter.category_title(category, group.title()),
                group.container_id()
            );
            for button in group.buttons() {
                println!(
                    "  {} {}",
                    formatter.selection_marker(button.is_highlighted()),
                    button.label()
                );
            }
        }
        if screen.groups().is_empty() {
            let session = self.controller.session();
            for field in TextField::ALL {
                println!(
                    "{} [{}]: {}",
                    formatter.category_title(category, field.label()),
                    field.key(category),
                    formatter.category_value(category, session.text(field))
                );
            }
        }
    }

    pub(crate) fn print_archive(&self) {
        let Some(view) = self.controller.archive() else {
            return;
        };
        let formatter = Formatter::new();
        let category = view.category();
        output::section(format!("Archivio {}", category.display_name()));
        if view.is_empty() {
            output::info(view.empty_message());
            return;
        }
        for entry in view.entries() {
            let subtitle = entry.subtitle(category);
            println!(
                "  #{:<4} {}  {}",
                entry.id,
                formatter.category_title(category, entry.title(category)),
                formatter.detail_text(subtitle)
            );
        }
    }

    pub(crate) fn print_detail(&self) {
        if let Some(detail) = self.controller.archive().and_then(|view| view.detail()) {
            println!("{}", DetailView::new(detail).render(&Formatter::new()));
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        output::error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        output::warning(message);
    }

    pub(crate) fn print_hint(&self, message: &str) {
        output::hint(message);
    }

    pub(crate) fn is_form(&self) -> bool {
        matches!(self.controller.screen(), Screen::Form { .. })
    }
}

pub(crate) fn parse_id(input: &str) -> Result<DocId, CommandError> {
    input
        .trim_start_matches('#')
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid record id `{input}`")))
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] TastingError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<MenuRenderError> for CommandError {
    fn from(err: MenuRenderError) -> Self {
        match err {
            MenuRenderError::Interrupted | MenuRenderError::EndOfInput => {
                CommandError::ExitRequested
            }
            MenuRenderError::Io(err) => CommandError::Io(err),
        }
    }
}

impl From<CliError> for CommandError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::Core(inner) => CommandError::Core(inner),
            CliError::Input(message) | CliError::Command(message) => {
                CommandError::InvalidArguments(message)
            }
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_accept_a_hash_prefix() {
        assert_eq!(parse_id("#12").ok(), Some(12));
        assert_eq!(parse_id("7").ok(), Some(7));
        assert!(matches!(
            parse_id("seven"),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn exhausted_menus_request_exit() {
        let err: CommandError = MenuRenderError::EndOfInput.into();
        assert!(matches!(err, CommandError::ExitRequested));
    }
}
