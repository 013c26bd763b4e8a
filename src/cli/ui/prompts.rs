use dialoguer::{theme::ColorfulTheme, Input};

use crate::cli::ui::menu_renderer::{MenuRenderError, MenuRenderer, MenuUI, MenuUIItem};
use crate::cli::ui::test_mode::{self, TextTestInput};
use crate::core::PendingAction;

const CONFIRM_KEY: &str = "confirm";
const CANCEL_KEY: &str = "cancel";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextPromptResult {
    Value(String),
    Keep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoicePromptResult {
    Value(String),
    Cancel,
}

/// Free-text entry pre-filled with `current`.
pub fn text_input(
    theme: &ColorfulTheme,
    label: &str,
    current: &str,
) -> Result<TextPromptResult, dialoguer::Error> {
    if let Some(scripted) = test_mode::next_text_input(label) {
        return Ok(match scripted {
            TextTestInput::Value(value) => TextPromptResult::Value(value),
            TextTestInput::Keep => TextPromptResult::Keep,
        });
    }

    let value: String = Input::with_theme(theme)
        .with_prompt(label)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    if value == current {
        Ok(TextPromptResult::Keep)
    } else {
        Ok(TextPromptResult::Value(value))
    }
}

/// Picks one of `options`; ESC cancels.
pub fn choice_menu(
    title: &str,
    context: Option<String>,
    options: &[&str],
    current: Option<&str>,
) -> Result<ChoicePromptResult, MenuRenderError> {
    if options.is_empty() {
        return Ok(ChoicePromptResult::Cancel);
    }
    let items = options
        .iter()
        .map(|label| MenuUIItem::new(*label, *label, ""))
        .collect();
    let mut menu = MenuUI::new(title, items);
    if let Some(context) = context {
        menu = menu.with_context(context);
    }
    if let Some(index) = current.and_then(|value| options.iter().position(|opt| *opt == value)) {
        menu = menu.with_initial_index(index);
    }

    match MenuRenderer::new().show(&menu)? {
        Some(value) => Ok(ChoicePromptResult::Value(value)),
        None => Ok(ChoicePromptResult::Cancel),
    }
}

/// Two-button modal for `action`. ESC counts as cancel.
pub fn confirm_menu(action: PendingAction) -> Result<bool, MenuRenderError> {
    let items = vec![
        MenuUIItem::new(CONFIRM_KEY, action.confirm_label(), ""),
        MenuUIItem::new(CANCEL_KEY, action.cancel_label(), ""),
    ];
    let menu = MenuUI::new(action.title(), items).with_context(action.message());
    let selection = MenuRenderer::new().show(&menu)?;
    Ok(selection.as_deref() == Some(CONFIRM_KEY))
}
