//! Keyboard menus for each screen of the interactive shell.
//!
//! Every menu resolves to a command line understood by the script-mode
//! dispatcher, so both modes drive the controller through the same handlers.

use shell_words::quote;

use crate::cli::core::ShellContext;
use crate::cli::ui::{
    prompts, DetailView, Formatter, MenuRenderError, MenuRenderer, MenuUI, MenuUIItem,
};
use crate::core::{Screen, Selectable};
use crate::domain::{FormStep, TextField, WineCategory, MISSING_VALUE};

const MAIN_MENU_KEY: &str = "__menu";
const TEXT_KEY_PREFIX: &str = "__text:";

pub type MenuError = MenuRenderError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// A command line for the dispatcher.
    Command(String),
    /// Prompt for a text field of the info screen.
    EditText(TextField),
    /// Nothing to do; show the current screen again.
    Stay,
}

/// Shows the menu for whatever the controller currently displays.
///
/// `cursor` carries the highlighted row between redraws of the same screen.
pub fn next_action(context: &ShellContext, cursor: &mut usize) -> Result<MenuAction, MenuError> {
    let controller = &context.controller;
    if let Some(action) = controller.pending() {
        let confirmed = prompts::confirm_menu(action)?;
        return Ok(MenuAction::Command(
            if confirmed { "confirm" } else { "dismiss" }.into(),
        ));
    }

    let menu = screen_menu(context);
    let keys: Vec<String> = menu.items.iter().map(|item| item.key.clone()).collect();
    let menu = if menu.initial_index.is_none() || *cursor > 0 {
        menu.with_initial_index(*cursor)
    } else {
        menu
    };
    let selection = MenuRenderer::new().show(&menu)?;
    let Some(key) = selection else {
        *cursor = 0;
        return Ok(MenuAction::Command("back".into()));
    };
    *cursor = keys.iter().position(|candidate| *candidate == key).unwrap_or(0);

    if key == MAIN_MENU_KEY {
        *cursor = 0;
        return main_menu();
    }
    if let Some(field_key) = key.strip_prefix(TEXT_KEY_PREFIX) {
        let category = controller.session().category();
        let field = category.and_then(|category| TextField::from_key(category, field_key));
        return Ok(field.map(MenuAction::EditText).unwrap_or(MenuAction::Stay));
    }
    if is_navigation(&key) {
        *cursor = 0;
    }
    Ok(MenuAction::Command(key))
}

fn is_navigation(key: &str) -> bool {
    !key.starts_with("pick ")
}

fn screen_menu(context: &ShellContext) -> MenuUI {
    match context.controller.screen() {
        Screen::Welcome => welcome_menu(),
        Screen::Selection => selection_menu(context),
        Screen::Form {
            category,
            step: FormStep::Info,
        } => info_menu(context, category),
        Screen::Form { .. } => form_menu(context),
        Screen::Archive(category) => archive_menu(context, category),
    }
}

fn welcome_menu() -> MenuUI {
    MenuUI::new(
        "Benvenuto",
        vec![
            MenuUIItem::new("start", "Inizia", "Start a new tasting"),
            MenuUIItem::new(MAIN_MENU_KEY, "Menu", "Archives and exit"),
        ],
    )
    .with_context("Scheda di degustazione")
}

fn selection_menu(context: &ShellContext) -> MenuUI {
    let mut items: Vec<MenuUIItem> = WineCategory::ALL
        .iter()
        .map(|category| {
            MenuUIItem::new(
                format!("taste {}", category.suffix()),
                category.display_name(),
                "",
            )
        })
        .collect();
    items.push(MenuUIItem::new(MAIN_MENU_KEY, "Menu", "Archives and exit"));
    let menu = MenuUI::new("Scegli la tipologia", items);
    match context.config.default_category {
        Some(category) => {
            let index = WineCategory::ALL
                .iter()
                .position(|candidate| *candidate == category)
                .unwrap_or(0);
            menu.with_initial_index(index)
        }
        None => menu,
    }
}

fn form_menu(context: &ShellContext) -> MenuUI {
    let formatter = Formatter::new();
    let mut items = Vec::new();
    let mut title = String::from("Scheda");
    if let Some(screen) = context.controller.form_screen() {
        title = format!(
            "{} {}",
            screen.step().title(),
            screen.category().display_name()
        );
        for group in screen.groups() {
            for button in group.buttons() {
                items.push(MenuUIItem::new(
                    format!(
                        "pick {} {}",
                        quote(group.container_id()),
                        quote(button.label())
                    ),
                    format!(
                        "{} {}",
                        formatter.selection_marker(button.is_highlighted()),
                        button.label()
                    ),
                    group.title(),
                ));
            }
        }
    }
    items.push(MenuUIItem::new("next", "Avanti", ""));
    items.push(MenuUIItem::new("prev", "Indietro", ""));
    items.push(MenuUIItem::new(MAIN_MENU_KEY, "Menu", ""));
    MenuUI::new(title, items)
}

fn info_menu(context: &ShellContext, category: WineCategory) -> MenuUI {
    let session = context.controller.session();
    let mut items: Vec<MenuUIItem> = TextField::ALL
        .iter()
        .map(|field| {
            let value = session.text(*field);
            MenuUIItem::new(
                format!("{TEXT_KEY_PREFIX}{}", field.key(category)),
                field.label(),
                if value.is_empty() { MISSING_VALUE } else { value },
            )
        })
        .collect();
    items.push(MenuUIItem::new("save", session.save_label(), ""));
    items.push(MenuUIItem::new("prev", "Indietro", ""));
    items.push(MenuUIItem::new(MAIN_MENU_KEY, "Menu", ""));
    MenuUI::new(format!("Info {}", category.display_name()), items)
}

fn archive_menu(context: &ShellContext, category: WineCategory) -> MenuUI {
    let title = format!("Archivio {}", category.display_name());
    let Some(view) = context.controller.archive() else {
        return MenuUI::new(title, vec![MenuUIItem::new(MAIN_MENU_KEY, "Menu", "")]);
    };

    if let Some(detail) = view.detail() {
        let items = vec![
            MenuUIItem::new(format!("edit {}", detail.id), "Modifica Scheda", ""),
            MenuUIItem::new(format!("delete {}", detail.id), "Elimina Scheda", ""),
            MenuUIItem::new("close", "Chiudi", ""),
        ];
        return MenuUI::new(detail.title.clone(), items)
            .with_context(DetailView::new(detail).render(&Formatter::new()));
    }

    let mut items: Vec<MenuUIItem> = view
        .entries()
        .iter()
        .map(|entry| {
            MenuUIItem::new(
                format!("show {}", entry.id),
                entry.title(category),
                entry.subtitle(category),
            )
        })
        .collect();
    items.push(MenuUIItem::new(MAIN_MENU_KEY, "Menu", ""));
    let menu = MenuUI::new(title, items);
    if view.is_empty() {
        menu.with_context(view.empty_message())
    } else {
        menu
    }
}

fn main_menu() -> Result<MenuAction, MenuError> {
    let mut items: Vec<MenuUIItem> = WineCategory::ALL
        .iter()
        .map(|category| {
            MenuUIItem::new(
                format!("menu archive {}", category.suffix()),
                format!("Archivio {}", category.display_name()),
                "",
            )
        })
        .collect();
    items.push(MenuUIItem::new("menu tasting", "Vai a degustazione", ""));
    items.push(MenuUIItem::new("menu exit", "Esci", ""));

    let selection = MenuRenderer::new().show(&MenuUI::new("Menu", items))?;
    Ok(selection.map(MenuAction::Command).unwrap_or(MenuAction::Stay))
}
