use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    style::{Attribute, SetAttribute},
    terminal::{self, ClearType},
    ExecutableCommand,
};

use crate::cli::ui::formatting::Formatter;
use crate::cli::ui::test_mode::{self, MenuTestEvent};

#[derive(Clone, Debug)]
pub struct MenuUI {
    pub title: String,
    pub context: Option<String>,
    pub items: Vec<MenuUIItem>,
    pub initial_index: Option<usize>,
}

impl MenuUI {
    pub fn new(title: impl Into<String>, items: Vec<MenuUIItem>) -> Self {
        Self {
            title: title.into(),
            context: None,
            items,
            initial_index: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_initial_index(mut self, index: usize) -> Self {
        self.initial_index = Some(index);
        self
    }

    fn start_index(&self) -> usize {
        self.initial_index
            .unwrap_or(0)
            .min(self.items.len().saturating_sub(1))
    }

    fn label_width(&self) -> usize {
        self.items
            .iter()
            .map(|item| item.label.chars().count())
            .max()
            .unwrap_or(0)
    }
}

#[derive(Clone, Debug)]
pub struct MenuUIItem {
    pub key: String,
    pub label: String,
    pub description: String,
}

impl MenuUIItem {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug)]
pub enum MenuRenderError {
    Interrupted,
    EndOfInput,
    Io(io::Error),
}

impl From<io::Error> for MenuRenderError {
    fn from(err: io::Error) -> Self {
        MenuRenderError::Io(err)
    }
}

/// Keyboard-driven list menu. Enter returns the key of the highlighted item,
/// Esc returns `None`.
pub struct MenuRenderer {
    formatter: Formatter,
}

impl Default for MenuRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuRenderer {
    pub fn new() -> Self {
        Self {
            formatter: Formatter::new(),
        }
    }

    pub fn show(&self, menu: &MenuUI) -> Result<Option<String>, MenuRenderError> {
        if menu.items.is_empty() {
            return Ok(None);
        }

        if let Some(scripted) = test_mode::next_menu_events(&menu.title) {
            return match scripted {
                Some(events) => self.show_with_script(menu, events),
                None => Err(MenuRenderError::EndOfInput),
            };
        }

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        stdout.execute(cursor::Hide)?;

        let mut selected_index = menu.start_index();
        let len = menu.items.len();

        let result = loop {
            self.render(&mut stdout, menu, selected_index)?;
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match key.code {
                    KeyCode::Char('c') | KeyCode::Char('C') => {
                        break Err(MenuRenderError::Interrupted)
                    }
                    KeyCode::Char('d') | KeyCode::Char('D') => {
                        break Err(MenuRenderError::EndOfInput)
                    }
                    _ => continue,
                }
            }
            match key.code {
                KeyCode::Up => selected_index = selected_index.checked_sub(1).unwrap_or(len - 1),
                KeyCode::Down => selected_index = (selected_index + 1) % len,
                KeyCode::Home => selected_index = 0,
                KeyCode::End => selected_index = len - 1,
                KeyCode::Enter => break Ok(Some(menu.items[selected_index].key.clone())),
                KeyCode::Esc => break Ok(None),
                _ => {}
            }
        };

        let clear_status = self.clear_screen(&mut stdout);
        stdout.execute(cursor::Show).ok();
        terminal::disable_raw_mode().ok();
        clear_status?;

        result
    }

    fn show_with_script(
        &self,
        menu: &MenuUI,
        events: Vec<MenuTestEvent>,
    ) -> Result<Option<String>, MenuRenderError> {
        let len = menu.items.len();
        let mut selected_index = menu.start_index();
        for event in events {
            match event {
                MenuTestEvent::Up => {
                    selected_index = selected_index.checked_sub(1).unwrap_or(len - 1);
                }
                MenuTestEvent::Down => selected_index = (selected_index + 1) % len,
                MenuTestEvent::Home => selected_index = 0,
                MenuTestEvent::End => selected_index = len - 1,
                MenuTestEvent::Enter => {
                    self.print_snapshot(menu, selected_index);
                    return Ok(Some(menu.items[selected_index].key.clone()));
                }
                MenuTestEvent::Esc => {
                    self.print_snapshot(menu, selected_index);
                    return Ok(None);
                }
            }
        }
        self.print_snapshot(menu, selected_index);
        tracing::warn!(menu = %menu.title, "scripted menu sequence did not end with ENTER or ESC");
        Err(MenuRenderError::EndOfInput)
    }

    fn lines(&self, menu: &MenuUI, selected_index: usize) -> Vec<(bool, String)> {
        let width = menu.label_width();
        let mut lines = Vec::new();
        if let Some(context) = &menu.context {
            lines.push((false, self.formatter.detail_text(context)));
            lines.push((false, String::new()));
        }
        lines.push((false, self.formatter.header_text(&menu.title)));
        lines.push((false, String::new()));
        for (index, item) in menu.items.iter().enumerate() {
            let is_selected = index == selected_index;
            let pointer = match (is_selected, self.formatter.plain()) {
                (true, true) => ">",
                (true, false) => "▸",
                (false, _) => " ",
            };
            let row = self
                .formatter
                .format_two_column_row(&item.label, &item.description, width);
            lines.push((is_selected, format!(" {pointer}{row}")));
        }
        lines.push((false, String::new()));
        lines.push((
            false,
            self.formatter.detail_text(self.formatter.navigation_hint()),
        ));
        lines
    }

    fn print_snapshot(&self, menu: &MenuUI, selected_index: usize) {
        for (_, line) in self.lines(menu, selected_index) {
            println!("{line}");
        }
    }

    fn render(
        &self,
        stdout: &mut Stdout,
        menu: &MenuUI,
        selected_index: usize,
    ) -> Result<(), io::Error> {
        self.clear_screen(stdout)?;
        for (highlighted, line) in self.lines(menu, selected_index) {
            if highlighted {
                stdout.execute(SetAttribute(Attribute::Reverse))?;
            }
            write!(stdout, "{line}")?;
            stdout.execute(SetAttribute(Attribute::Reset))?;
            write!(stdout, "\r\n")?;
        }
        stdout.flush()?;
        Ok(())
    }

    fn clear_screen(&self, stdout: &mut Stdout) -> Result<(), io::Error> {
        stdout.execute(terminal::Clear(ClearType::All))?;
        stdout.execute(cursor::MoveTo(0, 0))?;
        Ok(())
    }
}
