use std::fmt;

use colored::Colorize;

use crate::cli::output::{current_preferences, OutputPreferences};
use crate::domain::{Rgb, WineCategory};

pub struct Formatter {
    prefs: OutputPreferences,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {
            prefs: current_preferences(),
        }
    }

    pub fn with_preferences(prefs: OutputPreferences) -> Self {
        Self { prefs }
    }

    pub fn plain(&self) -> bool {
        self.prefs.plain_mode
    }

    pub fn header_text(&self, title: impl fmt::Display) -> String {
        let text = format!("=== {} ===", title);
        if self.prefs.plain_mode {
            text
        } else {
            text.bold().to_string()
        }
    }

    pub fn detail_text(&self, message: impl fmt::Display) -> String {
        let text = message.to_string();
        if self.prefs.plain_mode || self.prefs.high_contrast_mode {
            text
        } else {
            text.dimmed().to_string()
        }
    }

    /// Headings in the category's title colour.
    pub fn category_title(&self, category: WineCategory, text: impl fmt::Display) -> String {
        self.tint(category.profile().title_color, text.to_string())
    }

    /// Values in the category's value colour.
    pub fn category_value(&self, category: WineCategory, text: impl fmt::Display) -> String {
        self.tint(category.profile().value_color, text.to_string())
    }

    fn tint(&self, Rgb(r, g, b): Rgb, text: String) -> String {
        if self.prefs.plain_mode {
            return text;
        }
        if self.prefs.high_contrast_mode {
            return text.bold().to_string();
        }
        text.truecolor(r, g, b).to_string()
    }

    pub fn navigation_hint(&self) -> String {
        "(Frecce per muoversi, Invio per scegliere, ESC per tornare indietro)".to_string()
    }

    pub fn selection_marker(&self, highlighted: bool) -> &'static str {
        match (highlighted, self.prefs.plain_mode) {
            (true, true) => "[x]",
            (false, true) => "[ ]",
            (true, false) => "●",
            (false, false) => "○",
        }
    }

    pub fn format_two_column_row(&self, label: &str, description: &str, width: usize) -> String {
        let padding = width.saturating_sub(label.chars().count()) + 2;
        format!("  {}{}{}", label, " ".repeat(padding), description)
            .trim_end()
            .to_string()
    }
}
