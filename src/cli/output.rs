use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

use crate::config::Config;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutputPreferences {
    pub plain_mode: bool,
    pub high_contrast_mode: bool,
}

impl OutputPreferences {
    pub fn from_config(config: &Config) -> Self {
        Self {
            plain_mode: config.plain_mode,
            high_contrast_mode: config.high_contrast_mode,
        }
    }
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
}

pub fn current_preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn build_label(kind: MessageKind) -> (&'static str, &'static str) {
    match kind {
        MessageKind::Info => ("INFO", "ℹ"),
        MessageKind::Success => ("OK", "✔"),
        MessageKind::Warning => ("WARNING", "⚠"),
        MessageKind::Error => ("ERROR", "✖"),
        MessageKind::Hint => ("HINT", "›"),
        MessageKind::Section => ("", ""),
    }
}

fn apply_style(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();

    if kind == MessageKind::Section {
        let base = format!("=== {} ===", text.trim());
        return if prefs.plain_mode {
            base
        } else {
            base.bold().to_string()
        };
    }

    let (label, icon) = build_label(kind);
    if prefs.plain_mode {
        return format!("{label}: {text}");
    }
    let formatted = format!("{icon} {text}");

    if prefs.high_contrast_mode {
        return match kind {
            MessageKind::Success | MessageKind::Warning | MessageKind::Error => {
                formatted.bold().to_string()
            }
            _ => formatted,
        };
    }

    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Hint => formatted.dimmed().to_string(),
        MessageKind::Info | MessageKind::Section => formatted,
    }
}

pub fn format_message(kind: MessageKind, message: impl fmt::Display) -> String {
    apply_style(kind, message, &current_preferences())
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = format_message(kind, message);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}
