//! Scripted input for interactive menus and text prompts.
//!
//! When `TASTING_TEST_MENU_EVENTS` or `TASTING_TEST_TEXT_INPUTS` is set, menus
//! and prompts consume queued events instead of reading the terminal.
//! Sequences are separated by `|`; menu events within one sequence by `,`
//! (e.g. `DOWN,ENTER|ESC`).

use once_cell::sync::Lazy;
use std::{
    collections::VecDeque,
    env,
    sync::{Mutex, MutexGuard, PoisonError},
};

pub const MENU_EVENTS_ENV: &str = "TASTING_TEST_MENU_EVENTS";
pub const TEXT_INPUTS_ENV: &str = "TASTING_TEST_TEXT_INPUTS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTestEvent {
    Up,
    Down,
    Home,
    End,
    Enter,
    Esc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextTestInput {
    Value(String),
    Keep,
}

struct Queue<T> {
    enabled: bool,
    items: VecDeque<T>,
}

impl<T> Queue<T> {
    fn from_env(var: &str, parse: fn(&str) -> VecDeque<T>) -> Self {
        match env::var(var) {
            Ok(raw) => Self {
                enabled: true,
                items: parse(&raw),
            },
            Err(_) => Self {
                enabled: false,
                items: VecDeque::new(),
            },
        }
    }
}

static MENU_EVENTS: Lazy<Mutex<Queue<Vec<MenuTestEvent>>>> =
    Lazy::new(|| Mutex::new(Queue::from_env(MENU_EVENTS_ENV, parse_menu_sequences)));

static TEXT_INPUTS: Lazy<Mutex<Queue<TextTestInput>>> =
    Lazy::new(|| Mutex::new(Queue::from_env(TEXT_INPUTS_ENV, parse_text_sequences)));

fn lock<T>(queue: &'static Lazy<Mutex<Queue<T>>>) -> MutexGuard<'static, Queue<T>> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Next scripted event sequence for the menu titled `label`.
///
/// `None` when scripting is off; `Some(None)` when the script ran out.
pub fn next_menu_events(label: &str) -> Option<Option<Vec<MenuTestEvent>>> {
    let mut guard = lock(&MENU_EVENTS);
    if !guard.enabled {
        return None;
    }
    let next = guard.items.pop_front();
    if next.is_none() {
        tracing::debug!(menu = label, "scripted menu events exhausted");
    }
    Some(next)
}

/// Next scripted answer for the prompt labelled `label`. An exhausted
/// script keeps the current value.
pub fn next_text_input(label: &str) -> Option<TextTestInput> {
    let mut guard = lock(&TEXT_INPUTS);
    if !guard.enabled {
        return None;
    }
    Some(guard.items.pop_front().unwrap_or_else(|| {
        tracing::debug!(prompt = label, "scripted text inputs exhausted");
        TextTestInput::Keep
    }))
}

fn parse_menu_event(token: &str) -> Option<MenuTestEvent> {
    match token.to_ascii_uppercase().as_str() {
        "UP" => Some(MenuTestEvent::Up),
        "DOWN" => Some(MenuTestEvent::Down),
        "HOME" => Some(MenuTestEvent::Home),
        "END" => Some(MenuTestEvent::End),
        "ENTER" | "RETURN" => Some(MenuTestEvent::Enter),
        "ESC" | "ESCAPE" => Some(MenuTestEvent::Esc),
        _ => None,
    }
}

fn parse_text_input(token: &str) -> TextTestInput {
    match token.to_ascii_uppercase().as_str() {
        "<KEEP>" | "KEEP" => TextTestInput::Keep,
        "<BLANK>" | "<EMPTY>" => TextTestInput::Value(String::new()),
        _ => TextTestInput::Value(token.to_string()),
    }
}

fn parse_menu_sequences(raw: &str) -> VecDeque<Vec<MenuTestEvent>> {
    raw.split('|')
        .filter_map(|segment| {
            let events = segment
                .split(',')
                .filter_map(|token| parse_menu_event(token.trim()))
                .collect::<Vec<_>>();
            if events.is_empty() {
                None
            } else {
                Some(events)
            }
        })
        .collect()
}

fn parse_text_sequences(raw: &str) -> VecDeque<TextTestInput> {
    raw.split('|')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(parse_text_input)
        .collect()
}

pub fn install_menu_events(events: Vec<Vec<MenuTestEvent>>) {
    let mut guard = lock(&MENU_EVENTS);
    guard.enabled = true;
    guard.items = events.into();
}

pub fn reset_menu_events() {
    let mut guard = lock(&MENU_EVENTS);
    guard.enabled = false;
    guard.items.clear();
}

pub fn install_text_inputs(inputs: Vec<TextTestInput>) {
    let mut guard = lock(&TEXT_INPUTS);
    guard.enabled = true;
    guard.items = inputs.into();
}

pub fn reset_text_inputs() {
    let mut guard = lock(&TEXT_INPUTS);
    guard.enabled = false;
    guard.items.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_sequences_split_on_pipes_and_commas() {
        let parsed = parse_menu_sequences("DOWN, enter | esc ||bogus");
        assert_eq!(
            parsed,
            VecDeque::from(vec![
                vec![MenuTestEvent::Down, MenuTestEvent::Enter],
                vec![MenuTestEvent::Esc],
            ])
        );
    }

    #[test]
    fn text_sequences_understand_markers() {
        let parsed = parse_text_sequences("Barolo|<KEEP>|<BLANK>");
        assert_eq!(
            parsed,
            VecDeque::from(vec![
                TextTestInput::Value("Barolo".into()),
                TextTestInput::Keep,
                TextTestInput::Value(String::new()),
            ])
        );
    }
}
