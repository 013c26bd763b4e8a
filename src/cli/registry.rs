//! Command table of the tasting shell, grouped the way `help` lists it.

use strsim::levenshtein;

use crate::cli::core::{CommandResult, ShellContext};

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Largest edit distance still offered as a "did you mean" suggestion.
const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Tasting,
    Archive,
    Session,
}

impl CommandGroup {
    pub fn title(self) -> &'static str {
        match self {
            CommandGroup::Tasting => "Tasting",
            CommandGroup::Archive => "Archive",
            CommandGroup::Session => "Session",
        }
    }
}

pub struct CommandEntry {
    pub name: &'static str,
    pub summary: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        summary: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            summary,
            usage,
            handler,
        }
    }
}

/// Commands in registration order, one block per [`CommandGroup`].
#[derive(Default)]
pub struct CommandRegistry {
    groups: Vec<(CommandGroup, Vec<CommandEntry>)>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entries` under `group`. A name that is already taken keeps its
    /// first handler.
    pub fn register_group(&mut self, group: CommandGroup, entries: Vec<CommandEntry>) {
        let mut accepted = Vec::with_capacity(entries.len());
        for entry in entries {
            let taken = self.find(entry.name).is_some()
                || accepted.iter().any(|kept: &CommandEntry| kept.name == entry.name);
            if taken {
                tracing::warn!(command = entry.name, "duplicate command ignored");
                continue;
            }
            accepted.push(entry);
        }
        match self.groups.iter_mut().find(|(existing, _)| *existing == group) {
            Some((_, block)) => block.extend(accepted),
            None => self.groups.push((group, accepted)),
        }
    }

    pub fn find(&self, name: &str) -> Option<&CommandEntry> {
        self.groups
            .iter()
            .flat_map(|(_, entries)| entries.iter())
            .find(|entry| entry.name == name)
    }

    pub fn group_of(&self, name: &str) -> Option<CommandGroup> {
        self.groups
            .iter()
            .find(|(_, entries)| entries.iter().any(|entry| entry.name == name))
            .map(|(group, _)| *group)
    }

    pub fn groups(&self) -> impl Iterator<Item = (CommandGroup, &[CommandEntry])> + '_ {
        self.groups
            .iter()
            .map(|(group, entries)| (*group, entries.as_slice()))
    }

    /// Closest command name to a mistyped `input`, if any is close enough.
    pub fn suggest(&self, input: &str) -> Option<&'static str> {
        let input = input.to_lowercase();
        self.groups
            .iter()
            .flat_map(|(_, entries)| entries.iter())
            .map(|entry| (levenshtein(entry.name, &input), entry.name))
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }
}
