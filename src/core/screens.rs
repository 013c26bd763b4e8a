//! Form screens and their selectable button groups.
//!
//! Every screen owns an explicit registry of its button boxes, so pressing a
//! button or recolouring a screen never has to search a widget tree.

use crate::domain::{
    schema::{self, ContainerSpec},
    CategoryProfile, FieldValue, FormStep, SelectionMode, WineCategory,
};

use super::{mapping::canonical_field_name, selection::SelectionStore};

/// Anything a front-end can render as a toggleable choice.
pub trait Selectable {
    fn label(&self) -> &str;
    fn is_highlighted(&self) -> bool;
    fn set_highlighted(&mut self, highlighted: bool);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionButton {
    label: String,
    highlighted: bool,
}

impl SelectionButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            highlighted: false,
        }
    }
}

impl Selectable for SelectionButton {
    fn label(&self) -> &str {
        &self.label
    }

    fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }
}

/// One button box (`*_box`) and the record field it writes to.
#[derive(Debug, Clone)]
pub struct ButtonGroup {
    container_id: String,
    field: String,
    title: &'static str,
    mode: SelectionMode,
    buttons: Vec<SelectionButton>,
}

impl ButtonGroup {
    fn from_spec(spec: ContainerSpec) -> Self {
        Self {
            buttons: spec.options.iter().copied().map(SelectionButton::new).collect(),
            container_id: spec.container_id,
            field: spec.field,
            title: spec.title,
            mode: spec.mode,
        }
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn buttons(&self) -> &[SelectionButton] {
        &self.buttons
    }

    pub fn highlighted_labels(&self) -> Vec<&str> {
        self.buttons
            .iter()
            .filter(|button| button.is_highlighted())
            .map(Selectable::label)
            .collect()
    }

    fn clear(&mut self) {
        for button in &mut self.buttons {
            button.set_highlighted(false);
        }
    }

    fn highlight_from(&mut self, value: Option<&FieldValue>) {
        for button in &mut self.buttons {
            let on = value.is_some_and(|value| value.contains(button.label()));
            button.set_highlighted(on);
        }
    }
}

/// A single step of the form sequence for one category.
#[derive(Debug, Clone)]
pub struct FormScreen {
    profile: &'static CategoryProfile,
    step: FormStep,
    groups: Vec<ButtonGroup>,
}

impl FormScreen {
    pub fn new(category: WineCategory, step: FormStep) -> Self {
        Self {
            profile: category.profile(),
            step,
            groups: schema::containers(step, category)
                .into_iter()
                .map(ButtonGroup::from_spec)
                .collect(),
        }
    }

    pub fn category(&self) -> WineCategory {
        self.profile.category
    }

    pub fn profile(&self) -> &'static CategoryProfile {
        self.profile
    }

    pub fn step(&self) -> FormStep {
        self.step
    }

    /// Screen identifier such as `naso_bianco`.
    pub fn name(&self) -> String {
        self.step.screen_name(self.category())
    }

    pub fn groups(&self) -> &[ButtonGroup] {
        &self.groups
    }

    pub fn group(&self, container_id: &str) -> Option<&ButtonGroup> {
        self.groups
            .iter()
            .find(|group| group.container_id == container_id)
    }

    pub fn reset_highlights(&mut self) {
        for group in &mut self.groups {
            group.clear();
        }
    }

    /// Recolours every box from the live selections.
    pub fn apply_selections(&mut self, selections: &SelectionStore) {
        for group in &mut self.groups {
            let field = canonical_field_name(&group.container_id);
            group.highlight_from(selections.get(&field));
        }
    }

    /// Handles a press on `label` inside `container_id`.
    ///
    /// Returns whether the button ends up highlighted, or `None` when the
    /// screen has no such container or button.
    pub fn press(
        &mut self,
        container_id: &str,
        label: &str,
        selections: &mut SelectionStore,
    ) -> Option<bool> {
        let screen = self.name();
        let Some(group) = self
            .groups
            .iter_mut()
            .find(|group| group.container_id == container_id)
        else {
            tracing::warn!(screen = %screen, container = container_id, "unknown button box");
            return None;
        };
        if !group.buttons.iter().any(|button| button.label() == label) {
            tracing::warn!(screen = %screen, container = container_id, label, "unknown button");
            return None;
        }

        let selected = match group.mode {
            SelectionMode::Single => {
                let selected = selections.select_single(&group.field, label);
                for button in &mut group.buttons {
                    let on = selected && button.label() == label;
                    button.set_highlighted(on);
                }
                selected
            }
            SelectionMode::Multiple => {
                let selected = selections.select_multiple(&group.field, label);
                if let Some(button) = group
                    .buttons
                    .iter_mut()
                    .find(|button| button.label() == label)
                {
                    button.set_highlighted(selected);
                }
                selected
            }
        };
        tracing::debug!(field = %group.field, label, selected, "selection changed");
        Some(selected)
    }
}

/// Every form screen of every category.
#[derive(Debug, Clone)]
pub struct FormScreens {
    screens: Vec<FormScreen>,
}

impl Default for FormScreens {
    fn default() -> Self {
        Self::new()
    }
}

impl FormScreens {
    pub fn new() -> Self {
        let screens = WineCategory::ALL
            .into_iter()
            .flat_map(|category| {
                FormStep::ALL
                    .into_iter()
                    .map(move |step| FormScreen::new(category, step))
            })
            .collect();
        Self { screens }
    }

    pub fn get(&self, category: WineCategory, step: FormStep) -> Option<&FormScreen> {
        self.screens
            .iter()
            .find(|screen| screen.category() == category && screen.step() == step)
    }

    pub fn get_mut(&mut self, category: WineCategory, step: FormStep) -> Option<&mut FormScreen> {
        self.screens
            .iter_mut()
            .find(|screen| screen.category() == category && screen.step() == step)
    }

    /// Clears the highlights of every screen of `category`.
    pub fn reset_category(&mut self, category: WineCategory) {
        for screen in self
            .screens
            .iter_mut()
            .filter(|screen| screen.category() == category)
        {
            screen.reset_highlights();
        }
    }
}
