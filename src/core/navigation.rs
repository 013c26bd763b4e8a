//! Screen transitions, the save/delete confirmation flow and evaluation
//! lifecycle.
//!
//! The controller owns the session, the form screens and the record stores;
//! front-ends only forward user intents to it and render what it exposes.

use std::fmt;

use crate::{
    domain::{schema::TextField, DocId, FormStep, WineCategory},
    errors::{Result, TastingError},
    storage::RecordStores,
};

use super::{
    archive::{ArchiveView, RecordDetail},
    screens::{FormScreen, FormScreens},
    session::Session,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Selection,
    Form {
        category: WineCategory,
        step: FormStep,
    },
    Archive(WineCategory),
}

impl Screen {
    pub fn name(&self) -> String {
        match self {
            Screen::Welcome => "welcome".into(),
            Screen::Selection => "selection".into(),
            Screen::Form { category, step } => step.screen_name(*category),
            Screen::Archive(category) => category.profile().archive_screen.into(),
        }
    }

    pub fn is_form(&self) -> bool {
        matches!(self, Screen::Form { .. })
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// An action waiting on its confirmation modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Save { category: WineCategory },
    Delete { category: WineCategory, id: DocId },
    Exit,
}

impl PendingAction {
    pub fn title(&self) -> &'static str {
        match self {
            PendingAction::Save { .. } => "Sei sicuro?",
            PendingAction::Delete { .. } => "SEI SICURO?",
            PendingAction::Exit => "Vuoi uscire?",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            PendingAction::Save { .. } => "Una volta salvato, tutti i valori saranno resettati!",
            PendingAction::Delete { .. } => "Questa azione non può essere annullata!",
            PendingAction::Exit => "L'applicazione verrà chiusa.",
        }
    }

    pub fn confirm_label(&self) -> &'static str {
        match self {
            PendingAction::Save { .. } => "Salva",
            PendingAction::Delete { .. } => "ELIMINA",
            PendingAction::Exit => "Esci",
        }
    }

    pub fn cancel_label(&self) -> &'static str {
        "Annulla"
    }
}

/// What a confirmed modal ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Inserted {
        category: WineCategory,
        id: DocId,
    },
    Updated {
        category: WineCategory,
        id: DocId,
        applied: bool,
    },
    Deleted {
        category: WineCategory,
        id: DocId,
    },
    DeleteFailed {
        category: WineCategory,
        id: DocId,
        reason: String,
    },
    ExitConfirmed,
}

pub struct NavigationController {
    stores: RecordStores,
    screens: FormScreens,
    session: Session,
    screen: Screen,
    archive: Option<ArchiveView>,
    pending: Option<PendingAction>,
    running: bool,
}

impl NavigationController {
    pub fn new(stores: RecordStores) -> Self {
        Self {
            stores,
            screens: FormScreens::new(),
            session: Session::new(),
            screen: Screen::Welcome,
            archive: None,
            pending: None,
            running: true,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn pending(&self) -> Option<PendingAction> {
        self.pending
    }

    pub fn archive(&self) -> Option<&ArchiveView> {
        self.archive.as_ref()
    }

    pub fn stores(&self) -> &RecordStores {
        &self.stores
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The form screen currently shown, if any.
    pub fn form_screen(&self) -> Option<&FormScreen> {
        match self.screen {
            Screen::Form { category, step } => self.screens.get(category, step),
            _ => None,
        }
    }

    /// Welcome → category selection.
    pub fn start(&mut self) -> Result<()> {
        self.ensure_no_modal()?;
        match self.screen {
            Screen::Welcome => {
                self.go_to(Screen::Selection);
                Ok(())
            }
            other => Err(invalid(format!("cannot start from `{other}`"))),
        }
    }

    /// Opens the first form screen of `category` with a fresh evaluation.
    pub fn begin_tasting(&mut self, category: WineCategory) -> Result<()> {
        self.ensure_no_modal()?;
        if self.screen != Screen::Selection {
            return Err(invalid(format!(
                "a tasting starts from the selection screen, not `{}`",
                self.screen
            )));
        }
        self.session = Session::begin(category);
        self.screens.reset_category(category);
        tracing::info!(category = %category, "new evaluation");
        self.enter_form(category, FormStep::first());
        Ok(())
    }

    pub fn next_step(&mut self) -> Result<()> {
        self.ensure_no_modal()?;
        let (category, step) = self.current_form()?;
        match step.next() {
            Some(next) => {
                self.enter_form(category, next);
                Ok(())
            }
            None => Err(invalid("already on the last screen")),
        }
    }

    /// Steps back; from the first screen this abandons the evaluation.
    pub fn previous_step(&mut self) -> Result<()> {
        self.ensure_no_modal()?;
        let (category, step) = self.current_form()?;
        match step.previous() {
            Some(previous) => self.enter_form(category, previous),
            None => self.abort_evaluation(),
        }
        Ok(())
    }

    /// Forwards a button press on the current form screen.
    ///
    /// Returns whether the button ends up highlighted, or `None` when the
    /// screen has no such button.
    pub fn press(&mut self, container_id: &str, label: &str) -> Result<Option<bool>> {
        self.ensure_no_modal()?;
        let (category, step) = self.current_form()?;
        let Some(screen) = self.screens.get_mut(category, step) else {
            tracing::warn!(category = %category, ?step, "form screen not registered");
            return Ok(None);
        };
        Ok(screen.press(container_id, label, self.session.selections_mut()))
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) -> Result<()> {
        self.ensure_no_modal()?;
        match self.current_form()? {
            (_, FormStep::Info) => {
                self.session.set_text(field, value);
                Ok(())
            }
            (category, step) => Err(invalid(format!(
                "text fields live on the info screen, not `{}`",
                step.screen_name(category)
            ))),
        }
    }

    /// Opens the save confirmation from the info screen.
    pub fn request_save(&mut self) -> Result<()> {
        self.ensure_no_modal()?;
        match self.current_form()? {
            (category, FormStep::Info) => {
                self.pending = Some(PendingAction::Save { category });
                Ok(())
            }
            _ => Err(invalid("saving is only offered on the info screen")),
        }
    }

    /// Opens the delete confirmation for an archived record.
    pub fn request_delete(&mut self, id: DocId) -> Result<()> {
        self.ensure_no_modal()?;
        let category = self.current_archive()?;
        self.ensure_listed(category, id)?;
        self.pending = Some(PendingAction::Delete { category, id });
        Ok(())
    }

    /// Runs the action behind the open confirmation modal.
    pub fn confirm(&mut self) -> Result<ConfirmOutcome> {
        let action = self
            .pending
            .take()
            .ok_or_else(|| invalid("no confirmation is pending"))?;
        match action {
            PendingAction::Save { category } => self.save(category),
            PendingAction::Delete { category, id } => Ok(self.delete(category, id)),
            PendingAction::Exit => {
                self.running = false;
                tracing::info!("exit confirmed");
                Ok(ConfirmOutcome::ExitConfirmed)
            }
        }
    }

    /// Closes the open modal without acting. Returns whether one was open.
    pub fn dismiss(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Global back key.
    pub fn back(&mut self) {
        if self.dismiss() {
            return;
        }
        match self.screen {
            Screen::Welcome | Screen::Selection => self.pending = Some(PendingAction::Exit),
            Screen::Form { .. } => self.abort_evaluation(),
            Screen::Archive(_) => {
                self.archive = None;
                self.go_to(Screen::Selection);
            }
        }
    }

    /// Main menu: show the archive of `category`.
    pub fn open_archive(&mut self, category: WineCategory) -> Result<()> {
        self.pending = None;
        if self.screen.is_form() {
            self.abort_evaluation();
        }
        let mut view = ArchiveView::new(category);
        view.reload(self.stores.store(category))?;
        self.archive = Some(view);
        self.go_to(Screen::Archive(category));
        Ok(())
    }

    /// Main menu: back to the category selection.
    pub fn go_to_tasting(&mut self) {
        self.pending = None;
        if self.screen.is_form() {
            self.abort_evaluation();
        } else {
            self.archive = None;
            self.go_to(Screen::Selection);
        }
    }

    /// Main menu: leave immediately.
    pub fn quit(&mut self) {
        self.pending = None;
        self.running = false;
        tracing::info!("exit requested from menu");
    }

    pub fn open_detail(&mut self, id: DocId) -> Result<&RecordDetail> {
        self.ensure_no_modal()?;
        let category = self.current_archive()?;
        self.archive
            .as_mut()
            .and_then(|view| view.open_detail(id))
            .ok_or(TastingError::RecordNotFound { category, id })
    }

    pub fn close_detail(&mut self) {
        if let Some(view) = self.archive.as_mut() {
            view.close_detail();
        }
    }

    /// Loads archived record `id` into a new session and opens its first
    /// form screen.
    pub fn start_edit(&mut self, id: DocId) -> Result<()> {
        self.ensure_no_modal()?;
        let category = self.current_archive()?;
        let record = self
            .stores
            .store(category)
            .get(id)?
            .ok_or(TastingError::RecordNotFound { category, id })?;
        self.close_detail();
        self.archive = None;
        self.session = Session::for_edit(category, id, &record);
        self.screens.reset_category(category);
        tracing::info!(category = %category, id, "editing record");
        self.enter_form(category, FormStep::first());
        Ok(())
    }

    /// Leaves the form sequence, discarding the evaluation and any edit.
    pub fn abort_evaluation(&mut self) {
        if let Some(category) = self.session.category() {
            self.screens.reset_category(category);
            tracing::debug!(
                category = %category,
                editing = self.session.is_editing(),
                "evaluation discarded"
            );
        }
        self.session = Session::new();
        self.pending = None;
        self.go_to(Screen::Selection);
    }

    fn save(&mut self, category: WineCategory) -> Result<ConfirmOutcome> {
        let record = self.session.build_record(category);
        let outcome = match self.session.edit() {
            Some(edit) => {
                let applied = self.stores.store_mut(edit.category).update(edit.id, record)?;
                ConfirmOutcome::Updated {
                    category: edit.category,
                    id: edit.id,
                    applied,
                }
            }
            None => {
                let id = self.stores.store_mut(category).insert(record)?;
                ConfirmOutcome::Inserted { category, id }
            }
        };

        self.session = Session::new();
        self.screens.reset_category(category);
        match outcome {
            ConfirmOutcome::Updated { category, .. } => self.open_archive(category)?,
            _ => self.go_to(Screen::Selection),
        }
        Ok(outcome)
    }

    fn delete(&mut self, category: WineCategory, id: DocId) -> ConfirmOutcome {
        match self.stores.store_mut(category).remove(id) {
            Ok(()) => {
                if let Some(view) = self.archive.as_mut() {
                    view.close_detail();
                    if let Err(err) = view.reload(self.stores.store(category)) {
                        tracing::warn!(category = %category, error = %err, "archive reload failed");
                    }
                }
                ConfirmOutcome::Deleted { category, id }
            }
            Err(err) => {
                tracing::warn!(category = %category, id, error = %err, "delete failed");
                ConfirmOutcome::DeleteFailed {
                    category,
                    id,
                    reason: err.to_string(),
                }
            }
        }
    }

    fn enter_form(&mut self, category: WineCategory, step: FormStep) {
        if let Some(screen) = self.screens.get_mut(category, step) {
            screen.reset_highlights();
            screen.apply_selections(self.session.selections());
        }
        self.go_to(Screen::Form { category, step });
    }

    fn go_to(&mut self, screen: Screen) {
        tracing::debug!(from = %self.screen, to = %screen, "navigate");
        self.screen = screen;
    }

    fn current_form(&self) -> Result<(WineCategory, FormStep)> {
        match self.screen {
            Screen::Form { category, step } => Ok((category, step)),
            other => Err(invalid(format!("`{other}` is not a form screen"))),
        }
    }

    fn current_archive(&self) -> Result<WineCategory> {
        match self.screen {
            Screen::Archive(category) => Ok(category),
            other => Err(invalid(format!("`{other}` is not an archive screen"))),
        }
    }

    fn ensure_listed(&self, category: WineCategory, id: DocId) -> Result<()> {
        let listed = self
            .archive
            .as_ref()
            .is_some_and(|view| view.entry(id).is_some());
        if listed {
            Ok(())
        } else {
            Err(TastingError::RecordNotFound { category, id })
        }
    }

    fn ensure_no_modal(&self) -> Result<()> {
        match self.pending {
            Some(action) => Err(invalid(format!(
                "`{}` is waiting for confirmation",
                action.title()
            ))),
            None => Ok(()),
        }
    }
}

fn invalid(message: impl Into<String>) -> TastingError {
    TastingError::InvalidState(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{FieldValue, WineRecord},
        storage::RecordStore,
    };
    use tempfile::TempDir;

    fn controller() -> (NavigationController, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let stores =
            RecordStores::open_json(Some(temp.path().to_path_buf()), 3).expect("open stores");
        (NavigationController::new(stores), temp)
    }

    fn at_selection() -> (NavigationController, TempDir) {
        let (mut nav, temp) = controller();
        nav.start().expect("start");
        (nav, temp)
    }

    fn walk_to_info(nav: &mut NavigationController) {
        while nav.screen()
            != (Screen::Form {
                category: nav.session().category().expect("category"),
                step: FormStep::Info,
            })
        {
            nav.next_step().expect("next");
        }
    }

    fn highlighted(nav: &NavigationController, container: &str) -> Vec<String> {
        nav.form_screen()
            .and_then(|screen| screen.group(container))
            .map(|group| {
                group
                    .highlighted_labels()
                    .into_iter()
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn new_red_evaluation_is_saved_with_full_schema() {
        let (mut nav, _guard) = at_selection();
        nav.begin_tasting(WineCategory::Red).expect("begin");
        nav.press("colore_rosso_box", "Rubino").expect("press");
        nav.next_step().expect("next");
        nav.press("profumo_primari_rosso_box", "Fruttato").expect("press");
        nav.press("profumo_secondari_rosso_box", "Vaniglia").expect("press");
        walk_to_info(&mut nav);
        nav.set_text(TextField::Name, "X").expect("text");
        nav.request_save().expect("save");

        let outcome = nav.confirm().expect("confirm");
        assert_eq!(
            outcome,
            ConfirmOutcome::Inserted {
                category: WineCategory::Red,
                id: 1
            }
        );
        assert_eq!(nav.screen(), Screen::Selection);
        assert!(nav.session().selections().is_empty());

        let (_, record) = nav
            .stores()
            .store(WineCategory::Red)
            .all()
            .expect("all")
            .remove(0);
        assert_eq!(record.len(), 18);
        assert_eq!(record.text("nome_rosso"), "X");
        assert_eq!(record.text("colore_rosso"), "Rubino");
        assert_eq!(
            record.get("profumo_rosso"),
            Some(&FieldValue::Multiple(vec![
                "Fruttato".into(),
                "Vaniglia".into()
            ]))
        );
        assert_eq!(record.text("limpidezza_rosso"), "");
    }

    #[test]
    fn editing_updates_in_place_and_returns_to_archive() {
        let (mut nav, _guard) = at_selection();
        nav.begin_tasting(WineCategory::Red).expect("begin");
        nav.press("colore_rosso_box", "Rubino").expect("press");
        walk_to_info(&mut nav);
        nav.set_text(TextField::Name, "X").expect("text");
        nav.request_save().expect("save");
        nav.confirm().expect("confirm");

        nav.open_archive(WineCategory::Red).expect("archive");
        nav.start_edit(1).expect("edit");
        assert_eq!(nav.session().save_label(), "Aggiorna");
        assert_eq!(highlighted(&nav, "colore_rosso_box"), ["Rubino"]);

        nav.press("colore_rosso_box", "Granato").expect("press");
        walk_to_info(&mut nav);
        nav.request_save().expect("save");
        let outcome = nav.confirm().expect("confirm");
        assert_eq!(
            outcome,
            ConfirmOutcome::Updated {
                category: WineCategory::Red,
                id: 1,
                applied: true
            }
        );
        assert_eq!(nav.screen(), Screen::Archive(WineCategory::Red));

        let records = nav.stores().store(WineCategory::Red).all().expect("all");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, 1);
        assert_eq!(records[0].1.text("colore_rosso"), "Granato");
        assert_eq!(records[0].1.text("nome_rosso"), "X");
        assert!(!nav.session().is_editing());
    }

    #[test]
    fn confirmed_delete_reloads_the_archive() {
        let (mut nav, _guard) = at_selection();
        for name in ["A", "B"] {
            nav.begin_tasting(WineCategory::White).expect("begin");
            walk_to_info(&mut nav);
            nav.set_text(TextField::Name, name).expect("text");
            nav.request_save().expect("save");
            nav.confirm().expect("confirm");
        }

        nav.open_archive(WineCategory::White).expect("archive");
        assert_eq!(nav.archive().expect("view").entries().len(), 2);
        nav.open_detail(2).expect("detail");
        nav.request_delete(2).expect("delete");
        let outcome = nav.confirm().expect("confirm");

        assert_eq!(
            outcome,
            ConfirmOutcome::Deleted {
                category: WineCategory::White,
                id: 2
            }
        );
        let view = nav.archive().expect("view");
        assert_eq!(view.entries().len(), 1);
        assert!(view.detail().is_none());
        assert_eq!(nav.screen(), Screen::Archive(WineCategory::White));
    }

    #[test]
    fn dismissing_confirmation_changes_nothing() {
        let (mut nav, _guard) = at_selection();
        nav.begin_tasting(WineCategory::Rose).expect("begin");
        nav.press("limpidezza_rosato_box", "Brillante").expect("press");
        walk_to_info(&mut nav);
        nav.request_save().expect("save");
        let before = nav.session().selections().clone();

        assert!(nav.dismiss());
        assert!(nav.pending().is_none());
        assert_eq!(nav.session().selections(), &before);
        assert_eq!(
            nav.screen(),
            Screen::Form {
                category: WineCategory::Rose,
                step: FormStep::Info
            }
        );
        assert!(nav
            .stores()
            .store(WineCategory::Rose)
            .all()
            .expect("all")
            .is_empty());
    }

    #[test]
    fn back_inside_form_discards_evaluation_and_edit() {
        let (mut nav, _guard) = at_selection();
        nav.begin_tasting(WineCategory::Red).expect("begin");
        nav.press("colore_rosso_box", "Porpora").expect("press");
        nav.back();

        assert_eq!(nav.screen(), Screen::Selection);
        assert!(nav.session().selections().is_empty());
        assert!(!nav.session().is_editing());

        nav.begin_tasting(WineCategory::Red).expect("begin");
        assert!(highlighted(&nav, "colore_rosso_box").is_empty());
    }

    #[test]
    fn previous_on_first_screen_aborts() {
        let (mut nav, _guard) = at_selection();
        nav.begin_tasting(WineCategory::White).expect("begin");
        nav.previous_step().expect("previous");
        assert_eq!(nav.screen(), Screen::Selection);
    }

    #[test]
    fn returning_to_a_screen_shows_live_selections() {
        let (mut nav, _guard) = at_selection();
        nav.begin_tasting(WineCategory::Red).expect("begin");
        nav.press("limpidezza_rosso_box", "Limpido").expect("press");
        nav.next_step().expect("next");
        nav.previous_step().expect("previous");
        assert_eq!(highlighted(&nav, "limpidezza_rosso_box"), ["Limpido"]);
    }

    #[test]
    fn back_on_selection_asks_before_exiting() {
        let (mut nav, _guard) = at_selection();
        nav.back();
        assert_eq!(nav.pending(), Some(PendingAction::Exit));
        assert!(nav.is_running());
        nav.back();
        assert!(nav.pending().is_none());

        nav.back();
        assert_eq!(nav.confirm().expect("confirm"), ConfirmOutcome::ExitConfirmed);
        assert!(!nav.is_running());
    }

    #[test]
    fn opening_an_archive_from_a_form_aborts_the_evaluation() {
        let (mut nav, _guard) = at_selection();
        nav.begin_tasting(WineCategory::Red).expect("begin");
        nav.press("colore_rosso_box", "Rubino").expect("press");
        nav.open_archive(WineCategory::Red).expect("archive");
        assert!(nav.session().selections().is_empty());
        assert_eq!(nav.screen(), Screen::Archive(WineCategory::Red));
        assert!(nav.archive().expect("view").is_empty());

        nav.back();
        assert_eq!(nav.screen(), Screen::Selection);
    }

    #[test]
    fn actions_are_blocked_while_a_modal_is_open() {
        let (mut nav, _guard) = at_selection();
        nav.begin_tasting(WineCategory::Red).expect("begin");
        walk_to_info(&mut nav);
        nav.request_save().expect("save");
        assert!(matches!(
            nav.set_text(TextField::Name, "late"),
            Err(TastingError::InvalidState(_))
        ));
    }

    #[test]
    fn text_entry_is_rejected_outside_the_info_screen() {
        let (mut nav, _guard) = at_selection();
        nav.begin_tasting(WineCategory::Red).expect("begin");
        assert!(nav.set_text(TextField::Name, "X").is_err());
        assert!(nav.request_save().is_err());
    }

    struct FailingRemove {
        record: WineRecord,
    }

    impl RecordStore for FailingRemove {
        fn insert(&mut self, _record: WineRecord) -> Result<DocId> {
            Ok(1)
        }

        fn update(&mut self, _id: DocId, _record: WineRecord) -> Result<bool> {
            Ok(true)
        }

        fn remove(&mut self, _id: DocId) -> Result<()> {
            Err(TastingError::Storage("disk unavailable".into()))
        }

        fn all(&self) -> Result<Vec<(DocId, WineRecord)>> {
            Ok(vec![(1, self.record.clone())])
        }

        fn get(&self, id: DocId) -> Result<Option<WineRecord>> {
            Ok((id == 1).then(|| self.record.clone()))
        }
    }

    #[test]
    fn failed_delete_dismisses_modal_and_keeps_detail() {
        let failing = || -> Box<dyn RecordStore> {
            Box::new(FailingRemove {
                record: WineRecord::new().with_field("nome_rosso", "Barolo"),
            })
        };
        let mut nav = NavigationController::new(RecordStores::new(failing(), failing(), failing()));
        nav.start().expect("start");
        nav.open_archive(WineCategory::Red).expect("archive");
        nav.open_detail(1).expect("detail");
        nav.request_delete(1).expect("delete");

        let outcome = nav.confirm().expect("confirm");
        assert!(matches!(outcome, ConfirmOutcome::DeleteFailed { id: 1, .. }));
        assert!(nav.pending().is_none());
        let detail = nav.archive().and_then(|view| view.detail()).map(|detail| detail.id);
        assert_eq!(detail, Some(1));
        assert_eq!(nav.archive().expect("view").entries().len(), 1);
        assert_eq!(nav.screen(), Screen::Archive(WineCategory::Red));
    }
}
