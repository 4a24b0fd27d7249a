//! Application state and view state definitions.
//!
//! `App` owns the quote library and every piece of view state. It never does
//! I/O beyond the stores and the export file; network and import reads are
//! requested from the caller through [`Command`].

use crate::config::TuiConfig;
use crate::keys::{map_key, map_text_key, Action, TextInput};
use crate::notifications::{Notification, NotificationLevel};
use crate::theme::SynthBruteTheme;
use crate::transfer::{self, TransferError};
use chrono::{DateTime, Utc};
use crossterm::event::KeyEvent;
use quoteboard_core::{CategoryFilter, MergeReport, Quote, SyncError};
use quoteboard_storage::{KeyValueStore, LibraryError, QuoteLibrary, SessionState};
use rand::seq::IndexedRandom;
use std::path::PathBuf;
use std::sync::Arc;

pub const HELP_TEXT: &str = "space/r random quote • enter show selected • j/k move • [ ] filter • \
a add quote • e export • i import • s sync • ctrl-r reload • q quit";

/// Work the event loop must carry out on behalf of the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Push(Vec<Quote>),
    Sync,
    ReadImport(PathBuf),
    Quit,
}

/// What the quote panel shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QuoteView {
    #[default]
    Idle,
    Displaying(Quote),
}

impl QuoteView {
    pub fn quote(&self) -> Option<&Quote> {
        match self {
            QuoteView::Idle => None,
            QuoteView::Displaying(quote) => Some(quote),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Text,
    Category,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Editing,
    Submit,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddQuoteForm {
    pub text: String,
    pub category: String,
    pub focus: FormField,
}

impl AddQuoteForm {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            category: category.into(),
            focus: FormField::Text,
        }
    }

    pub fn apply(&mut self, input: TextInput) -> FormOutcome {
        let field = match self.focus {
            FormField::Text => &mut self.text,
            FormField::Category => &mut self.category,
        };
        match input {
            TextInput::Char(c) => field.push(c),
            TextInput::Backspace => {
                field.pop();
            }
            TextInput::NextField => {
                self.focus = match self.focus {
                    FormField::Text => FormField::Category,
                    FormField::Category => FormField::Text,
                };
            }
            TextInput::Submit => return FormOutcome::Submit,
            TextInput::Cancel => return FormOutcome::Cancel,
        }
        FormOutcome::Editing
    }
}

/// Path entry for imports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathPrompt {
    pub input: String,
}

impl PathPrompt {
    pub fn apply(&mut self, input: TextInput) -> FormOutcome {
        match input {
            TextInput::Char(c) => self.input.push(c),
            TextInput::Backspace => {
                self.input.pop();
            }
            TextInput::NextField => {}
            TextInput::Submit => return FormOutcome::Submit,
            TextInput::Cancel => return FormOutcome::Cancel,
        }
        FormOutcome::Editing
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct SyncStatus {
    pub in_flight: bool,
    pub manual_pending: bool,
    pub last_synced: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

pub struct App {
    pub config: TuiConfig,
    pub theme: SynthBruteTheme,
    pub library: QuoteLibrary,
    pub session: SessionState,
    pub filter: CategoryFilter,
    pub quote_view: QuoteView,
    /// Highlighted row in the filtered list.
    pub selected: Option<usize>,
    pub form: Option<AddQuoteForm>,
    pub prompt: Option<PathPrompt>,
    pub modal: Option<Modal>,
    pub notifications: Vec<Notification>,
    pub sync: SyncStatus,
    durable: Arc<dyn KeyValueStore>,
}

impl App {
    pub fn new(
        config: TuiConfig,
        durable: Arc<dyn KeyValueStore>,
        session_store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let library = QuoteLibrary::load(Arc::clone(&durable));
        let mut app = Self {
            config,
            theme: SynthBruteTheme::synthbrute(),
            library,
            session: SessionState::new(session_store),
            filter: CategoryFilter::All,
            quote_view: QuoteView::Idle,
            selected: None,
            form: None,
            prompt: None,
            modal: None,
            notifications: Vec::new(),
            sync: SyncStatus::default(),
            durable,
        };
        app.restore_view();
        app
    }

    /// Drop in-memory state and load again from the durable store. The
    /// session store is kept, so the last viewed quote comes back.
    pub fn reload(&mut self) {
        self.library = QuoteLibrary::load(Arc::clone(&self.durable));
        self.form = None;
        self.prompt = None;
        self.modal = None;
        self.restore_view();
        self.notify(NotificationLevel::Info, "Reloaded from storage.");
    }

    fn restore_view(&mut self) {
        self.filter = self.library.selected_category();
        self.selected = None;
        match self.session.last_viewed() {
            Some(quote) => {
                if !self.filter.matches(&quote) {
                    tracing::debug!(
                        filter = %self.filter,
                        category = %quote.category,
                        "Restored quote is outside the saved filter, showing all"
                    );
                    self.filter = CategoryFilter::All;
                    if let Err(err) = self.library.set_selected_category(&self.filter) {
                        tracing::warn!(error = %err, "Failed to persist selected category");
                    }
                }
                self.selected = self.position_in_view(&quote);
                self.quote_view = QuoteView::Displaying(quote);
            }
            None => self.show_random(),
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    pub fn last_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    /// Quotes passing the active filter.
    pub fn visible_quotes(&self) -> Vec<&Quote> {
        self.library.by_category(&self.filter)
    }

    pub fn categories(&self) -> Vec<String> {
        self.library.categories()
    }

    fn position_in_view(&self, quote: &Quote) -> Option<usize> {
        self.visible_quotes()
            .iter()
            .position(|q| q.same_identity(quote) && q.category == quote.category)
    }

    // ------------------------------------------------------------------------
    // Input routing
    // ------------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if self.modal.is_some() {
            self.modal = None;
            return None;
        }
        if self.form.is_some() || self.prompt.is_some() {
            return map_text_key(key).and_then(|input| self.handle_text_input(input));
        }
        map_key(key).and_then(|action| self.handle_action(action))
    }

    pub fn handle_action(&mut self, action: Action) -> Option<Command> {
        match action {
            Action::Quit => return Some(Command::Quit),
            Action::ShowRandom => self.show_random(),
            Action::ShowSelected => self.show_selected(),
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => self.move_selection(1),
            Action::PrevFilter => self.cycle_filter(-1),
            Action::NextFilter => self.cycle_filter(1),
            Action::OpenAddForm => {
                let category = match &self.filter {
                    CategoryFilter::All => String::new(),
                    CategoryFilter::Category(name) => name.clone(),
                };
                self.form = Some(AddQuoteForm::new(category));
            }
            Action::Export => self.export(),
            Action::OpenImport => self.prompt = Some(PathPrompt::default()),
            Action::Sync => {
                self.sync.manual_pending = true;
                return Some(Command::Sync);
            }
            Action::Reload => self.reload(),
            Action::OpenHelp => {
                self.modal = Some(Modal {
                    title: "Keybindings".to_string(),
                    message: HELP_TEXT.to_string(),
                })
            }
            Action::Cancel => self.modal = None,
        }
        None
    }

    pub fn handle_text_input(&mut self, input: TextInput) -> Option<Command> {
        if let Some(form) = self.form.as_mut() {
            return match form.apply(input) {
                FormOutcome::Editing => None,
                FormOutcome::Cancel => {
                    self.form = None;
                    None
                }
                FormOutcome::Submit => self.submit_form(),
            };
        }
        if let Some(prompt) = self.prompt.as_mut() {
            return match prompt.apply(input) {
                FormOutcome::Editing => None,
                FormOutcome::Cancel => {
                    self.prompt = None;
                    None
                }
                FormOutcome::Submit => {
                    let path = prompt.input.trim().to_string();
                    if path.is_empty() {
                        self.notify(NotificationLevel::Error, "Enter the path of a JSON file.");
                        return None;
                    }
                    self.prompt = None;
                    Some(Command::ReadImport(PathBuf::from(path)))
                }
            };
        }
        None
    }

    // ------------------------------------------------------------------------
    // Quote view
    // ------------------------------------------------------------------------

    pub fn show_random(&mut self) {
        let picked = {
            let candidates = self.visible_quotes();
            candidates.choose(&mut rand::rng()).map(|q| (*q).clone())
        };
        match picked {
            Some(quote) => self.display(quote),
            None => {
                self.quote_view = QuoteView::Idle;
                self.selected = None;
            }
        }
    }

    fn show_selected(&mut self) {
        let quote = self
            .selected
            .and_then(|index| self.visible_quotes().get(index).map(|q| (*q).clone()));
        if let Some(quote) = quote {
            self.display(quote);
        }
    }

    /// Show a quote and record it as the last viewed one.
    fn display(&mut self, quote: Quote) {
        if let Err(err) = self.session.remember(&quote) {
            tracing::warn!(error = %err, "Failed to remember last viewed quote");
        }
        self.selected = self.position_in_view(&quote);
        self.quote_view = QuoteView::Displaying(quote);
    }

    fn move_selection(&mut self, step: isize) {
        let len = self.visible_quotes().len();
        if len == 0 {
            self.selected = None;
            return;
        }
        let next = match self.selected {
            Some(current) => (current as isize + step).rem_euclid(len as isize) as usize,
            None if step < 0 => len - 1,
            None => 0,
        };
        self.selected = Some(next);
    }

    fn cycle_filter(&mut self, step: isize) {
        let categories = self.categories();
        let current = categories
            .iter()
            .position(|c| c == self.filter.as_str())
            .unwrap_or(0);
        let next = (current as isize + step).rem_euclid(categories.len() as isize) as usize;
        self.apply_filter(CategoryFilter::parse(&categories[next]));
    }

    /// Switch the filter, persist it and show a quote from the new set.
    pub fn apply_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        if let Err(err) = self.library.set_selected_category(&self.filter) {
            tracing::warn!(error = %err, "Failed to persist selected category");
            self.notify(
                NotificationLevel::Warning,
                format!("Filter not saved: {}", err),
            );
        }
        self.selected = None;
        self.show_random();
    }

    /// Re-derive the view after the collection changed.
    fn refresh_view(&mut self) {
        if let CategoryFilter::Category(name) = &self.filter {
            if !self.library.quotes().has_category(name) {
                self.apply_filter(CategoryFilter::All);
                return;
            }
        }

        if let Some(current) = self.quote_view.quote().cloned() {
            let fresh = self
                .library
                .quotes()
                .find_same(&current)
                .filter(|q| self.filter.matches(q))
                .cloned();
            match fresh {
                Some(fresh) if fresh == current => {
                    self.selected = self.position_in_view(&fresh);
                }
                Some(fresh) => self.display(fresh),
                None => self.show_random(),
            }
        }

        let len = self.visible_quotes().len();
        if self.selected.is_some_and(|i| i >= len) {
            self.selected = None;
        }
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    fn submit_form(&mut self) -> Option<Command> {
        let (text, category) = match &self.form {
            Some(form) => (form.text.clone(), form.category.clone()),
            None => return None,
        };
        match self.library.add(&text, &category) {
            Ok(quote) => {
                self.form = None;
                self.notify(NotificationLevel::Success, "New quote added successfully!");
                self.refresh_view();
                Some(Command::Push(vec![quote]))
            }
            Err(LibraryError::Validation(err)) => {
                tracing::debug!(error = %err, "Rejected new quote");
                self.notify(NotificationLevel::Error, "Please fill out both fields.");
                None
            }
            Err(LibraryError::Storage(err)) => {
                tracing::warn!(error = %err, "Quote added but not persisted");
                self.form = None;
                self.notify(
                    NotificationLevel::Warning,
                    format!("Quote added but could not be saved: {}", err),
                );
                self.refresh_view();
                self.library.all().last().cloned().map(|q| Command::Push(vec![q]))
            }
        }
    }

    fn export(&mut self) {
        match transfer::export_collection(self.library.quotes(), &self.config.export_dir) {
            Ok(path) => {
                tracing::info!(path = %path.display(), count = self.library.len(), "Exported quotes");
                self.notify(
                    NotificationLevel::Success,
                    format!("Exported {} quotes to {}", self.library.len(), path.display()),
                );
            }
            Err(err) => {
                tracing::warn!(error = %err, "Export failed");
                self.notify(NotificationLevel::Error, format!("Export failed: {}", err));
            }
        }
    }

    /// Validate and append the contents of an import file.
    pub fn apply_import(
        &mut self,
        path: PathBuf,
        contents: Result<String, TransferError>,
    ) -> Option<Command> {
        let quotes = match contents.and_then(|c| transfer::parse_import(&c)) {
            Ok(quotes) => quotes,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Import rejected");
                self.notify(NotificationLevel::Error, format!("Import failed: {}", err));
                return None;
            }
        };

        let count = quotes.len();
        if let Err(err) = self.library.import(quotes.clone()) {
            tracing::warn!(error = %err, "Imported quotes not persisted");
            self.notify(
                NotificationLevel::Warning,
                format!("Imported quotes could not be saved: {}", err),
            );
        } else {
            tracing::info!(path = %path.display(), count, "Imported quotes");
            self.notify(
                NotificationLevel::Success,
                format!("Quotes imported successfully! ({} added)", count),
            );
        }
        self.refresh_view();
        if quotes.is_empty() {
            None
        } else {
            Some(Command::Push(quotes))
        }
    }

    /// Merge a fetched remote snapshot, or report the fetch failure.
    pub fn apply_sync_result(&mut self, result: Result<Vec<Quote>, SyncError>) {
        let manual = std::mem::take(&mut self.sync.manual_pending);
        let remote = match result {
            Ok(remote) => remote,
            Err(err) => {
                self.sync.last_error = Some(err.to_string());
                self.notify(NotificationLevel::Error, format!("Sync failed: {}", err));
                return;
            }
        };

        let fetched = remote.len();
        let before = self.library.quotes().clone();
        match self.library.merge(remote) {
            Ok(report) => {
                tracing::info!(
                    fetched,
                    updated = report.updated,
                    appended = report.appended,
                    "Synced with remote"
                );
                self.sync.last_synced = Some(Utc::now());
                self.sync.last_error = None;
                if report.changed() || manual {
                    self.notify(NotificationLevel::Success, sync_summary(&report));
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Merged remote quotes not persisted");
                self.sync.last_error = Some(err.to_string());
                self.notify(
                    NotificationLevel::Warning,
                    format!("Synced but could not save: {}", err),
                );
            }
        }
        if *self.library.quotes() != before {
            self.refresh_view();
        }
    }

    pub fn apply_push_result(&mut self, count: usize, result: Result<serde_json::Value, SyncError>) {
        match result {
            Ok(_) => tracing::info!(count, "Pushed quotes to remote"),
            Err(err) => self.notify(
                NotificationLevel::Error,
                format!("Could not send {} quote(s) to the server: {}", count, err),
            ),
        }
    }
}

fn sync_summary(report: &MergeReport) -> String {
    if report.changed() {
        format!(
            "Quotes synced with server: {} updated, {} new.",
            report.updated, report.appended
        )
    } else {
        "Quotes synced with server: already up to date.".to_string()
    }
}
