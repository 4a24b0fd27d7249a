//! View rendering dispatch.

pub mod frame;

pub use frame::FrameTarget;

use crate::state::{App, HELP_TEXT};
use crate::traits::RenderTarget;
use crate::widgets::FilterOption;

/// Summary line shown above the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderModel {
    pub quote_count: usize,
    pub filter: String,
    pub sync: String,
}

impl HeaderModel {
    pub fn from_app(app: &App) -> Self {
        let sync = if app.sync.in_flight {
            "Sync: in progress".to_string()
        } else if let Some(err) = &app.sync.last_error {
            format!("Sync: failed ({})", err)
        } else if let Some(at) = app.sync.last_synced {
            format!("Sync: {}", at.format("%H:%M:%S"))
        } else {
            "Sync: pending".to_string()
        };
        Self {
            quote_count: app.library.len(),
            filter: app.filter.to_string(),
            sync,
        }
    }

    pub fn title(&self) -> String {
        format!(
            "QUOTEBOARD | {} quotes | Filter: {} | {}",
            self.quote_count, self.filter, self.sync
        )
    }
}

/// Drive one full render of `app` into `target`. Overlays are issued last.
pub fn render_view<T: RenderTarget + ?Sized>(target: &mut T, app: &App) {
    target.header(&HeaderModel::from_app(app));

    let options = FilterOption::from_categories(&app.categories(), app.filter.as_str());
    target.filter_control(&options);

    let visible = app.visible_quotes();
    target.quote_list(&visible, app.selected);
    target.quote_display(&app.quote_view);
    target.status_line(app.last_notification(), HELP_TEXT);

    if let Some(form) = &app.form {
        target.add_form(form);
    }
    if let Some(prompt) = &app.prompt {
        target.prompt(prompt);
    }
    if let Some(modal) = &app.modal {
        target.modal(modal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::keys::Action;
    use crate::notifications::Notification;
    use crate::state::{AddQuoteForm, Modal, PathPrompt, QuoteView};
    use quoteboard_core::{CategoryFilter, Quote};
    use quoteboard_storage::MemoryStore;
    use std::sync::Arc;

    #[derive(Default)]
    struct RecordingTarget {
        calls: Vec<&'static str>,
        header: Option<HeaderModel>,
        options: Vec<FilterOption>,
        listed: Vec<Quote>,
        shown: Option<QuoteView>,
        status: Option<String>,
    }

    impl RenderTarget for RecordingTarget {
        fn header(&mut self, header: &HeaderModel) {
            self.calls.push("header");
            self.header = Some(header.clone());
        }

        fn filter_control(&mut self, options: &[FilterOption]) {
            self.calls.push("filter");
            self.options = options.to_vec();
        }

        fn quote_list(&mut self, quotes: &[&Quote], _selected: Option<usize>) {
            self.calls.push("list");
            self.listed = quotes.iter().map(|q| (*q).clone()).collect();
        }

        fn quote_display(&mut self, view: &QuoteView) {
            self.calls.push("display");
            self.shown = Some(view.clone());
        }

        fn add_form(&mut self, _form: &AddQuoteForm) {
            self.calls.push("form");
        }

        fn prompt(&mut self, _prompt: &PathPrompt) {
            self.calls.push("prompt");
        }

        fn modal(&mut self, _modal: &Modal) {
            self.calls.push("modal");
        }

        fn status_line(&mut self, notification: Option<&Notification>, help: &str) {
            self.calls.push("status");
            self.status = Some(
                notification
                    .map(|n| n.message.clone())
                    .unwrap_or_else(|| help.to_string()),
            );
        }
    }

    fn app() -> App {
        App::new(
            test_config("tmp".into()),
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
        )
    }

    #[test]
    fn renders_filtered_list_and_one_active_option() {
        let mut app = app();
        app.apply_filter(CategoryFilter::from("Life"));

        let mut target = RecordingTarget::default();
        render_view(&mut target, &app);

        assert_eq!(target.calls, ["header", "filter", "list", "display", "status"]);
        assert!(target.listed.iter().all(|q| q.category == "Life"));
        let active: Vec<_> = target.options.iter().filter(|o| o.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].label, "Life");
        assert_eq!(target.options[0].label, "all");
        assert_eq!(target.header.unwrap().filter, "Life");
    }

    #[test]
    fn overlays_render_after_body() {
        let mut app = app();
        app.handle_action(Action::OpenAddForm);
        app.handle_action(Action::OpenHelp);

        let mut target = RecordingTarget::default();
        render_view(&mut target, &app);
        assert_eq!(&target.calls[5..], ["form", "modal"]);
    }

    #[test]
    fn status_prefers_latest_notification() {
        let mut app = app();
        let mut target = RecordingTarget::default();
        render_view(&mut target, &app);
        assert_eq!(target.status.as_deref(), Some(HELP_TEXT));

        app.notify(crate::notifications::NotificationLevel::Info, "hello");
        render_view(&mut target, &app);
        assert_eq!(target.status.as_deref(), Some("hello"));
    }

    #[test]
    fn header_reports_sync_state() {
        let mut app = app();
        assert_eq!(HeaderModel::from_app(&app).sync, "Sync: pending");
        app.sync.in_flight = true;
        assert_eq!(HeaderModel::from_app(&app).sync, "Sync: in progress");
        app.sync.in_flight = false;
        app.sync.last_error = Some("offline".into());
        assert!(HeaderModel::from_app(&app).sync.contains("offline"));
    }
}
