//! Common traits for TUI components

use crate::notifications::Notification;
use crate::state::{AddQuoteForm, Modal, PathPrompt, QuoteView};
use crate::views::HeaderModel;
use crate::widgets::FilterOption;
use quoteboard_core::Quote;

/// Mount points the presentation layer draws into.
///
/// The terminal implementation is [`crate::views::FrameTarget`]; anything
/// else (tests, alternative front ends) can implement this to receive the
/// same render calls without a terminal.
pub trait RenderTarget {
    fn header(&mut self, header: &HeaderModel);

    /// Category selector. Exactly one option is active.
    fn filter_control(&mut self, options: &[FilterOption]);

    /// Quotes passing the active filter, with the highlighted row.
    fn quote_list(&mut self, quotes: &[&Quote], selected: Option<usize>);

    fn quote_display(&mut self, view: &QuoteView);

    fn add_form(&mut self, form: &AddQuoteForm);

    fn prompt(&mut self, prompt: &PathPrompt);

    fn modal(&mut self, modal: &Modal);

    fn status_line(&mut self, notification: Option<&Notification>, help: &str);
}
