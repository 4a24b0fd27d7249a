//! Terminal render target backed by a ratatui frame.

use crate::notifications::Notification;
use crate::state::{AddQuoteForm, FormField, Modal, PathPrompt, QuoteView};
use crate::theme::{category_color, notification_color, SynthBruteTheme};
use crate::traits::RenderTarget;
use crate::views::HeaderModel;
use crate::widgets::{FilterBar, FilterOption, InputField, QuoteCard};
use quoteboard_core::Quote;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

struct Areas {
    header: Rect,
    filter: Rect,
    list: Rect,
    quote: Rect,
    footer: Rect,
}

impl Areas {
    fn split(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(rows[2]);
        Self {
            header: rows[0],
            filter: rows[1],
            list: body[0],
            quote: body[1],
            footer: rows[3],
        }
    }
}

pub struct FrameTarget<'a, 'f> {
    frame: &'a mut Frame<'f>,
    theme: &'a SynthBruteTheme,
    areas: Areas,
}

impl<'a, 'f> FrameTarget<'a, 'f> {
    pub fn new(frame: &'a mut Frame<'f>, theme: &'a SynthBruteTheme) -> Self {
        let areas = Areas::split(frame.size());
        Self {
            frame,
            theme,
            areas,
        }
    }

    fn popup(&mut self, width_percent: u16, height: u16) -> Rect {
        let area = centered_rect(width_percent, height, self.frame.size());
        self.frame.render_widget(Clear, area);
        area
    }

    fn input_field<'v>(
        &self,
        label: &'v str,
        value: &'v str,
        placeholder: &'v str,
        focused: bool,
    ) -> InputField<'v> {
        InputField {
            label,
            value,
            placeholder,
            focused,
            style: Style::default().fg(self.theme.text),
            focus_style: Style::default().fg(self.theme.border_focus),
            placeholder_style: Style::default().fg(self.theme.text_dim),
        }
    }
}

impl RenderTarget for FrameTarget<'_, '_> {
    fn header(&mut self, header: &HeaderModel) {
        let block = Block::default().borders(Borders::ALL).title(Span::styled(
            header.title(),
            Style::default().fg(self.theme.primary),
        ));
        self.frame.render_widget(block, self.areas.header);
    }

    fn filter_control(&mut self, options: &[FilterOption]) {
        let bar = FilterBar {
            title: "Category",
            filters: options,
            active_style: Style::default()
                .fg(self.theme.secondary)
                .add_modifier(Modifier::BOLD),
            inactive_style: Style::default().fg(self.theme.text_dim),
        };
        bar.render(self.frame, self.areas.filter);
    }

    fn quote_list(&mut self, quotes: &[&Quote], selected: Option<usize>) {
        let items: Vec<ListItem> = quotes
            .iter()
            .map(|quote| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("[{}] ", quote.category),
                        Style::default().fg(category_color(&quote.category, self.theme)),
                    ),
                    Span::styled(quote.text.clone(), Style::default().fg(self.theme.text)),
                ]))
            })
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!("Quotes ({})", quotes.len()))
                    .borders(Borders::ALL),
            )
            .highlight_style(Style::default().bg(self.theme.bg_highlight))
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(selected);
        self.frame
            .render_stateful_widget(list, self.areas.list, &mut state);
    }

    fn quote_display(&mut self, view: &QuoteView) {
        let quote = view.quote();
        let category_style = quote
            .map(|q| Style::default().fg(category_color(&q.category, self.theme)))
            .unwrap_or_default();
        let card = QuoteCard {
            title: "Quote",
            quote,
            label_style: Style::default().fg(self.theme.primary),
            category_style,
            empty_style: Style::default().fg(self.theme.text_dim),
        };
        card.render(self.frame, self.areas.quote);
    }

    fn add_form(&mut self, form: &AddQuoteForm) {
        let area = self.popup(60, 10);
        let block = Block::default()
            .title("Add Quote (tab switch • enter save • esc cancel)")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_focus));
        let inner = block.inner(area);
        self.frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
            .split(inner);
        let text = self.input_field(
            "Quote",
            &form.text,
            "Enter a new quote",
            form.focus == FormField::Text,
        );
        text.render(self.frame, rows[0]);
        let category = self.input_field(
            "Category",
            &form.category,
            "Enter quote category",
            form.focus == FormField::Category,
        );
        category.render(self.frame, rows[1]);
    }

    fn prompt(&mut self, prompt: &PathPrompt) {
        let area = self.popup(60, 3);
        let field = self.input_field(
            "Import from JSON file (enter load • esc cancel)",
            &prompt.input,
            "",
            true,
        );
        field.render(self.frame, area);
    }

    fn modal(&mut self, modal: &Modal) {
        let area = self.popup(60, 9);
        let paragraph = Paragraph::new(modal.message.as_str())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(modal.title.as_str())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.border_focus)),
            );
        self.frame.render_widget(paragraph, area);
    }

    fn status_line(&mut self, notification: Option<&Notification>, help: &str) {
        let (text, style) = match notification {
            Some(note) => (
                format!("{}: {}", note.level.label(), note.message),
                Style::default().fg(notification_color(note.level, self.theme)),
            ),
            None => (help.to_string(), Style::default().fg(self.theme.text_dim)),
        };
        let footer = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL))
            .style(style);
        self.frame.render_widget(footer, self.areas.footer);
    }
}

fn centered_rect(width_percent: u16, height: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(width_percent.min(100)) / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
