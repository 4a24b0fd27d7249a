//! Quote display card.

use quoteboard_core::Quote;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct QuoteCard<'a> {
    pub title: &'a str,
    pub quote: Option<&'a Quote>,
    pub label_style: Style,
    pub category_style: Style,
    pub empty_style: Style,
}

impl<'a> QuoteCard<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let text = match self.quote {
            Some(quote) => Text::from(vec![
                Line::from(vec![
                    Span::styled("Quote: ", self.label_style.add_modifier(Modifier::BOLD)),
                    Span::raw(quote.text.clone()),
                ]),
                Line::raw(""),
                Line::from(vec![
                    Span::styled("Category: ", self.label_style.add_modifier(Modifier::BOLD)),
                    Span::styled(quote.category.clone(), self.category_style),
                ]),
            ]),
            None => Text::from(Line::styled(
                "No quote to show. Press space for a random quote.",
                self.empty_style,
            )),
        };

        let widget = Paragraph::new(text)
            .block(Block::default().title(self.title).borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(widget, area);
    }
}
