//! Single-line text input.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct InputField<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub placeholder: &'a str,
    pub focused: bool,
    pub style: Style,
    pub focus_style: Style,
    pub placeholder_style: Style,
}

impl<'a> InputField<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let border_style = if self.focused { self.focus_style } else { self.style };
        let mut spans = if self.value.is_empty() && !self.focused {
            vec![Span::styled(self.placeholder.to_string(), self.placeholder_style)]
        } else {
            vec![Span::styled(self.value.to_string(), self.style)]
        };
        if self.focused {
            spans.push(Span::styled("▏", self.focus_style));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title(self.label)
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        f.render_widget(paragraph, area);
    }
}
