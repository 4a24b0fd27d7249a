//! Category filter bar widget.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub label: String,
    pub active: bool,
}

impl FilterOption {
    /// One option per category, marking the one equal to `active`.
    pub fn from_categories(categories: &[String], active: &str) -> Vec<FilterOption> {
        categories
            .iter()
            .map(|label| FilterOption {
                label: label.clone(),
                active: label == active,
            })
            .collect()
    }
}

pub struct FilterBar<'a> {
    pub title: &'a str,
    pub filters: &'a [FilterOption],
    pub active_style: Style,
    pub inactive_style: Style,
}

impl<'a> FilterBar<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut spans: Vec<Span> = Vec::with_capacity(self.filters.len() * 2);
        for (index, filter) in self.filters.iter().enumerate() {
            if index > 0 {
                spans.push(Span::styled("│", self.inactive_style));
            }
            let (label, style) = if filter.active {
                (format!("[{}]", filter.label), self.active_style)
            } else {
                (format!(" {} ", filter.label), self.inactive_style)
            };
            spans.push(Span::styled(label, style));
        }

        let paragraph = Paragraph::new(Line::from(spans))
            .block(Block::default().title(self.title).borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_only_the_active_category() {
        let categories = vec!["all".to_string(), "Life".to_string()];
        let options = FilterOption::from_categories(&categories, "Life");
        assert_eq!(options.iter().filter(|o| o.active).count(), 1);
        assert!(options[1].active);
    }
}
