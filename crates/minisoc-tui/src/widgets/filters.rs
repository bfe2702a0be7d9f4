//! The filter summary line shown above each log table.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::theme;

/// One editable filter: its key, label and current draft value.
pub struct FilterField<'a> {
    pub key: char,
    pub label: &'a str,
    pub value: Option<String>,
}

impl<'a> FilterField<'a> {
    pub fn new(key: char, label: &'a str, value: Option<String>) -> Self {
        Self { key, label, value }
    }

    pub fn toggle(key: char, label: &'a str, on: bool) -> Self {
        Self::new(key, label, on.then(|| "on".to_owned()))
    }
}

/// `s Status: failed  f Suspicious: any  ...`, flagged when the draft
/// differs from the filters last applied.
pub fn filter_line(fields: &[FilterField<'_>], pending: bool) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for field in fields {
        spans.push(Span::styled(format!("{} ", field.key), theme::key_hint_key()));
        spans.push(Span::styled(format!("{}: ", field.label), theme::key_hint()));
        let (text, style) = match &field.value {
            Some(v) => (v.clone(), Style::default().fg(theme::NEON_CYAN)),
            None => ("any".to_owned(), Style::default().fg(theme::DIM_WHITE)),
        };
        spans.push(Span::styled(format!("{text}  "), style));
    }
    if pending {
        spans.push(Span::styled(
            "● Enter to apply",
            Style::default().fg(theme::ELECTRIC_YELLOW),
        ));
    }
    Line::from(spans)
}
