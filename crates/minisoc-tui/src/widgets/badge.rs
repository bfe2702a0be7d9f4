//! Colored badge cells for status, level and severity columns.

use ratatui::style::{Modifier, Style};
use ratatui::widgets::Cell;

use minisoc_core::aggregate::BadgeKind;

use crate::theme;

pub fn badge_style(kind: BadgeKind) -> Style {
    Style::default()
        .fg(theme::badge_color(kind))
        .add_modifier(Modifier::BOLD)
}

pub fn badge_cell(text: impl Into<String>, kind: BadgeKind) -> Cell<'static> {
    Cell::from(text.into()).style(badge_style(kind))
}
