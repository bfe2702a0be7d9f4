//! Palette and semantic styles.

use ratatui::style::{Color, Modifier, Style};

use minisoc_core::aggregate::{BadgeKind, RowHighlight};

// ── Palette ───────────────────────────────────────────────────────────

pub const ELECTRIC_PURPLE: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const NEON_CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const CORAL: Color = Color::Rgb(255, 106, 193); // #ff6ac1
pub const ELECTRIC_YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const SUCCESS_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363
pub const LIGHT_BLUE: Color = Color::Rgb(139, 233, 253); // #8be9fd

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29
pub const BG_CRITICAL: Color = Color::Rgb(64, 24, 32);
pub const BG_HIGH: Color = Color::Rgb(58, 48, 24);

/// Bar colors, cycled per entry.
pub const CHART_SERIES: &[Color] = &[NEON_CYAN, CORAL, ELECTRIC_PURPLE, SUCCESS_GREEN, LIGHT_BLUE];

// ── Chrome ────────────────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(ELECTRIC_PURPLE)
}

pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(NEON_CYAN)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(DIM_WHITE)
}

pub fn table_selected() -> Style {
    Style::default()
        .fg(ELECTRIC_PURPLE)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_active() -> Style {
    Style::default()
        .fg(ELECTRIC_PURPLE)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(NEON_CYAN).add_modifier(Modifier::BOLD)
}

pub fn placeholder() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn error_text() -> Style {
    Style::default().fg(ERROR_RED)
}

// ── Severity ──────────────────────────────────────────────────────────

pub fn badge_color(kind: BadgeKind) -> Color {
    match kind {
        BadgeKind::Success => SUCCESS_GREEN,
        BadgeKind::Info => LIGHT_BLUE,
        BadgeKind::Warning => ELECTRIC_YELLOW,
        BadgeKind::Danger => ERROR_RED,
    }
}

/// Row background for critical and high severity attacks.
pub fn row_highlight(highlight: RowHighlight) -> Style {
    match highlight {
        RowHighlight::None => table_row(),
        RowHighlight::High => table_row().bg(BG_HIGH),
        RowHighlight::Critical => table_row().bg(BG_CRITICAL),
    }
}
