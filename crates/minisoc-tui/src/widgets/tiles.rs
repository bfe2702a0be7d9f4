//! Stat tiles: a row of bordered boxes with a label and a big number.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::theme;

pub struct Tile {
    pub label: &'static str,
    pub value: String,
    pub color: Color,
}

impl Tile {
    pub fn new(label: &'static str, value: impl Into<String>, color: Color) -> Self {
        Self {
            label,
            value: value.into(),
            color,
        }
    }
}

/// Placeholder value for a tile whose stats have not arrived.
pub const NO_VALUE: &str = "—";

pub fn render_tiles(frame: &mut Frame, area: Rect, tiles: &[Tile]) {
    if tiles.is_empty() {
        return;
    }
    let areas = Layout::horizontal(tiles.iter().map(|_| Constraint::Fill(1))).split(area);
    for (tile, &cell) in tiles.iter().zip(areas.iter()) {
        let block = Block::default()
            .title(format!(" {} ", tile.label))
            .title_style(Style::default().fg(theme::DIM_WHITE))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let value = Paragraph::new(tile.value.clone())
            .style(Style::default().fg(tile.color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(value, cell);
    }
}
