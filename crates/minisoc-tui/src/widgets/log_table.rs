//! Shared pieces of the paged log tables: placeholders and the page line.

use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use minisoc_core::{PAGE_SIZE, TableView};

use crate::theme;

/// What to draw instead of the table body, if anything.
pub fn placeholder<R>(table: &TableView<R>, empty: &str) -> Option<Paragraph<'static>> {
    match table {
        TableView::Rows(_) => None,
        TableView::Loading => Some(Paragraph::new("  Loading…").style(theme::placeholder())),
        TableView::Empty => Some(Paragraph::new(format!("  {empty}")).style(theme::placeholder())),
        TableView::Failed(message) => Some(
            Paragraph::new(format!("  Error loading logs: {message}")).style(theme::error_text()),
        ),
    }
}

/// `Page 2 of 5 · 230 total`, or just `Page 2` when the server sent no
/// total.
pub fn page_label(page: u32, total: Option<u64>) -> String {
    let shown = page.saturating_add(1);
    match total {
        Some(total) => {
            let pages = total.div_ceil(u64::from(PAGE_SIZE)).max(1);
            format!("Page {shown} of {pages} · {total} total")
        }
        None => format!("Page {shown}"),
    }
}

pub fn table_block(title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_default())
}
