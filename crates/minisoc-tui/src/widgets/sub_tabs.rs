//! Inline selector line, e.g. the nginx access/error toggle.

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::theme;

/// `[Active]  other  other`, with the active label bracketed and
/// underlined.
pub fn sub_tabs<'a>(labels: &[&'a str], active: usize) -> Line<'a> {
    let spans = labels
        .iter()
        .enumerate()
        .flat_map(|(i, &label)| {
            let sep = (i > 0).then(|| Span::styled("  ", theme::key_hint()));
            let tab = if i == active {
                Span::styled(
                    format!("[{label}]"),
                    theme::tab_active().add_modifier(Modifier::UNDERLINED),
                )
            } else {
                Span::styled(label, theme::tab_inactive())
            };
            sep.into_iter().chain(std::iter::once(tab))
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}
