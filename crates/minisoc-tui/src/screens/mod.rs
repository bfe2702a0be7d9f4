//! One screen per dashboard tab. Each is a top-level Component.

pub mod attacks;
pub mod nginx;
pub mod overview;
pub mod ssh;

use ratatui::widgets::TableState;

use minisoc_core::Domain;

use crate::component::Component;

/// Screen components in tab order.
pub fn create_screens(window_hours: u32) -> Vec<(Domain, Box<dyn Component>)> {
    vec![
        (
            Domain::Overview,
            Box::new(overview::OverviewScreen::new(window_hours)),
        ),
        (
            Domain::Attacks,
            Box::new(attacks::AttacksScreen::new(window_hours)),
        ),
        (Domain::Ssh, Box::new(ssh::SshScreen::new())),
        (Domain::Nginx, Box::new(nginx::NginxScreen::new())),
    ]
}

/// Move the table cursor by `delta`, clamped to `len` rows.
pub(crate) fn move_selection(state: &mut TableState, len: usize, delta: isize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let current = state.selected().unwrap_or(0);
    let next = current.saturating_add_signed(delta).min(len - 1);
    state.select(Some(next));
}

/// Keep the cursor on a valid row after the table was replaced.
pub(crate) fn clamp_selection(state: &mut TableState, len: usize) {
    match (len, state.selected()) {
        (0, _) => state.select(None),
        (_, None) => state.select(Some(0)),
        (n, Some(i)) if i >= n => state.select(Some(n - 1)),
        _ => {}
    }
}

/// Draw `component` on an in-memory terminal and return the text, one
/// line per row.
#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) fn render_to_string(component: &dyn Component, width: u16, height: u16) -> String {
    let mut terminal =
        ratatui::Terminal::new(ratatui::backend::TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| component.render(frame, frame.area()))
        .unwrap();
    let buffer = terminal.backend().buffer();
    buffer
        .content()
        .chunks(usize::from(width))
        .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_clamps_to_rows() {
        let mut state = TableState::default();
        clamp_selection(&mut state, 3);
        assert_eq!(state.selected(), Some(0));

        move_selection(&mut state, 3, 10);
        assert_eq!(state.selected(), Some(2));
        move_selection(&mut state, 3, -5);
        assert_eq!(state.selected(), Some(0));

        clamp_selection(&mut state, 0);
        assert_eq!(state.selected(), None);
    }
}
