//! Single-line text entry for free-form filters (IP, username).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::text::{Line, Span};

use crate::theme;

/// Result of feeding one key to a [`TextEdit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Editing,
    /// Enter: the trimmed text, `None` if blank.
    Commit(Option<String>),
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub label: &'static str,
    buffer: String,
}

impl TextEdit {
    pub fn new(label: &'static str, initial: Option<&str>) -> Self {
        Self {
            label,
            buffer: initial.unwrap_or_default().to_owned(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditOutcome {
        match key.code {
            KeyCode::Enter => {
                let text = self.buffer.trim();
                EditOutcome::Commit((!text.is_empty()).then(|| text.to_owned()))
            }
            KeyCode::Esc => EditOutcome::Cancel,
            KeyCode::Backspace => {
                self.buffer.pop();
                EditOutcome::Editing
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.buffer.clear();
                EditOutcome::Editing
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.buffer.push(c);
                EditOutcome::Editing
            }
            _ => EditOutcome::Editing,
        }
    }

    pub fn line(&self) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!(" {}: ", self.label), theme::key_hint_key()),
            Span::styled(self.buffer.clone(), theme::tab_active()),
            Span::styled("█", theme::tab_active()),
            Span::styled("  Enter set  Esc cancel", theme::key_hint()),
        ])
    }
}
