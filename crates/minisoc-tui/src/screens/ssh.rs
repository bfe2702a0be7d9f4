//! SSH screen: authentication tiles, filters and the paged auth log.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};

use minisoc_core::aggregate::ssh_status_badge;
use minisoc_core::format::{format_count, format_timestamp};
use minisoc_core::panels::{SSH_STATUS_OPTIONS, cycle_option};
use minisoc_core::{Domain, SshLog, SshLogFilter};

use crate::action::{Action, SshData};
use crate::component::Component;
use crate::screens::{clamp_selection, move_selection};
use crate::theme;
use crate::widgets::badge::badge_cell;
use crate::widgets::filters::{FilterField, filter_line};
use crate::widgets::log_table::{page_label, placeholder, table_block};
use crate::widgets::text_edit::{EditOutcome, TextEdit};
use crate::widgets::tiles::{NO_VALUE, Tile, render_tiles};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Username,
    Ip,
}

pub struct SshScreen {
    view: Arc<SshData>,
    draft: SshLogFilter,
    applied: SshLogFilter,
    editing: Option<(Field, TextEdit)>,
    table_state: TableState,
}

impl SshScreen {
    pub fn new() -> Self {
        Self {
            view: Arc::default(),
            draft: SshLogFilter::default(),
            applied: SshLogFilter::default(),
            editing: None,
            table_state: TableState::default(),
        }
    }

    fn tiles(&self) -> Vec<Tile> {
        let stats = self.view.stats.as_ref();
        let count = |f: fn(&minisoc_core::SshStats) -> u64| {
            stats.map_or_else(|| NO_VALUE.to_owned(), |s| format_count(f(s)))
        };
        vec![
            Tile::new("Total Attempts", count(|s| s.total_attempts), theme::NEON_CYAN),
            Tile::new("Successful", count(|s| s.successful), theme::SUCCESS_GREEN),
            Tile::new("Failed", count(|s| s.failed), theme::ERROR_RED),
            Tile::new("Suspicious", count(|s| s.suspicious), theme::ELECTRIC_YELLOW),
        ]
    }

    fn filter_fields(&self) -> Vec<FilterField<'static>> {
        vec![
            FilterField::new('s', "Status", self.draft.status.as_ref().map(ToString::to_string)),
            FilterField::toggle('f', "Suspicious only", self.draft.suspicious_only),
            FilterField::new('u', "User", self.draft.username.clone()),
            FilterField::new('i', "IP", self.draft.ip_address.clone()),
        ]
    }

    fn start_edit(&mut self, field: Field) {
        let edit = match field {
            Field::Username => TextEdit::new("Username", self.draft.username.as_deref()),
            Field::Ip => TextEdit::new("IP address", self.draft.ip_address.as_deref()),
        };
        self.editing = Some((field, edit));
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let title = format!(
            " SSH Logs · {} ",
            page_label(self.view.page, self.view.total)
        );
        let block = table_block(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(notice) = placeholder(&self.view.table, "No logs found") {
            frame.render_widget(notice, inner);
            return;
        }

        let header = Row::new(["Time", "Event", "User", "IP", "Port", "Status", "Auth", ""])
            .style(theme::table_header());
        let rows = self.view.table.rows().iter().map(log_row);
        let widths = [
            Constraint::Length(19),
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Length(15),
            Constraint::Length(5),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(2),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, inner, &mut state);
    }
}

fn log_row(log: &SshLog) -> Row<'static> {
    let dash = || "─".to_owned();
    let flag = if log.is_suspicious {
        Cell::from("⚠").style(Style::default().fg(theme::ELECTRIC_YELLOW))
    } else {
        Cell::from("")
    };
    Row::new(vec![
        Cell::from(format_timestamp(&log.timestamp)),
        Cell::from(log.event_type.clone().unwrap_or_else(dash)),
        Cell::from(log.username.clone().unwrap_or_else(dash))
            .style(Style::default().fg(theme::NEON_CYAN)),
        Cell::from(log.ip_address.clone().unwrap_or_else(dash))
            .style(Style::default().fg(theme::CORAL)),
        Cell::from(log.port.map_or_else(dash, |p| p.to_string())),
        badge_cell(log.status.to_string(), ssh_status_badge(log.status)),
        Cell::from(log.auth_method.clone().unwrap_or_else(dash)),
        flag,
    ])
    .style(theme::table_row())
}

impl Component for SshScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some((field, edit)) = self.editing.as_mut() {
            let field = *field;
            match edit.handle_key(key) {
                EditOutcome::Editing => {}
                EditOutcome::Cancel => self.editing = None,
                EditOutcome::Commit(value) => {
                    match field {
                        Field::Username => self.draft.username = value,
                        Field::Ip => self.draft.ip_address = value,
                    }
                    self.editing = None;
                }
            }
            return Ok(None);
        }

        let rows = self.view.table.rows().len();
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                move_selection(&mut self.table_state, rows, 1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                move_selection(&mut self.table_state, rows, -1);
                None
            }
            KeyCode::Char('s') => {
                self.draft.status = cycle_option(self.draft.status.as_ref(), &SSH_STATUS_OPTIONS);
                None
            }
            KeyCode::Char('f') => {
                self.draft.suspicious_only = !self.draft.suspicious_only;
                None
            }
            KeyCode::Char('u') => {
                self.start_edit(Field::Username);
                None
            }
            KeyCode::Char('i') => {
                self.start_edit(Field::Ip);
                None
            }
            KeyCode::Enter => {
                self.applied = self.draft.clone();
                Some(Action::ApplySshFilter(self.draft.clone()))
            }
            KeyCode::Char('n') => Some(Action::NextPage(Domain::Ssh)),
            KeyCode::Char('p') => Some(Action::PrevPage(Domain::Ssh)),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::SshUpdated(view) = action {
            self.view = Arc::clone(view);
            clamp_selection(&mut self.table_state, self.view.table.rows().len());
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [tiles, filters, table, hints] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(area);

        render_tiles(frame, tiles, &self.tiles());

        let filter_row = match &self.editing {
            Some((_, edit)) => edit.line(),
            None => filter_line(&self.filter_fields(), self.draft != self.applied),
        };
        frame.render_widget(Paragraph::new(filter_row), filters);

        self.render_table(frame, table);

        let hints_line = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("navigate  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("apply filters  ", theme::key_hint()),
            Span::styled("n/p ", theme::key_hint_key()),
            Span::styled("page", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints_line), hints);
    }

    fn captures_input(&self) -> bool {
        self.editing.is_some()
    }
}
