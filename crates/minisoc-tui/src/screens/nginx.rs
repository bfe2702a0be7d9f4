//! Nginx screen: request tiles, access/error view toggle, filters and the
//! paged log of whichever view is selected.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};

use minisoc_core::aggregate::{BadgeKind, bucket_status_codes, error_level_badge, http_status_badge};
use minisoc_core::format::{format_bytes, format_count, format_duration_ms, format_timestamp};
use minisoc_core::panels::{
    ERROR_LEVEL_OPTIONS, HTTP_METHOD_OPTIONS, STATUS_CODE_OPTIONS, cycle_option,
};
use minisoc_core::{Domain, NginxAccessLog, NginxEntry, NginxErrorLog, NginxFilter, NginxView};

use crate::action::{Action, NginxData};
use crate::component::Component;
use crate::screens::{clamp_selection, move_selection};
use crate::theme;
use crate::widgets::badge::badge_cell;
use crate::widgets::filters::{FilterField, filter_line};
use crate::widgets::log_table::{page_label, placeholder, table_block};
use crate::widgets::sub_tabs::sub_tabs;
use crate::widgets::text_edit::{EditOutcome, TextEdit};
use crate::widgets::tiles::{NO_VALUE, Tile, render_tiles};

pub struct NginxScreen {
    view: Arc<NginxData>,
    draft: NginxFilter,
    applied: NginxFilter,
    editing: Option<TextEdit>,
    table_state: TableState,
}

impl NginxScreen {
    pub fn new() -> Self {
        Self {
            view: Arc::default(),
            draft: NginxFilter::default(),
            applied: NginxFilter::default(),
            editing: None,
            table_state: TableState::default(),
        }
    }

    fn tiles(&self) -> Vec<Tile> {
        let Some(stats) = self.view.stats.as_ref() else {
            return ["Total Requests", "2xx", "4xx", "5xx", "Avg Response"]
                .into_iter()
                .map(|label| Tile::new(label, NO_VALUE, theme::DIM_WHITE))
                .collect();
        };
        let buckets = bucket_status_codes(&stats.access.status_distribution);
        vec![
            Tile::new(
                "Total Requests",
                format_count(stats.access.total_requests),
                theme::NEON_CYAN,
            ),
            Tile::new("2xx", format_count(buckets.success), theme::SUCCESS_GREEN),
            Tile::new("4xx", format_count(buckets.client_error), theme::ELECTRIC_YELLOW),
            Tile::new("5xx", format_count(buckets.server_error), theme::ERROR_RED),
            Tile::new(
                "Avg Response",
                stats
                    .access
                    .avg_response_time
                    .map_or_else(|| NO_VALUE.to_owned(), format_duration_ms),
                theme::LIGHT_BLUE,
            ),
        ]
    }

    fn filter_fields(&self) -> Vec<FilterField<'static>> {
        match self.draft.view {
            NginxView::Access => vec![
                FilterField::new('m', "Method", self.draft.access.method.clone()),
                FilterField::new(
                    'c',
                    "Status",
                    self.draft.access.status_code.as_ref().map(ToString::to_string),
                ),
                FilterField::new('i', "IP", self.draft.access.ip_address.clone()),
            ],
            NginxView::Error => vec![FilterField::new(
                'l',
                "Level",
                self.draft.error.level.as_ref().map(ToString::to_string),
            )],
        }
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let (name, empty) = match self.draft.view {
            NginxView::Access => ("Access Log", "No logs found"),
            NginxView::Error => ("Error Log", "No errors found"),
        };
        let title = format!(" {name} · {} ", page_label(self.view.page, self.view.total));
        let block = table_block(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(notice) = placeholder(&self.view.table, empty) {
            frame.render_widget(notice, inner);
            return;
        }

        let rows = self.view.table.rows().iter().map(|entry| match entry {
            NginxEntry::Access(log) => access_row(log),
            NginxEntry::Error(log) => error_row(log),
        });
        let table = match self.draft.view {
            NginxView::Access => Table::new(
                rows,
                [
                    Constraint::Length(19),
                    Constraint::Length(7),
                    Constraint::Fill(2),
                    Constraint::Length(6),
                    Constraint::Length(15),
                    Constraint::Length(10),
                    Constraint::Length(8),
                ],
            )
            .header(
                Row::new(["Time", "Method", "Path", "Status", "IP", "Size", "Took"])
                    .style(theme::table_header()),
            ),
            NginxView::Error => Table::new(
                rows,
                [
                    Constraint::Length(19),
                    Constraint::Length(7),
                    Constraint::Fill(1),
                    Constraint::Length(15),
                ],
            )
            .header(Row::new(["Time", "Level", "Message", "Client"]).style(theme::table_header())),
        }
        .row_highlight_style(theme::table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, inner, &mut state);
    }
}

fn dash() -> String {
    "─".to_owned()
}

fn access_row(log: &NginxAccessLog) -> Row<'static> {
    Row::new(vec![
        Cell::from(format_timestamp(&log.timestamp)),
        Cell::from(log.method.clone().unwrap_or_else(dash)).style(theme::key_hint_key()),
        Cell::from(log.path.clone().unwrap_or_else(dash)),
        badge_cell(
            log.status_code.map_or_else(dash, |code| code.to_string()),
            log.status_code.map_or(BadgeKind::Info, http_status_badge),
        ),
        Cell::from(log.ip_address.clone().unwrap_or_else(dash))
            .style(Style::default().fg(theme::CORAL)),
        Cell::from(log.response_size.map_or_else(dash, format_bytes)),
        Cell::from(log.request_time.map_or_else(dash, format_duration_ms)),
    ])
    .style(theme::table_row())
}

fn error_row(log: &NginxErrorLog) -> Row<'static> {
    Row::new(vec![
        Cell::from(format_timestamp(&log.timestamp)),
        badge_cell(log.level.to_string(), error_level_badge(log.level)),
        Cell::from(log.message.clone()),
        Cell::from(log.client_ip.clone().unwrap_or_else(dash))
            .style(Style::default().fg(theme::CORAL)),
    ])
    .style(theme::table_row())
}

impl Component for NginxScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(edit) = self.editing.as_mut() {
            match edit.handle_key(key) {
                EditOutcome::Editing => {}
                EditOutcome::Cancel => self.editing = None,
                EditOutcome::Commit(value) => {
                    self.draft.access.ip_address = value;
                    self.editing = None;
                }
            }
            return Ok(None);
        }

        let rows = self.view.table.rows().len();
        let access = self.draft.view == NginxView::Access;
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                move_selection(&mut self.table_state, rows, 1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                move_selection(&mut self.table_state, rows, -1);
                None
            }
            KeyCode::Char('v') => {
                let view = self.draft.view.toggled();
                self.draft.view = view;
                self.applied.view = view;
                self.table_state.select(None);
                Some(Action::SwitchNginxView(view))
            }
            KeyCode::Char('m') if access => {
                let current = self.draft.access.method.as_deref();
                self.draft.access.method =
                    cycle_option(current.as_ref(), &HTTP_METHOD_OPTIONS).map(str::to_owned);
                None
            }
            KeyCode::Char('c') if access => {
                self.draft.access.status_code =
                    cycle_option(self.draft.access.status_code.as_ref(), &STATUS_CODE_OPTIONS);
                None
            }
            KeyCode::Char('i') if access => {
                self.editing = Some(TextEdit::new(
                    "Client IP",
                    self.draft.access.ip_address.as_deref(),
                ));
                None
            }
            KeyCode::Char('l') if !access => {
                self.draft.error.level =
                    cycle_option(self.draft.error.level.as_ref(), &ERROR_LEVEL_OPTIONS);
                None
            }
            KeyCode::Enter => {
                self.applied = self.draft.clone();
                Some(Action::ApplyNginxFilter(self.draft.clone()))
            }
            KeyCode::Char('n') => Some(Action::NextPage(Domain::Nginx)),
            KeyCode::Char('p') => Some(Action::PrevPage(Domain::Nginx)),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::NginxUpdated(view) = action {
            self.view = Arc::clone(view);
            clamp_selection(&mut self.table_state, self.view.table.rows().len());
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [tiles, toggle, filters, table, hints] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(area);

        render_tiles(frame, tiles, &self.tiles());

        let active = usize::from(self.draft.view == NginxView::Error);
        let mut toggle_line = sub_tabs(&["Access Log", "Error Log"], active);
        toggle_line.spans.insert(0, Span::raw(" "));
        frame.render_widget(Paragraph::new(toggle_line), toggle);

        let filter_row = match &self.editing {
            Some(edit) => edit.line(),
            None => filter_line(&self.filter_fields(), self.draft != self.applied),
        };
        frame.render_widget(Paragraph::new(filter_row), filters);

        self.render_table(frame, table);

        let hints_line = Line::from(vec![
            Span::styled("  v ", theme::key_hint_key()),
            Span::styled("access/error  ", theme::key_hint()),
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
