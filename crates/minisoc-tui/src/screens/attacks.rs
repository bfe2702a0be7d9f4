//! Attacks screen: critical banner, severity tiles, type and attacker
//! charts, filters, and the paged attack log with resolve/block commands.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use minisoc_core::aggregate::{
    SeverityStyle, TOP_N, bar_chart, critical_alert, high_priority_count, resolution_badge, top_n,
};
use minisoc_core::format::{format_count, format_timestamp};
use minisoc_core::panels::{ATTACK_TYPE_OPTIONS, SEVERITY_OPTIONS, cycle_option};
use minisoc_core::{AttackFilter, AttackRecord, Domain};

use crate::action::{Action, AttackData, Notification};
use crate::component::Component;
use crate::screens::{clamp_selection, move_selection};
use crate::theme;
use crate::widgets::badge::badge_cell;
use crate::widgets::bars::render_bars;
use crate::widgets::filters::{FilterField, filter_line};
use crate::widgets::log_table::{page_label, placeholder, table_block};
use crate::widgets::text_edit::{EditOutcome, TextEdit};
use crate::widgets::tiles::{NO_VALUE, Tile, render_tiles};

pub struct AttacksScreen {
    window_hours: u32,
    view: Arc<AttackData>,
    draft: AttackFilter,
    applied: AttackFilter,
    /// Attack type choices; replaced once `/attacks/types` answers.
    type_options: Vec<String>,
    editing: Option<TextEdit>,
    table_state: TableState,
}

impl AttacksScreen {
    pub fn new(window_hours: u32) -> Self {
        Self {
            window_hours,
            view: Arc::default(),
            draft: AttackFilter::default(),
            applied: AttackFilter::default(),
            type_options: ATTACK_TYPE_OPTIONS.iter().map(|s| (*s).to_owned()).collect(),
            editing: None,
            table_state: TableState::default(),
        }
    }

    fn selected(&self) -> Option<&AttackRecord> {
        self.table_state
            .selected()
            .and_then(|i| self.view.table.rows().get(i))
    }

    fn tiles(&self) -> Vec<Tile> {
        let Some(stats) = self.view.stats.as_ref() else {
            return ["Total Attacks", "Critical", "High Priority", "Unresolved"]
                .into_iter()
                .map(|label| Tile::new(label, NO_VALUE, theme::DIM_WHITE))
                .collect();
        };
        vec![
            Tile::new("Total Attacks", format_count(stats.total_attacks), theme::CORAL),
            Tile::new("Critical", format_count(stats.critical_attacks), theme::ERROR_RED),
            Tile::new(
                "High Priority",
                format_count(high_priority_count(stats)),
                theme::ELECTRIC_YELLOW,
            ),
            Tile::new(
                "Unresolved",
                format_count(stats.unresolved_attacks),
                theme::LIGHT_BLUE,
            ),
        ]
    }

    fn filter_fields(&self) -> Vec<FilterField<'static>> {
        vec![
            FilterField::new('t', "Type", self.draft.attack_type.clone()),
            FilterField::new(
                's',
                "Severity",
                self.draft.severity.as_ref().map(ToString::to_string),
            ),
            FilterField::toggle('u', "Unresolved only", self.draft.unresolved_only),
            FilterField::new('i', "Source IP", self.draft.source_ip.clone()),
        ]
    }

    fn render_charts(&self, frame: &mut Frame, area: Rect) {
        let [left, right] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(area);
        let stats = self.view.stats.as_ref();

        let block = chart_block(" Attack Types ");
        let inner = block.inner(left);
        frame.render_widget(block, left);
        let types = stats
            .map(|s| bar_chart(&s.attack_types))
            .unwrap_or_default();
        render_bars(frame, inner, &types, "No attack data");

        let block = chart_block(" Top Attackers ");
        let inner = block.inner(right);
        frame.render_widget(block, right);
        let attackers = stats
            .map(|s| bar_chart(top_n(&s.top_attackers, TOP_N)))
            .unwrap_or_default();
        render_bars(frame, inner, &attackers, "No attacker data");
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let title = format!(
            " Attack Log · {} ",
            page_label(self.view.page, self.view.total)
        );
        let block = table_block(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(notice) = placeholder(&self.view.table, "No attacks detected") {
            frame.render_widget(notice, inner);
            return;
        }

        let header = Row::new([
            "", "Time", "Type", "Severity", "Source", "Target", "Status", "Blocked",
        ])
        .style(theme::table_header());
        let rows = self.view.table.rows().iter().map(attack_row);
        let widths = [
            Constraint::Length(2),
            Constraint::Length(19),
            Constraint::Fill(1),
            Constraint::Length(9),
            Constraint::Length(15),
            Constraint::Fill(1),
            Constraint::Length(11),
            Constraint::Length(7),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, inner, &mut state);
    }
}

fn chart_block(title: &'static str) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_default())
}

fn attack_row(record: &AttackRecord) -> Row<'static> {
    let style = SeverityStyle::classify(record.severity);
    let (resolution, resolution_text) = resolution_badge(record.resolved);
    let target = match (&record.http_method, &record.target_path) {
        (Some(method), Some(path)) => format!("{method} {path}"),
        (None, Some(path)) => path.clone(),
        _ => "─".to_owned(),
    };
    let blocked = if record.blocked {
        Cell::from("yes").style(Style::default().fg(theme::ERROR_RED))
    } else {
        Cell::from("no")
    };
    Row::new(vec![
        badge_cell(style.icon, style.badge),
        Cell::from(format_timestamp(&record.timestamp)),
        Cell::from(record.attack_type.clone()),
        badge_cell(record.severity.to_string(), style.badge),
        Cell::from(record.source_ip.clone()).style(Style::default().fg(theme::CORAL)),
        Cell::from(target),
        badge_cell(resolution_text, resolution),
        blocked,
    ])
    .style(theme::row_highlight(style.highlight))
}

impl Component for AttacksScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(edit) = self.editing.as_mut() {
            match edit.handle_key(key) {
                EditOutcome::Editing => {}
                EditOutcome::Cancel => self.editing = None,
                EditOutcome::Commit(value) => {
                    self.draft.source_ip = value;
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
            KeyCode::Char('t') => {
                self.draft.attack_type =
                    cycle_option(self.draft.attack_type.as_ref(), &self.type_options);
                None
            }
            KeyCode::Char('s') => {
                self.draft.severity = cycle_option(self.draft.severity.as_ref(), &SEVERITY_OPTIONS);
                None
            }
            KeyCode::Char('u') => {
                self.draft.unresolved_only = !self.draft.unresolved_only;
                None
            }
            KeyCode::Char('i') => {
                self.editing = Some(TextEdit::new("Source IP", self.draft.source_ip.as_deref()));
                None
            }
            KeyCode::Enter => {
                self.applied = self.draft.clone();
                Some(Action::ApplyAttackFilter(self.draft.clone()))
            }
            KeyCode::Char('n') => Some(Action::NextPage(Domain::Attacks)),
            KeyCode::Char('p') => Some(Action::PrevPage(Domain::Attacks)),
            KeyCode::Char('r') => self.selected().map(|record| {
                if record.resolved {
                    Action::Notify(Notification::info(format!(
                        "Attack #{} is already resolved",
                        record.id
                    )))
                } else {
                    Action::ResolveAttack(record.id)
                }
            }),
            KeyCode::Char('b') => self.selected().map(|record| {
                if record.blocked {
                    Action::Notify(Notification::info(format!(
                        "{} is already blocked",
                        record.source_ip
                    )))
                } else {
                    Action::BlockAttack(record.id)
                }
            }),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::AttacksUpdated(view) => {
                self.view = Arc::clone(view);
                clamp_selection(&mut self.table_state, self.view.table.rows().len());
            }
            Action::AttackTypesLoaded(types) if !types.is_empty() => {
                self.type_options.clone_from(types);
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let alert = self
            .view
            .stats
            .as_ref()
            .and_then(|s| critical_alert(s, self.window_hours));

        let [banner, tiles, charts, filters, table, hints] = Layout::vertical([
            Constraint::Length(u16::from(alert.is_some())),
            Constraint::Length(3),
            Constraint::Length(8),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(area);

        if let Some(text) = alert {
            frame.render_widget(
                Paragraph::new(format!(" ✖ {text}")).style(
                    Style::default()
                        .fg(theme::ERROR_RED)
                        .bg(theme::BG_CRITICAL)
                        .add_modifier(Modifier::BOLD),
                ),
                banner,
            );
        }

        render_tiles(frame, tiles, &self.tiles());
        self.render_charts(frame, charts);

        let filter_row = match &self.editing {
            Some(edit) => edit.line(),
            None => filter_line(&self.filter_fields(), self.draft != self.applied),
        };
        frame.render_widget(Paragraph::new(filter_row), filters);

        self.render_table(frame, table);

        let hints_line = Line::from(vec![
            Span::styled("  r ", theme::key_hint_key()),
            Span::styled("resolve  ", theme::key_hint()),
            Span::styled("b ", theme::key_hint_key()),
            Span::styled("block  ", theme::key_hint()),
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
