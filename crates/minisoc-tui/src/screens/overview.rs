//! Overview screen: cross-domain tiles, top lists and the SSH timeline.
//!
//! ┌ Attacks ┐┌ Critical ┐┌ Unresolved ┐┌ SSH Failed ┐┌ Requests ┐┌ Avg Resp ┐
//! ┌─ Top Failed SSH IPs ──────────┐┌─ Top Requested Paths ────────────┐
//! │ 203.0.113.7   ████████   120  ││ /wp-login.php  ██████       80   │
//! └───────────────────────────────┘└──────────────────────────────────┘
//! ┌─ SSH Activity ────────────────────────────────────────────────────┐
//! │ ▁▂▅▇█▃▁                                                          │
//! └───────────────────────────────────────────────────────────────────┘

use std::sync::Arc;

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Sparkline};

use minisoc_core::aggregate::{TOP_N, bar_chart, timeline_series, top_n};
use minisoc_core::format::{format_bucket, format_count, format_duration_ms};

use crate::action::{Action, OverviewData};
use crate::component::Component;
use crate::theme;
use crate::widgets::bars::render_bars;
use crate::widgets::tiles::{NO_VALUE, Tile, render_tiles};

pub struct OverviewScreen {
    window_hours: u32,
    view: Arc<OverviewData>,
}

impl OverviewScreen {
    pub fn new(window_hours: u32) -> Self {
        Self {
            window_hours,
            view: Arc::default(),
        }
    }

    fn tiles(&self) -> Vec<Tile> {
        let stats = self.view.stats.as_ref();
        let attacks = stats.and_then(|s| s.attacks.as_ref());
        let ssh = stats.and_then(|s| s.ssh.as_ref());
        let nginx = stats.and_then(|s| s.nginx.as_ref());
        let count = |v: Option<u64>| v.map_or_else(|| NO_VALUE.to_owned(), format_count);

        vec![
            Tile::new("Attacks", count(attacks.map(|a| a.total_attacks)), theme::CORAL),
            Tile::new(
                "Critical",
                count(attacks.map(|a| a.critical_attacks)),
                theme::ERROR_RED,
            ),
            Tile::new(
                "Unresolved",
                count(attacks.map(|a| a.unresolved_attacks)),
                theme::ELECTRIC_YELLOW,
            ),
            Tile::new("SSH Failed", count(ssh.map(|s| s.failed)), theme::ERROR_RED),
            Tile::new(
                "Suspicious",
                count(ssh.map(|s| s.suspicious)),
                theme::ELECTRIC_YELLOW,
            ),
            Tile::new(
                "Requests",
                count(nginx.map(|n| n.access.total_requests)),
                theme::NEON_CYAN,
            ),
            Tile::new(
                "Avg Response",
                nginx
                    .and_then(|n| n.access.avg_response_time)
                    .map_or_else(|| NO_VALUE.to_owned(), format_duration_ms),
                theme::LIGHT_BLUE,
            ),
        ]
    }

    fn render_top_lists(&self, frame: &mut Frame, area: Rect) {
        let [left, right] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(area);
        let stats = self.view.stats.as_ref();

        let block = panel_block(" Top Failed SSH IPs ");
        let inner = block.inner(left);
        frame.render_widget(block, left);
        let failed = stats
            .and_then(|s| s.ssh.as_ref())
            .map(|s| bar_chart(top_n(&s.top_failed_ips, TOP_N)))
            .unwrap_or_default();
        render_bars(frame, inner, &failed, "No failed attempts");

        let block = panel_block(" Top Requested Paths ");
        let inner = block.inner(right);
        frame.render_widget(block, right);
        let paths = stats
            .and_then(|s| s.nginx.as_ref())
            .map(|n| bar_chart(top_n(&n.access.top_paths, TOP_N)))
            .unwrap_or_default();
        render_bars(frame, inner, &paths, "No data");
    }

    fn render_timeline(&self, frame: &mut Frame, area: Rect) {
        let block = panel_block(" SSH Activity ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let series = self
            .view
            .stats
            .as_ref()
            .and_then(|s| s.timeline.as_ref())
            .map(|t| timeline_series(&t.data))
            .unwrap_or_default();
        if series.is_empty() {
            frame.render_widget(
                Paragraph::new("  No data").style(theme::placeholder()),
                inner,
            );
            return;
        }

        let [chart, axis] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);
        frame.render_widget(
            Sparkline::default()
                .data(series.iter().map(|(_, count)| *count))
                .style(Style::default().fg(theme::NEON_CYAN)),
            chart,
        );

        let first = series.first().map(|(t, _)| format_bucket(t)).unwrap_or_default();
        let last = series.last().map(|(t, _)| format_bucket(t)).unwrap_or_default();
        let gap = usize::from(axis.width).saturating_sub(first.len() + last.len());
        frame.render_widget(
            Paragraph::new(format!("{first}{}{last}", " ".repeat(gap))).style(theme::key_hint()),
            axis,
        );
    }
}

fn panel_block(title: &'static str) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_default())
}

impl Component for OverviewScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::OverviewUpdated(view) = action {
            self.view = Arc::clone(view);
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [header, tiles, lists, timeline] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(7),
            Constraint::Length(7),
        ])
        .areas(area);

        let updated = self.view.updated_at.map_or_else(
            || "waiting for data".to_owned(),
            |t| format!("updated {}", t.format("%H:%M:%S")),
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" Security Overview", theme::title_style()),
                Span::styled(
                    format!("  ·  last {}h  ·  {updated}", self.window_hours),
                    theme::key_hint(),
                ),
            ])),
            header,
        );

        render_tiles(frame, tiles, &self.tiles());
        self.render_top_lists(frame, lists);
        self.render_timeline(frame, timeline);
    }
}
