//! Application core: event loop, tab management, action dispatch.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs, Wrap},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use minisoc_core::aggregate::AttackBadge;
use minisoc_core::{Dashboard, Domain, Panel, PanelController, PanelPhase, PanelView};

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

const TOAST_TTL: Duration = Duration::from_secs(3);

/// Where the session stands with the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Session {
    /// Startup probe in flight.
    Connecting,
    Live,
    /// Startup probe failed; nothing polls and only quit is accepted.
    Unreachable(String),
}

/// Status-bar facts about one panel, taken from its published view.
#[derive(Debug, Clone, Default)]
struct PanelMeta {
    phase: PanelPhase,
    updated_at: Option<DateTime<Local>>,
    last_error: Option<String>,
}

impl PanelMeta {
    fn observe<S, R>(&mut self, view: &PanelView<S, R>) {
        self.updated_at = view.updated_at;
        self.last_error.clone_from(&view.last_error);
    }
}

/// Top-level application state and event loop.
pub struct App {
    dashboard: Dashboard,
    session: Session,
    active: Domain,
    screens: HashMap<Domain, Box<dyn Component>>,
    meta: HashMap<Domain, PanelMeta>,
    badge: AttackBadge,
    running: bool,
    help_visible: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Cancels the data bridge on exit.
    data_cancel: CancellationToken,
    notification: Option<(Notification, Instant)>,
}

impl App {
    pub fn new(dashboard: Dashboard) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens = create_screens(dashboard.window_hours()).into_iter().collect();

        Self {
            dashboard,
            session: Session::Connecting,
            active: Domain::Overview,
            screens,
            meta: HashMap::new(),
            badge: AttackBadge::default(),
            running: true,
            help_visible: false,
            action_tx,
            action_rx,
            data_cancel: CancellationToken::new(),
            notification: None,
        }
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        tui.draw(|frame| self.render(frame))?;

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        self.launch().await;
        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.data_cancel.cancel();
        self.dashboard.shutdown();
        events.stop();
        tui.exit();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Probe the backend. On success start the data bridge and fetch the
    /// attack type options; on failure show the blocking notice.
    async fn launch(&mut self) {
        if let Err(e) = self.dashboard.launch().await {
            warn!(error = %e, "launch failed");
            self.session = Session::Unreachable(e.to_string());
            return;
        }
        self.session = Session::Live;

        let dashboard = self.dashboard.clone();
        let tx = self.action_tx.clone();
        let cancel = self.data_cancel.clone();
        tokio::spawn(async move {
            crate::data_bridge::spawn_data_bridge(dashboard, tx, cancel).await;
        });

        let attacks = self.dashboard.attacks().clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let types = attacks.panel().attack_types().await;
            let _ = tx.send(Action::AttackTypesLoaded(types));
        });
    }

    fn active_screen(&mut self) -> Option<&mut Box<dyn Component>> {
        self.screens.get_mut(&self.active)
    }

    /// Map a key event to an action. Global keys are handled here;
    /// everything else goes to the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        // The blocking notice accepts nothing but quit.
        if matches!(self.session, Session::Unreachable(_)) {
            return Ok(match key.code {
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => Some(Action::Quit),
                _ => None,
            });
        }

        // A screen editing text gets every key.
        if self.active_screen().is_some_and(|s| s.captures_input()) {
            return self
                .active_screen()
                .map_or(Ok(None), |s| s.handle_key_event(key));
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            });
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),

            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='4')) => {
                let n = c.to_digit(10).and_then(|d| u8::try_from(d).ok());
                if let Some(domain) = n.and_then(Domain::from_number) {
                    return Ok(Some(Action::SwitchTab(domain)));
                }
            }

            (KeyModifiers::NONE, KeyCode::Esc) if self.notification.is_some() => {
                return Ok(Some(Action::DismissNotification));
            }

            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchTab(self.active.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchTab(self.active.prev())));
            }

            _ => {}
        }

        self.active_screen()
            .map_or(Ok(None), |s| s.handle_key_event(key))
    }

    /// Process a single action: update app state, drive the dashboard and
    /// forward data to the screens.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Resize(w, h) => debug!(cols = w, rows = h, "terminal resized"),

            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, shown)| shown.elapsed() > TOAST_TTL)
                {
                    self.notification = None;
                }
            }

            Action::SwitchTab(target) => {
                if *target != self.active {
                    info!(from = %self.active, to = %target, "switching tab");
                    self.active = *target;
                    if self.session == Session::Live {
                        self.dashboard.switch_to(*target);
                    }
                }
            }

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            // ── Data ────────────────────────────────────────────────
            Action::OverviewUpdated(view) => self.meta_mut(Domain::Overview).observe(view),
            Action::AttacksUpdated(view) => self.meta_mut(Domain::Attacks).observe(view),
            Action::SshUpdated(view) => self.meta_mut(Domain::Ssh).observe(view),
            Action::NginxUpdated(view) => self.meta_mut(Domain::Nginx).observe(view),
            Action::PhaseChanged(domain, phase) => self.meta_mut(*domain).phase = *phase,
            Action::BadgeUpdated(badge) => self.badge = *badge,
            Action::Render | Action::AttackTypesLoaded(_) => {}

            // ── Filters and paging ──────────────────────────────────
            Action::ApplySshFilter(filter) => {
                let ssh = self.dashboard.ssh();
                ssh.set_filter(filter.clone());
                ssh.refresh();
            }
            Action::ApplyAttackFilter(filter) => {
                let attacks = self.dashboard.attacks();
                attacks.set_filter(filter.clone());
                attacks.refresh();
            }
            Action::ApplyNginxFilter(filter) => {
                // The view is switched separately; keep whichever is current.
                let nginx = self.dashboard.nginx();
                nginx.update_filter(|current| {
                    current.access.clone_from(&filter.access);
                    current.error.clone_from(&filter.error);
                });
                nginx.refresh();
            }
            Action::SwitchNginxView(view) => {
                self.dashboard.nginx().switch_view(*view);
            }
            Action::NextPage(domain) => self.turn_page(*domain, true),
            Action::PrevPage(domain) => self.turn_page(*domain, false),

            // ── Attack commands ─────────────────────────────────────
            Action::ResolveAttack(id) => self.run_attack_command(*id, AttackCommand::Resolve),
            Action::BlockAttack(id) => self.run_attack_command(*id, AttackCommand::Block),

            // ── Notifications ───────────────────────────────────────
            Action::Notify(notification) => {
                self.notification = Some((notification.clone(), Instant::now()));
            }
            Action::DismissNotification => self.notification = None,
        }

        // Panel data goes to the screen that renders it.
        if let Some(domain) = action.data_domain() {
            if let Some(screen) = self.screens.get_mut(&domain) {
                if let Some(follow_up) = screen.update(action)? {
                    self.action_tx.send(follow_up)?;
                }
            }
        }

        Ok(())
    }

    fn meta_mut(&mut self, domain: Domain) -> &mut PanelMeta {
        self.meta.entry(domain).or_default()
    }

    fn turn_page(&self, domain: Domain, forward: bool) {
        match domain {
            Domain::Overview => {}
            Domain::Attacks => turn_page(self.dashboard.attacks(), forward),
            Domain::Ssh => turn_page(self.dashboard.ssh(), forward),
            Domain::Nginx => turn_page(self.dashboard.nginx(), forward),
        }
    }

    /// Send a resolve or block to the backend in the background and report
    /// the outcome as a toast. The table changes only through the reload.
    fn run_attack_command(&self, id: i64, command: AttackCommand) {
        let attacks = self.dashboard.attacks().clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = match command {
                AttackCommand::Resolve => attacks.resolve(id).await,
                AttackCommand::Block => attacks.block(id).await,
            };
            let notification = match result {
                Ok(()) => Notification::success(format!("Attack #{id} {}", command.past())),
                Err(e) => {
                    warn!(attack_id = id, error = %e, "attack command failed");
                    Notification::error(format!("Failed to {} attack #{id}: {e}", command.verb()))
                }
            };
            let _ = tx.send(Action::Notify(notification));
        });
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let [tabs, body, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_tab_bar(frame, tabs);

        match &self.session {
            Session::Live => {
                if let Some(screen) = self.screens.get(&self.active) {
                    screen.render(frame, body);
                }
            }
            Session::Connecting => {
                frame.render_widget(
                    Paragraph::new(format!(
                        "  Connecting to {}…",
                        self.dashboard.api().base_url()
                    ))
                    .style(theme::placeholder()),
                    body,
                );
            }
            Session::Unreachable(reason) => self.render_unreachable(frame, body, reason),
        }

        self.render_status_bar(frame, status);

        if let Some((notification, _)) = &self.notification {
            render_notification(frame, area, notification);
        }
        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Domain::ALL
            .iter()
            .map(|&domain| {
                let style = if domain == self.active {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                let mut spans = vec![Span::styled(
                    format!(" {} {} ", domain.number(), domain),
                    style,
                )];
                if domain == Domain::Attacks && self.badge.visible {
                    spans.push(Span::styled(
                        format!("({}) ", self.badge.count),
                        Style::default().fg(theme::ERROR_RED),
                    ));
                }
                Line::from(spans)
            })
            .collect();

        let selected = Domain::ALL
            .iter()
            .position(|&d| d == self.active)
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .divider(Span::styled("│", theme::key_hint()))
            .select(selected);
        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let meta = self.meta.get(&self.active).cloned().unwrap_or_default();
        let mut spans = vec![Span::raw(" ")];

        spans.push(match (&self.session, meta.phase) {
            (Session::Connecting, _) => {
                Span::styled("◐ connecting", Style::default().fg(theme::ELECTRIC_YELLOW))
            }
            (Session::Unreachable(_), _) => {
                Span::styled("○ unreachable", Style::default().fg(theme::ERROR_RED))
            }
            (Session::Live, PanelPhase::Idle) => {
                Span::styled("○ idle", Style::default().fg(theme::DIM_WHITE))
            }
            (Session::Live, PanelPhase::Loading) => {
                Span::styled("◐ loading", Style::default().fg(theme::ELECTRIC_YELLOW))
            }
            (Session::Live, PanelPhase::Active) => {
                Span::styled("● live", Style::default().fg(theme::SUCCESS_GREEN))
            }
            (Session::Live, PanelPhase::Error) => {
                let text = meta
                    .last_error
                    .as_deref()
                    .map_or_else(|| "✗ error".to_owned(), |e| format!("✗ {e}"));
                Span::styled(text, theme::error_text())
            }
        });

        if let Some(at) = meta.updated_at {
            spans.push(Span::styled(
                format!("  · updated {}", at.format("%H:%M:%S")),
                theme::key_hint(),
            ));
        }

        spans.push(Span::styled(
            " │ 1-4 tabs  Enter apply  ? help  q quit",
            theme::key_hint(),
        ));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    #[allow(clippy::unused_self)]
    fn render_unreachable(&self, frame: &mut Frame, area: Rect, reason: &str) {
        let width = 64u16.min(area.width.saturating_sub(4));
        let height = 8u16.min(area.height);
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        let dialog = Rect::new(x, y, width, height);

        let block = Block::default()
            .title(" Backend unreachable ")
            .title_style(theme::error_text())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::error_text());
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        let text = vec![
            Line::from(Span::styled(
                format!(" {reason}"),
                Style::default().fg(theme::DIM_WHITE),
            )),
            Line::from(""),
            Line::from(Span::styled(
                " Check that the backend is running and --url is correct.",
                theme::key_hint(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(" q ", theme::key_hint_key()),
                Span::styled("quit", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner);
    }
}

fn turn_page<P: Panel>(controller: &PanelController<P>, forward: bool) {
    if forward {
        controller.next_page();
    } else {
        controller.prev_page();
    }
    controller.refresh();
}

#[derive(Debug, Clone, Copy)]
enum AttackCommand {
    Resolve,
    Block,
}

impl AttackCommand {
    fn verb(self) -> &'static str {
        match self {
            Self::Resolve => "resolve",
            Self::Block => "block",
        }
    }

    fn past(self) -> &'static str {
        match self {
            Self::Resolve => "resolved",
            Self::Block => "blocked",
        }
    }
}

/// Toast in the bottom-right corner, above the status bar.
fn render_notification(frame: &mut Frame, area: Rect, notification: &Notification) {
    let msg_len = u16::try_from(notification.message.chars().count()).unwrap_or(u16::MAX);
    let width = msg_len
        .saturating_add(6)
        .clamp(20, 60)
        .min(area.width.saturating_sub(2));
    let height = 3u16;
    let x = area.width.saturating_sub(width + 1);
    let y = area.height.saturating_sub(height + 1);
    let toast = Rect::new(area.x + x, area.y + y, width, height);

    let (color, icon) = match notification.level {
        NotificationLevel::Success => (theme::SUCCESS_GREEN, "✓"),
        NotificationLevel::Error => (theme::ERROR_RED, "✗"),
        NotificationLevel::Info => (theme::NEON_CYAN, "·"),
    };

    frame.render_widget(Clear, toast);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(toast);
    frame.render_widget(block, toast);

    let line = Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().fg(color)),
        Span::styled(
            notification.message.clone(),
            Style::default().fg(theme::DIM_WHITE),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

fn help_row(key: &'static str, text: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
        Span::styled(text, theme::key_hint()),
    ])
}

fn help_heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {text}"),
        Style::default().fg(theme::NEON_CYAN),
    ))
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = 58u16.min(area.width.saturating_sub(4));
    let height = 24u16.min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    let help_area = Rect::new(area.x + x, area.y + y, width, height);

    frame.render_widget(Clear, help_area);
    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .style(Style::default().bg(theme::BG_DARK));
    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let text = vec![
        Line::from(""),
        help_heading("Navigation"),
        help_row("1-4", "Jump to tab"),
        help_row("Tab", "Next tab (Shift+Tab previous)"),
        help_row("j/k ↑/↓", "Move row cursor"),
        help_row("n / p", "Next / previous page"),
        Line::from(""),
        help_heading("Filters"),
        help_row("s f m c l t", "Cycle a filter value"),
        help_row("u / i", "Edit username or IP (SSH: u)"),
        help_row("Enter", "Apply filters"),
        help_row("v", "Nginx: access / error log"),
        Line::from(""),
        help_heading("Attacks"),
        help_row("r", "Resolve selected attack"),
        help_row("b", "Block selected source"),
        Line::from(""),
        help_row("?", "This help"),
        help_row("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled("  Esc or ? to close", theme::key_hint())),
    ];
    frame.render_widget(Paragraph::new(text), inner);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Arc;

    use minisoc_core::DashboardConfig;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::action::SshData;

    fn app() -> App {
        let dashboard = Dashboard::new(&DashboardConfig::default()).unwrap();
        let mut app = App::new(dashboard);
        app.session = Session::Live;
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn number_keys_switch_tabs() {
        let mut app = app();
        let action = app.handle_key_event(key(KeyCode::Char('3'))).unwrap();
        assert!(matches!(action, Some(Action::SwitchTab(Domain::Ssh))));
        assert!(app.handle_key_event(key(KeyCode::Char('9'))).unwrap().is_none());
    }

    #[tokio::test]
    async fn tab_cycles_from_active() {
        let mut app = app();
        app.process_action(&Action::SwitchTab(Domain::Nginx)).unwrap();
        let action = app.handle_key_event(key(KeyCode::Tab)).unwrap();
        assert!(matches!(action, Some(Action::SwitchTab(Domain::Overview))));

        let back = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        let action = app.handle_key_event(back).unwrap();
        assert!(matches!(action, Some(Action::SwitchTab(Domain::Ssh))));
    }

    #[tokio::test]
    async fn text_entry_swallows_global_keys() {
        let mut app = app();
        app.process_action(&Action::SwitchTab(Domain::Ssh)).unwrap();
        app.handle_key_event(key(KeyCode::Char('u'))).unwrap();

        // `q` and `1` are typed into the username, not handled globally.
        assert!(app.handle_key_event(key(KeyCode::Char('q'))).unwrap().is_none());
        assert!(app.handle_key_event(key(KeyCode::Char('1'))).unwrap().is_none());

        app.handle_key_event(key(KeyCode::Esc)).unwrap();
        let action = app.handle_key_event(key(KeyCode::Char('q'))).unwrap();
        assert!(matches!(action, Some(Action::Quit)));
    }

    #[tokio::test]
    async fn unreachable_backend_only_accepts_quit() {
        let mut app = app();
        app.session = Session::Unreachable("connection refused".into());
        assert!(app.handle_key_event(key(KeyCode::Char('2'))).unwrap().is_none());
        assert!(matches!(
            app.handle_key_event(key(KeyCode::Char('q'))).unwrap(),
            Some(Action::Quit)
        ));
    }

    #[tokio::test]
    async fn help_overlay_blocks_screen_keys() {
        let mut app = app();
        app.process_action(&Action::ToggleHelp).unwrap();
        assert!(app.handle_key_event(key(KeyCode::Char('2'))).unwrap().is_none());
        assert!(matches!(
            app.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::ToggleHelp)
        ));
    }

    #[tokio::test]
    async fn toast_expires_on_tick() {
        let mut app = app();
        app.process_action(&Action::Notify(Notification::success("done")))
            .unwrap();
        app.process_action(&Action::Tick).unwrap();
        assert!(app.notification.is_some());

        if let Some((_, shown)) = app.notification.as_mut() {
            *shown = Instant::now().checked_sub(TOAST_TTL * 2).unwrap();
        }
        app.process_action(&Action::Tick).unwrap();
        assert!(app.notification.is_none());
    }

    #[tokio::test]
    async fn data_updates_feed_status_meta() {
        let mut app = app();
        let view = SshData {
            last_error: Some("HTTP error! status: 500".into()),
            ..SshData::default()
        };
        app.process_action(&Action::SshUpdated(Arc::new(view))).unwrap();
        app.process_action(&Action::PhaseChanged(Domain::Ssh, PanelPhase::Error))
            .unwrap();

        let meta = &app.meta[&Domain::Ssh];
        assert_eq!(meta.phase, PanelPhase::Error);
        assert_eq!(meta.last_error.as_deref(), Some("HTTP error! status: 500"));
    }

    #[tokio::test]
    async fn badge_shows_next_to_attacks_tab() {
        let mut app = app();
        app.process_action(&Action::BadgeUpdated(AttackBadge {
            visible: true,
            count: 12,
        }))
        .unwrap();

        let mut terminal =
            ratatui::Terminal::new(ratatui::backend::TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let top: String = terminal.backend().buffer().content()[..100]
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        assert!(top.contains("2 Attacks (12)"));
    }
}
