//! UI actions. Every state change in the TUI goes through one of these.

use std::sync::Arc;

use minisoc_core::aggregate::AttackBadge;
use minisoc_core::{
    AttackFilter, AttackRecord, AttackStats, Domain, NginxEntry, NginxFilter, NginxStats,
    NginxView, OverviewStats, PanelPhase, PanelView, SshLog, SshLogFilter, SshStats,
};

pub type OverviewData = PanelView<OverviewStats, ()>;
pub type AttackData = PanelView<AttackStats, AttackRecord>;
pub type SshData = PanelView<SshStats, SshLog>;
pub type NginxData = PanelView<NginxStats, NginxEntry>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

/// A toast shown in the bottom-right corner for a few seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchTab(Domain),
    ToggleHelp,

    // ── Data (published by the panel controllers) ─────────────────
    OverviewUpdated(Arc<OverviewData>),
    AttacksUpdated(Arc<AttackData>),
    SshUpdated(Arc<SshData>),
    NginxUpdated(Arc<NginxData>),
    PhaseChanged(Domain, PanelPhase),
    BadgeUpdated(AttackBadge),
    AttackTypesLoaded(Vec<String>),

    // ── Filters and paging ────────────────────────────────────────
    ApplySshFilter(SshLogFilter),
    ApplyNginxFilter(NginxFilter),
    ApplyAttackFilter(AttackFilter),
    SwitchNginxView(NginxView),
    NextPage(Domain),
    PrevPage(Domain),

    // ── Attack commands ───────────────────────────────────────────
    ResolveAttack(i64),
    BlockAttack(i64),

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}

impl Action {
    /// The domain whose screen should receive this action, for actions
    /// that carry panel data.
    pub fn data_domain(&self) -> Option<Domain> {
        match self {
            Self::OverviewUpdated(_) => Some(Domain::Overview),
            Self::AttacksUpdated(_) | Self::AttackTypesLoaded(_) => Some(Domain::Attacks),
            Self::SshUpdated(_) => Some(Domain::Ssh),
            Self::NginxUpdated(_) => Some(Domain::Nginx),
            _ => None,
        }
    }
}
