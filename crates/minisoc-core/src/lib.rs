//! Polling lifecycle and aggregation layer between `minisoc-api` and the UI.
//!
//! - **[`PanelController`]**: drives one [`Panel`] through
//!   Idle/Loading/Active/Error. Owns the poll timer, the filter and paging
//!   state, and a generation counter that discards stale or superseded
//!   responses. Views are published on `tokio::sync::watch` channels.
//!
//! - **[`TabCoordinator`]**: keeps exactly one domain panel polling at a
//!   time. Switching tabs stops the outgoing panel before the target starts.
//!
//! - **[`Dashboard`]**: the session context. Probes the backend, runs the
//!   always-on attack badge poller, and owns every controller.
//!
//! - **[`aggregate`] / [`format`]**: pure helpers for status buckets, top-N
//!   lists, bar ratios, severity badges and display formatting.

pub mod aggregate;
pub mod controller;
pub mod coordinator;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod format;
pub mod panel;
pub mod panels;

// ── Primary re-exports ──────────────────────────────────────────────
pub use controller::{PanelController, PanelLifecycle};
pub use coordinator::TabCoordinator;
pub use dashboard::{Dashboard, DashboardConfig};
pub use domain::{BADGE_INTERVAL, DEFAULT_WINDOW_HOURS, Domain, PAGE_SIZE};
pub use error::CoreError;
pub use panel::{Cycle, Panel, PanelPhase, PanelQuery, PanelView, RowPage, TableView};
pub use panels::{
    AttackController, AttackPanel, BadgePanel, NginxController, NginxEntry, NginxFilter,
    NginxPanel, NginxView, OverviewPanel, OverviewStats, SshPanel,
};

// Wire types the UI renders directly.
pub use minisoc_api::{
    AccessLogFilter, AttackFilter, AttackRecord, AttackStats, AttackSummary, ErrorLevel,
    ErrorLogFilter, IpCount, NginxAccessLog, NginxErrorLog, NginxStats, Severity, SshLog,
    SshLogFilter, SshStats, SshStatus, TypeCount,
};
