// minisoc-api: Async client for the minisoc security-monitoring backend

pub mod attacks;
pub mod client;
pub mod error;
pub mod models;
pub mod nginx;
pub mod ssh;
pub mod transport;

pub use attacks::AttackFilter;
pub use client::{API_BASE_PATH, ApiClient, Page, RequestOptions};
pub use error::Error;
pub use models::{
    AccessStats, AttackPage, AttackRecord, AttackStats, AttackSummary, AttackTypes, ErrorLevel,
    IpCount, LogPage, NginxAccessLog, NginxErrorLog, NginxStats, PathCount, Severity,
    SeverityCount, SshLog, SshStats, SshStatus, SshTimeline, StatusCount, TimelinePoint,
    TypeCount,
};
pub use nginx::{AccessLogFilter, ErrorLogFilter};
pub use ssh::{SshLogFilter, TimelineInterval};
pub use transport::TransportConfig;
