// Wire models for the monitoring backend.
//
// Records are immutable snapshots; every poll replaces the previous batch.
// Enumerated fields carry an `Unknown` fallback so a new value on the server
// never fails a whole page.

use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter};

/// Nullable columns arrive as `null`; read them as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Enumerations ────────────────────────────────────────────────────

/// Attack severity as classified by the backend.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Outcome of an SSH authentication event.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SshStatus {
    Success,
    Failed,
    Session,
    Closed,
    #[default]
    #[serde(other)]
    Unknown,
}

/// nginx error-log level.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ErrorLevel {
    Emerg,
    Alert,
    Crit,
    Error,
    Warn,
    Notice,
    Info,
    Debug,
    #[default]
    #[serde(other)]
    Unknown,
}

// ── Log records ─────────────────────────────────────────────────────

/// One SSH authentication event.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SshLog {
    #[serde(default)]
    pub id: Option<i64>,
    pub timestamp: String,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: SshStatus,
    #[serde(default)]
    pub auth_method: Option<String>,
    #[serde(default)]
    pub is_suspicious: bool,
}

/// One nginx access-log line.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NginxAccessLog {
    #[serde(default)]
    pub id: Option<i64>,
    pub timestamp: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub ip_address: Option<String>,
    /// Body size in bytes.
    #[serde(default)]
    pub response_size: Option<u64>,
    /// Upstream time in seconds.
    #[serde(default)]
    pub request_time: Option<f64>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// One nginx error-log line.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NginxErrorLog {
    #[serde(default)]
    pub id: Option<i64>,
    pub timestamp: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub level: ErrorLevel,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default)]
    pub client_ip: Option<String>,
}

/// A detected attack.
///
/// `resolved` and `blocked` only change on the server; the client observes
/// them through a reload after a confirmed action.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AttackRecord {
    pub id: i64,
    pub timestamp: String,
    pub attack_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub severity: Severity,
    #[serde(default)]
    pub description: Option<String>,
    pub source_ip: String,
    #[serde(default)]
    pub source_country: Option<String>,
    #[serde(default)]
    pub target_path: Option<String>,
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub resolved: bool,
    #[serde(default)]
    pub blocked: bool,
}

// ── Pages ───────────────────────────────────────────────────────────

/// A page of log records (`/ssh/logs`, `/nginx/*/logs`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogPage<T> {
    #[serde(default = "Vec::new")]
    pub logs: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

/// A page of attack records (`/attacks/logs`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttackPage {
    #[serde(default)]
    pub attacks: Vec<AttackRecord>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

// ── Ranked counters ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IpCount {
    pub ip: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PathCount {
    pub path: String,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatusCount {
    pub status: u16,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SeverityCount {
    pub severity: Severity,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub attack_type: String,
    pub count: u64,
}

// ── Stats snapshots ─────────────────────────────────────────────────

/// `GET /ssh/stats`
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct SshStats {
    #[serde(default)]
    pub period_hours: Option<u32>,
    #[serde(default)]
    pub total_attempts: u64,
    #[serde(default)]
    pub successful: u64,
    #[serde(default)]
    pub failed: u64,
    #[serde(default)]
    pub suspicious: u64,
    #[serde(default)]
    pub top_ips: Vec<IpCount>,
    #[serde(default)]
    pub top_failed_ips: Vec<IpCount>,
}

/// `GET /nginx/stats`
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct NginxStats {
    #[serde(default)]
    pub access: AccessStats,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct AccessStats {
    #[serde(default)]
    pub total_requests: u64,
    /// Mean upstream time in seconds.
    #[serde(default)]
    pub avg_response_time: Option<f64>,
    #[serde(default)]
    pub top_paths: Vec<PathCount>,
    #[serde(default)]
    pub status_distribution: Vec<StatusCount>,
}

/// `GET /attacks/summary`, the lightweight payload behind the tab badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct AttackSummary {
    #[serde(default)]
    pub total_attacks: u64,
    #[serde(default)]
    pub critical_attacks: u64,
    #[serde(default)]
    pub unresolved_attacks: u64,
}

/// `GET /attacks/stats`
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct AttackStats {
    #[serde(default)]
    pub period_hours: Option<u32>,
    #[serde(default)]
    pub total_attacks: u64,
    #[serde(default)]
    pub critical_attacks: u64,
    #[serde(default)]
    pub unresolved_attacks: u64,
    #[serde(default)]
    pub blocked_attacks: u64,
    #[serde(default)]
    pub severity_distribution: Vec<SeverityCount>,
    #[serde(default)]
    pub attack_types: Vec<TypeCount>,
    #[serde(default)]
    pub top_attackers: Vec<IpCount>,
    #[serde(default)]
    pub timeline: Vec<TimelinePoint>,
}

/// `GET /ssh/timeline`
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct SshTimeline {
    #[serde(default)]
    pub interval: String,
    #[serde(default)]
    pub data: Vec<TimelinePoint>,
}

/// One bucket of a timeline. SSH timelines split buckets by status, so the
/// same `time` can appear several times.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimelinePoint {
    #[serde(default, alias = "bucket")]
    pub time: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    pub count: u64,
}

/// `GET /attacks/types`
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct AttackTypes {
    #[serde(default)]
    pub attack_types: Vec<String>,
}
