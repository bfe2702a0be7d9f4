//! Derived aggregates and visual classification for panel renderers.
//!
//! Everything here is a pure function of a stats snapshot or a record:
//! status-code bucketing, top-N slices, bar ratios, and the badge / row
//! highlight chosen for severities, SSH outcomes, HTTP statuses and nginx
//! error levels. The terminal layer maps [`BadgeKind`] and [`RowHighlight`]
//! onto colors; nothing here knows about styling.

use std::collections::BTreeMap;

use minisoc_api::{
    AttackStats, AttackSummary, ErrorLevel, IpCount, PathCount, Severity, StatusCount, SshStatus,
    TimelinePoint, TypeCount,
};

/// How many entries ranked lists show.
pub const TOP_N: usize = 5;

// ── Ranked lists ────────────────────────────────────────────────────

/// A `(label, count)` pair from a server-ranked list.
pub trait Ranked {
    fn label(&self) -> &str;
    fn count(&self) -> u64;
}

impl Ranked for IpCount {
    fn label(&self) -> &str {
        &self.ip
    }
    fn count(&self) -> u64 {
        self.count
    }
}

impl Ranked for PathCount {
    fn label(&self) -> &str {
        &self.path
    }
    fn count(&self) -> u64 {
        self.count
    }
}

impl Ranked for TypeCount {
    fn label(&self) -> &str {
        &self.attack_type
    }
    fn count(&self) -> u64 {
        self.count
    }
}

/// First `n` items in server order. The server ranks; we never re-sort.
pub fn top_n<T>(items: &[T], n: usize) -> &[T] {
    &items[..items.len().min(n)]
}

/// One bar of a horizontal bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarEntry<'a> {
    pub label: &'a str,
    pub count: u64,
    /// `count / max(count)` over the whole list, in `0.0..=1.0`.
    pub ratio: f64,
}

/// Bar ratios relative to the largest count. An all-zero list yields zero
/// ratios rather than NaN.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn bar_chart<T: Ranked>(items: &[T]) -> Vec<BarEntry<'_>> {
    let max = items.iter().map(Ranked::count).max().unwrap_or(0);
    items
        .iter()
        .map(|item| BarEntry {
            label: item.label(),
            count: item.count(),
            ratio: if max == 0 {
                0.0
            } else {
                item.count() as f64 / max as f64
            },
        })
        .collect()
}

// ── Status codes ────────────────────────────────────────────────────

/// Request counts grouped by HTTP status class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusBuckets {
    /// `[200, 300)`
    pub success: u64,
    /// `[400, 500)`
    pub client_error: u64,
    /// `[500, ∞)`
    pub server_error: u64,
}

/// Bucket a status distribution. 1xx and 3xx are not counted.
pub fn bucket_status_codes(distribution: &[StatusCount]) -> StatusBuckets {
    distribution
        .iter()
        .fold(StatusBuckets::default(), |mut acc, s| {
            match s.status {
                200..300 => acc.success += s.count,
                400..500 => acc.client_error += s.count,
                500.. => acc.server_error += s.count,
                _ => {}
            }
            acc
        })
}

// ── Badges ──────────────────────────────────────────────────────────

/// Visual weight of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeKind {
    Success,
    Info,
    Warning,
    Danger,
}

/// Row-level emphasis in the attack table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowHighlight {
    #[default]
    None,
    High,
    Critical,
}

/// Badge, icon and row emphasis for an attack severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityStyle {
    pub badge: BadgeKind,
    pub icon: &'static str,
    pub highlight: RowHighlight,
}

impl SeverityStyle {
    /// Unknown severities fall back to a neutral info badge.
    pub fn classify(severity: Severity) -> Self {
        match severity {
            Severity::Critical => Self {
                badge: BadgeKind::Danger,
                icon: "✖",
                highlight: RowHighlight::Critical,
            },
            Severity::High => Self {
                badge: BadgeKind::Warning,
                icon: "!",
                highlight: RowHighlight::High,
            },
            Severity::Medium => Self {
                badge: BadgeKind::Info,
                icon: "i",
                highlight: RowHighlight::None,
            },
            Severity::Low => Self {
                badge: BadgeKind::Success,
                icon: "✓",
                highlight: RowHighlight::None,
            },
            Severity::Unknown => Self {
                badge: BadgeKind::Info,
                icon: "●",
                highlight: RowHighlight::None,
            },
        }
    }
}

pub fn ssh_status_badge(status: SshStatus) -> BadgeKind {
    match status {
        SshStatus::Success => BadgeKind::Success,
        SshStatus::Failed => BadgeKind::Danger,
        SshStatus::Closed => BadgeKind::Warning,
        SshStatus::Session | SshStatus::Unknown => BadgeKind::Info,
    }
}

pub fn http_status_badge(code: u16) -> BadgeKind {
    match code {
        200..300 => BadgeKind::Success,
        400..500 => BadgeKind::Warning,
        500.. => BadgeKind::Danger,
        _ => BadgeKind::Info,
    }
}

pub fn error_level_badge(level: ErrorLevel) -> BadgeKind {
    match level {
        ErrorLevel::Emerg | ErrorLevel::Alert | ErrorLevel::Crit | ErrorLevel::Error => {
            BadgeKind::Danger
        }
        ErrorLevel::Warn => BadgeKind::Warning,
        _ => BadgeKind::Info,
    }
}

/// Resolution badge for an attack row.
pub fn resolution_badge(resolved: bool) -> (BadgeKind, &'static str) {
    if resolved {
        (BadgeKind::Success, "✓ Resolved")
    } else {
        (BadgeKind::Warning, "◷ Pending")
    }
}

// ── Attack aggregates ───────────────────────────────────────────────

/// Banner text when critical attacks were seen in the stats window.
pub fn critical_alert(stats: &AttackStats, window_hours: u32) -> Option<String> {
    (stats.critical_attacks > 0).then(|| {
        format!(
            "{} critical attack(s) detected in the last {window_hours} hours. Immediate action required!",
            stats.critical_attacks
        )
    })
}

/// Count of HIGH attacks from the severity distribution, 0 when absent.
pub fn high_priority_count(stats: &AttackStats) -> u64 {
    stats
        .severity_distribution
        .iter()
        .find(|s| s.severity == Severity::High)
        .map_or(0, |s| s.count)
}

/// Tab badge state derived from the attack summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttackBadge {
    pub visible: bool,
    pub count: u64,
}

pub fn attack_badge(summary: &AttackSummary) -> AttackBadge {
    AttackBadge {
        visible: summary.total_attacks > 0,
        count: summary.total_attacks,
    }
}

// ── Timelines ───────────────────────────────────────────────────────

/// Sum timeline points per time bucket (SSH timelines split each bucket by
/// status). Buckets come back in chronological order; points without a
/// time are dropped.
pub fn timeline_series(points: &[TimelinePoint]) -> Vec<(String, u64)> {
    let mut buckets: BTreeMap<&str, u64> = BTreeMap::new();
    for p in points {
        if let Some(time) = p.time.as_deref() {
            *buckets.entry(time).or_default() += p.count;
        }
    }
    buckets
        .into_iter()
        .map(|(time, count)| (time.to_owned(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use minisoc_api::SeverityCount;
    use pretty_assertions::assert_eq;

    use super::*;

    fn status(status: u16, count: u64) -> StatusCount {
        StatusCount { status, count }
    }

    fn ip(ip: &str, count: u64) -> IpCount {
        IpCount {
            ip: ip.into(),
            count,
        }
    }

    #[test]
    fn status_buckets_skip_redirects() {
        let dist = [status(200, 10), status(301, 2), status(404, 5), status(500, 1)];
        assert_eq!(
            bucket_status_codes(&dist),
            StatusBuckets {
                success: 10,
                client_error: 5,
                server_error: 1,
            }
        );
    }

    #[test]
    fn status_buckets_merge_codes_in_class() {
        let dist = [status(200, 3), status(204, 2), status(503, 4), status(599, 1)];
        let b = bucket_status_codes(&dist);
        assert_eq!(b.success, 5);
        assert_eq!(b.server_error, 5);
        assert_eq!(b.client_error, 0);
    }

    #[test]
    fn top_n_keeps_server_order() {
        let items: Vec<IpCount> = (0..8).map(|i| ip(&format!("10.0.0.{i}"), i)).collect();
        let top = top_n(&items, TOP_N);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].ip, "10.0.0.0");
        assert_eq!(top[4].ip, "10.0.0.4");
        assert_eq!(top_n(&items[..2], TOP_N).len(), 2);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn bar_ratios_relative_to_max() {
        let items = [ip("a", 10), ip("b", 5), ip("c", 0)];
        let bars = bar_chart(&items);
        assert_eq!(bars[0].ratio, 1.0);
        assert_eq!(bars[1].ratio, 0.5);
        assert_eq!(bars[2].ratio, 0.0);
        assert_eq!(bars[1].label, "b");
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn bar_ratios_all_zero() {
        let items = [ip("a", 0)];
        let bars = bar_chart(&items);
        assert_eq!(bars[0].ratio, 0.0);
        assert!(bar_chart::<IpCount>(&[]).is_empty());
    }

    #[test]
    fn severity_styles() {
        let crit = SeverityStyle::classify(Severity::Critical);
        assert_eq!(crit.badge, BadgeKind::Danger);
        assert_eq!(crit.highlight, RowHighlight::Critical);

        let high = SeverityStyle::classify(Severity::High);
        assert_eq!(high.badge, BadgeKind::Warning);
        assert_eq!(high.highlight, RowHighlight::High);

        assert_eq!(SeverityStyle::classify(Severity::Medium).badge, BadgeKind::Info);
        assert_eq!(SeverityStyle::classify(Severity::Low).badge, BadgeKind::Success);

        let unknown = SeverityStyle::classify(Severity::Unknown);
        assert_eq!(unknown.badge, BadgeKind::Info);
        assert_eq!(unknown.highlight, RowHighlight::None);
    }

    #[test]
    fn record_badges() {
        assert_eq!(ssh_status_badge(SshStatus::Success), BadgeKind::Success);
        assert_eq!(ssh_status_badge(SshStatus::Failed), BadgeKind::Danger);
        assert_eq!(ssh_status_badge(SshStatus::Session), BadgeKind::Info);
        assert_eq!(ssh_status_badge(SshStatus::Closed), BadgeKind::Warning);
        assert_eq!(ssh_status_badge(SshStatus::Unknown), BadgeKind::Info);

        assert_eq!(http_status_badge(200), BadgeKind::Success);
        assert_eq!(http_status_badge(302), BadgeKind::Info);
        assert_eq!(http_status_badge(404), BadgeKind::Warning);
        assert_eq!(http_status_badge(502), BadgeKind::Danger);

        assert_eq!(error_level_badge(ErrorLevel::Crit), BadgeKind::Danger);
        assert_eq!(error_level_badge(ErrorLevel::Warn), BadgeKind::Warning);
        assert_eq!(error_level_badge(ErrorLevel::Notice), BadgeKind::Info);
    }

    #[test]
    fn critical_alert_only_when_nonzero() {
        let mut stats = AttackStats::default();
        assert_eq!(critical_alert(&stats, 24), None);

        stats.critical_attacks = 3;
        assert_eq!(
            critical_alert(&stats, 24).as_deref(),
            Some("3 critical attack(s) detected in the last 24 hours. Immediate action required!")
        );
    }

    #[test]
    fn high_priority_from_distribution() {
        let mut stats = AttackStats::default();
        assert_eq!(high_priority_count(&stats), 0);

        stats.severity_distribution = vec![
            SeverityCount {
                severity: Severity::Critical,
                count: 2,
            },
            SeverityCount {
                severity: Severity::High,
                count: 7,
            },
        ];
        assert_eq!(high_priority_count(&stats), 7);
    }

    #[test]
    fn badge_visibility() {
        let hidden = attack_badge(&AttackSummary::default());
        assert!(!hidden.visible);

        let shown = attack_badge(&AttackSummary {
            total_attacks: 4,
            ..AttackSummary::default()
        });
        assert_eq!(
            shown,
            AttackBadge {
                visible: true,
                count: 4
            }
        );
    }

    #[test]
    fn timeline_sums_statuses_per_bucket() {
        let point = |time: Option<&str>, status: &str, count| TimelinePoint {
            time: time.map(str::to_owned),
            status: Some(status.into()),
            count,
        };
        let points = [
            point(Some("2024-05-01T11:00:00"), "failed", 2),
            point(Some("2024-05-01T10:00:00"), "failed", 4),
            point(Some("2024-05-01T10:00:00"), "success", 1),
            point(None, "failed", 9),
        ];
        assert_eq!(
            timeline_series(&points),
            vec![
                ("2024-05-01T10:00:00".to_owned(), 5),
                ("2024-05-01T11:00:00".to_owned(), 2),
            ]
        );
    }
}
