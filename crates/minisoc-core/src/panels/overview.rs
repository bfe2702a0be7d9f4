use std::time::Duration;

use minisoc_api::{ApiClient, AttackSummary, NginxStats, SshStats, SshTimeline, TimelineInterval};

use crate::domain::Domain;
use crate::error::CoreError;
use crate::panel::{Cycle, Panel, PanelQuery};

/// The overview tab's stats, assembled from four requests. A part that
/// failed keeps its previous value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverviewStats {
    pub attacks: Option<AttackSummary>,
    pub ssh: Option<SshStats>,
    pub nginx: Option<NginxStats>,
    pub timeline: Option<SshTimeline>,
}

/// Cross-domain summary tiles, top lists and the SSH timeline.
#[derive(Debug, Clone)]
pub struct OverviewPanel {
    api: ApiClient,
}

impl OverviewPanel {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

fn keep<T>(result: Result<T, minisoc_api::Error>, errors: &mut Vec<CoreError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(CoreError::from(e));
            None
        }
    }
}

impl Panel for OverviewPanel {
    type Filter = ();
    type Stats = OverviewStats;
    type Row = ();
    const NAME: &'static str = "overview";

    fn poll_interval(&self) -> Duration {
        Domain::Overview.poll_interval()
    }

    async fn fetch(&self, query: &PanelQuery<()>) -> Cycle<OverviewStats, ()> {
        let hours = query.window_hours;
        let (attacks, ssh, nginx, timeline) = tokio::join!(
            self.api.attack_summary(hours),
            self.api.ssh_stats(hours),
            self.api.nginx_stats(hours),
            self.api.ssh_timeline(hours, TimelineInterval::Hour),
        );

        let mut errors = Vec::new();
        let stats = OverviewStats {
            attacks: keep(attacks, &mut errors),
            ssh: keep(ssh, &mut errors),
            nginx: keep(nginx, &mut errors),
            timeline: keep(timeline, &mut errors),
        };
        Cycle {
            stats: Some(stats),
            rows: None,
            errors,
        }
    }

    fn merge_stats(previous: Option<OverviewStats>, fresh: OverviewStats) -> OverviewStats {
        let previous = previous.unwrap_or_default();
        OverviewStats {
            attacks: fresh.attacks.or(previous.attacks),
            ssh: fresh.ssh.or(previous.ssh),
            nginx: fresh.nginx.or(previous.nginx),
            timeline: fresh.timeline.or(previous.timeline),
        }
    }
}
