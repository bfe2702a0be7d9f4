use std::time::Duration;

use minisoc_api::{ApiClient, AttackSummary};

use crate::domain::BADGE_INTERVAL;
use crate::error::CoreError;
use crate::panel::{Cycle, Panel, PanelQuery};

/// Attack summary behind the tab badge. Polled for the whole session,
/// whichever tab is active.
#[derive(Debug, Clone)]
pub struct BadgePanel {
    api: ApiClient,
}

impl BadgePanel {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

impl Panel for BadgePanel {
    type Filter = ();
    type Stats = AttackSummary;
    type Row = ();
    const NAME: &'static str = "badge";

    fn poll_interval(&self) -> Duration {
        BADGE_INTERVAL
    }

    async fn fetch(&self, query: &PanelQuery<()>) -> Cycle<AttackSummary, ()> {
        let summary = self.api.attack_summary(query.window_hours).await;
        Cycle::default().with_stats(summary.map_err(CoreError::from))
    }
}
