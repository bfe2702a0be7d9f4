use std::time::Duration;

use minisoc_api::{ApiClient, AttackFilter, AttackRecord, AttackStats, Severity};
use tracing::{info, warn};

use crate::controller::PanelController;
use crate::domain::Domain;
use crate::error::CoreError;
use crate::panel::{Cycle, Panel, PanelQuery, RowPage};

/// Built-in attack type options, used until `/attacks/types` answers.
pub const ATTACK_TYPE_OPTIONS: [&str; 6] = [
    "SQL Injection",
    "XSS",
    "Path Traversal",
    "Command Injection",
    "Web Shell",
    "Suspicious Access",
];

/// Severity filter options, most severe first.
pub const SEVERITY_OPTIONS: [Severity; 4] = [
    Severity::Critical,
    Severity::High,
    Severity::Medium,
    Severity::Low,
];

/// Attack stats and the paged attack log.
#[derive(Debug, Clone)]
pub struct AttackPanel {
    api: ApiClient,
}

impl AttackPanel {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Attack types known to the backend, or the built-in list if the
    /// request fails or comes back empty.
    pub async fn attack_types(&self) -> Vec<String> {
        match self.api.attack_types().await {
            Ok(types) if !types.is_empty() => types,
            Ok(_) => fallback_types(),
            Err(e) => {
                warn!(error = %e, "attack types unavailable, using built-in list");
                fallback_types()
            }
        }
    }
}

fn fallback_types() -> Vec<String> {
    ATTACK_TYPE_OPTIONS.iter().map(|&t| t.to_owned()).collect()
}

impl Panel for AttackPanel {
    type Filter = AttackFilter;
    type Stats = AttackStats;
    type Row = AttackRecord;
    const NAME: &'static str = "attacks";

    fn poll_interval(&self) -> Duration {
        Domain::Attacks.poll_interval()
    }

    async fn fetch(&self, query: &PanelQuery<AttackFilter>) -> Cycle<AttackStats, AttackRecord> {
        let (stats, logs) = tokio::join!(
            self.api.attack_stats(query.window_hours),
            self.api.attack_logs(query.page_param(), &query.filter),
        );
        let rows = logs
            .map(|page| RowPage {
                rows: page.attacks,
                total: page.total,
            })
            .map_err(CoreError::from);
        Cycle::default()
            .with_stats(stats.map_err(CoreError::from))
            .with_rows(rows)
    }
}

pub type AttackController = PanelController<AttackPanel>;

impl PanelController<AttackPanel> {
    /// Mark an attack resolved, then reload stats and logs.
    ///
    /// The record is never edited locally: the `resolved` flag the user sees
    /// always comes from the reload. On failure nothing is reloaded and the
    /// error is returned.
    pub async fn resolve(&self, id: i64) -> Result<(), CoreError> {
        self.panel().api.resolve_attack(id).await?;
        info!(attack_id = id, "attack resolved");
        self.reload().await;
        Ok(())
    }

    /// Mark an attack's source blocked, then reload stats and logs.
    pub async fn block(&self, id: i64) -> Result<(), CoreError> {
        self.panel().api.block_attack(id).await?;
        info!(attack_id = id, "attack source blocked");
        self.reload().await;
        Ok(())
    }

    async fn reload(&self) {
        if let Some(handle) = self.refresh() {
            if let Err(e) = handle.await {
                warn!(error = %e, "attack reload task failed");
            }
        }
    }
}
