// Attack endpoints: summary, stats, paged log, and the resolve/block actions.

use serde::Serialize;

use crate::client::{ApiClient, Page};
use crate::error::Error;
use crate::models::{AttackPage, AttackStats, AttackSummary, AttackTypes, Severity};

/// Server-side filter for `/attacks/logs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttackFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    /// Show only attacks still awaiting triage. The backend names this
    /// parameter `resolved_only` but filters on `resolved == false`.
    #[serde(rename = "resolved_only", skip_serializing_if = "std::ops::Not::not")]
    pub unresolved_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_ip: Option<String>,
}

impl ApiClient {
    /// Lightweight counters for the attack badge.
    pub async fn attack_summary(&self, hours: u32) -> Result<AttackSummary, Error> {
        let builder = self.get("attacks/summary")?.query(&[("hours", hours)]);
        self.fetch("attacks/summary", builder).await
    }

    pub async fn attack_stats(&self, hours: u32) -> Result<AttackStats, Error> {
        let builder = self.get("attacks/stats")?.query(&[("hours", hours)]);
        self.fetch("attacks/stats", builder).await
    }

    pub async fn attack_logs(&self, page: Page, filter: &AttackFilter) -> Result<AttackPage, Error> {
        let builder = self.get("attacks/logs")?.query(&page).query(filter);
        self.fetch("attacks/logs", builder).await
    }

    /// Distinct attack types seen by the backend, for filter options.
    pub async fn attack_types(&self) -> Result<Vec<String>, Error> {
        let builder = self.get("attacks/types")?;
        let types: AttackTypes = self.fetch("attacks/types", builder).await?;
        Ok(types.attack_types)
    }

    /// Mark an attack resolved. Any 2xx counts as confirmation.
    pub async fn resolve_attack(&self, id: i64) -> Result<(), Error> {
        self.post_no_content(&format!("attacks/{id}/resolve")).await
    }

    /// Mark an attack's source as blocked. Any 2xx counts as confirmation.
    pub async fn block_attack(&self, id: i64) -> Result<(), Error> {
        self.post_no_content(&format!("attacks/{id}/block")).await
    }
}
