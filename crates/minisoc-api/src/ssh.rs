// SSH endpoints: authentication stats, event log, timeline.

use serde::Serialize;
use strum::Display;

use crate::client::{ApiClient, Page};
use crate::error::Error;
use crate::models::{LogPage, SshLog, SshStats, SshStatus, SshTimeline};

/// Server-side filter for `/ssh/logs`. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SshLogFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SshStatus>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub suspicious_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

/// Bucket width for `/ssh/timeline`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TimelineInterval {
    #[default]
    Hour,
    Day,
}

impl ApiClient {
    /// Aggregate SSH counters over the last `hours`.
    pub async fn ssh_stats(&self, hours: u32) -> Result<SshStats, Error> {
        let builder = self.get("ssh/stats")?.query(&[("hours", hours)]);
        self.fetch("ssh/stats", builder).await
    }

    /// One page of SSH events, newest first.
    pub async fn ssh_logs(
        &self,
        page: Page,
        filter: &SshLogFilter,
    ) -> Result<LogPage<SshLog>, Error> {
        let builder = self.get("ssh/logs")?.query(&page).query(filter);
        self.fetch("ssh/logs", builder).await
    }

    /// SSH event counts bucketed by time and status.
    pub async fn ssh_timeline(
        &self,
        hours: u32,
        interval: TimelineInterval,
    ) -> Result<SshTimeline, Error> {
        let builder = self
            .get("ssh/timeline")?
            .query(&[("hours", hours)])
            .query(&[("interval", interval)]);
        self.fetch("ssh/timeline", builder).await
    }

    /// Reachability check used at startup: a one-hour SSH stats request.
    pub async fn probe(&self) -> Result<(), Error> {
        self.ssh_stats(1).await.map(drop)
    }
}
