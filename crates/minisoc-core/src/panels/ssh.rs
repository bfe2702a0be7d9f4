use std::time::Duration;

use minisoc_api::{ApiClient, SshLog, SshLogFilter, SshStats, SshStatus};

use super::row_page;
use crate::domain::Domain;
use crate::error::CoreError;
use crate::panel::{Cycle, Panel, PanelQuery};

/// Status values offered by the SSH status filter.
pub const SSH_STATUS_OPTIONS: [SshStatus; 2] = [SshStatus::Success, SshStatus::Failed];

/// SSH authentication stats and event log.
#[derive(Debug, Clone)]
pub struct SshPanel {
    api: ApiClient,
}

impl SshPanel {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

impl Panel for SshPanel {
    type Filter = SshLogFilter;
    type Stats = SshStats;
    type Row = SshLog;
    const NAME: &'static str = "ssh";

    fn poll_interval(&self) -> Duration {
        Domain::Ssh.poll_interval()
    }

    async fn fetch(&self, query: &PanelQuery<SshLogFilter>) -> Cycle<SshStats, SshLog> {
        let (stats, logs) = tokio::join!(
            self.api.ssh_stats(query.window_hours),
            self.api.ssh_logs(query.page_param(), &query.filter),
        );
        Cycle::default()
            .with_stats(stats.map_err(CoreError::from))
            .with_rows(row_page(logs))
    }
}
