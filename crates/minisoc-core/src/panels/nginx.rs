use std::time::Duration;

use minisoc_api::{
    AccessLogFilter, ApiClient, ErrorLevel, ErrorLogFilter, NginxAccessLog, NginxErrorLog,
    NginxStats,
};
use tokio::task::JoinHandle;

use super::row_page;
use crate::controller::PanelController;
use crate::domain::Domain;
use crate::error::CoreError;
use crate::panel::{Cycle, Panel, PanelQuery, RowPage};

pub const HTTP_METHOD_OPTIONS: [&str; 4] = ["GET", "POST", "PUT", "DELETE"];
pub const STATUS_CODE_OPTIONS: [u16; 3] = [200, 404, 500];
pub const ERROR_LEVEL_OPTIONS: [ErrorLevel; 3] =
    [ErrorLevel::Error, ErrorLevel::Warn, ErrorLevel::Crit];

/// Which nginx log the table shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
pub enum NginxView {
    #[default]
    Access,
    Error,
}

impl NginxView {
    pub fn toggled(self) -> Self {
        match self {
            Self::Access => Self::Error,
            Self::Error => Self::Access,
        }
    }
}

/// View selection plus the filter for each log. Switching views keeps the
/// other view's filter intact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NginxFilter {
    pub view: NginxView,
    pub access: AccessLogFilter,
    pub error: ErrorLogFilter,
}

/// One row of whichever log is in view.
#[derive(Debug, Clone, PartialEq)]
pub enum NginxEntry {
    Access(NginxAccessLog),
    Error(NginxErrorLog),
}

/// nginx access stats plus the access or error log.
#[derive(Debug, Clone)]
pub struct NginxPanel {
    api: ApiClient,
}

impl NginxPanel {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn fetch_rows(&self, query: &PanelQuery<NginxFilter>) -> Result<RowPage<NginxEntry>, CoreError> {
        let page = query.page_param();
        match query.filter.view {
            NginxView::Access => {
                let result = self.api.nginx_access_logs(page, &query.filter.access).await;
                row_page(result).map(|p| map_rows(p, NginxEntry::Access))
            }
            NginxView::Error => {
                let result = self.api.nginx_error_logs(page, &query.filter.error).await;
                row_page(result).map(|p| map_rows(p, NginxEntry::Error))
            }
        }
    }
}

fn map_rows<T>(page: RowPage<T>, f: impl Fn(T) -> NginxEntry) -> RowPage<NginxEntry> {
    RowPage {
        rows: page.rows.into_iter().map(f).collect(),
        total: page.total,
    }
}

impl Panel for NginxPanel {
    type Filter = NginxFilter;
    type Stats = NginxStats;
    type Row = NginxEntry;
    const NAME: &'static str = "nginx";

    fn poll_interval(&self) -> Duration {
        Domain::Nginx.poll_interval()
    }

    async fn fetch(&self, query: &PanelQuery<NginxFilter>) -> Cycle<NginxStats, NginxEntry> {
        let (stats, rows) = tokio::join!(
            self.api.nginx_stats(query.window_hours),
            self.fetch_rows(query),
        );
        Cycle::default()
            .with_stats(stats.map_err(CoreError::from))
            .with_rows(rows)
    }
}

pub type NginxController = PanelController<NginxPanel>;

impl PanelController<NginxPanel> {
    /// Switch between the access and error log and load the new view now.
    pub fn switch_view(&self, view: NginxView) -> Option<JoinHandle<bool>> {
        if self.query().filter.view == view {
            return None;
        }
        self.update_filter(|f| f.view = view);
        self.clear_rows();
        self.refresh()
    }
}
