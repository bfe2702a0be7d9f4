// nginx endpoints: access stats, access log, error log.

use serde::Serialize;

use crate::client::{ApiClient, Page};
use crate::error::Error;
use crate::models::{ErrorLevel, LogPage, NginxAccessLog, NginxErrorLog, NginxStats};

/// Server-side filter for `/nginx/access/logs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccessLogFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

/// Server-side filter for `/nginx/error/logs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorLogFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<ErrorLevel>,
}

impl ApiClient {
    pub async fn nginx_stats(&self, hours: u32) -> Result<NginxStats, Error> {
        let builder = self.get("nginx/stats")?.query(&[("hours", hours)]);
        self.fetch("nginx/stats", builder).await
    }

    pub async fn nginx_access_logs(
        &self,
        page: Page,
        filter: &AccessLogFilter,
    ) -> Result<LogPage<NginxAccessLog>, Error> {
        let builder = self.get("nginx/access/logs")?.query(&page).query(filter);
        self.fetch("nginx/access/logs", builder).await
    }

    pub async fn nginx_error_logs(
        &self,
        page: Page,
        filter: &ErrorLogFilter,
    ) -> Result<LogPage<NginxErrorLog>, Error> {
        let builder = self.get("nginx/error/logs")?.query(&page).query(filter);
        self.fetch("nginx/error/logs", builder).await
    }
}
