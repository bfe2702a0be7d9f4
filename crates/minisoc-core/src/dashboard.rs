// ── Dashboard context ──
//
// Owns the API client, one controller per domain, the badge poller and the
// tab coordinator. Constructed once per session and handed to the UI.

use std::sync::Arc;
use std::time::Duration;

use minisoc_api::{ApiClient, TransportConfig};
use tracing::{info, warn};
use url::Url;

use crate::aggregate::{AttackBadge, attack_badge};
use crate::controller::PanelController;
use crate::coordinator::TabCoordinator;
use crate::domain::{DEFAULT_WINDOW_HOURS, Domain};
use crate::error::CoreError;
use crate::panels::{
    AttackController, AttackPanel, BadgePanel, NginxController, NginxPanel, OverviewPanel,
    SshPanel,
};

/// Connection and window settings for a dashboard session.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Backend host root; `/api` is appended per request.
    pub url: Url,
    pub timeout: Duration,
    /// Stats window, in hours, for every panel.
    pub window_hours: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            url: Url::parse("http://127.0.0.1:8000").expect("valid default URL"),
            timeout: Duration::from_secs(10),
            window_hours: DEFAULT_WINDOW_HOURS,
        }
    }
}

/// Application context for one dashboard session.
///
/// Cheap to clone; every controller inside is an `Arc` handle.
#[derive(Clone)]
pub struct Dashboard {
    api: ApiClient,
    window_hours: u32,
    overview: PanelController<OverviewPanel>,
    attacks: AttackController,
    ssh: PanelController<SshPanel>,
    nginx: NginxController,
    badge: PanelController<BadgePanel>,
    tabs: Arc<TabCoordinator>,
}

impl Dashboard {
    pub fn new(config: &DashboardConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let api = ApiClient::new(config.url.clone(), &transport)?;
        Ok(Self::with_client(api, config.window_hours))
    }

    /// Build every controller around an existing client. Nothing polls
    /// until [`launch`](Self::launch).
    pub fn with_client(api: ApiClient, window_hours: u32) -> Self {
        let overview = PanelController::new(OverviewPanel::new(api.clone()), window_hours);
        let attacks = PanelController::new(AttackPanel::new(api.clone()), window_hours);
        let ssh = PanelController::new(SshPanel::new(api.clone()), window_hours);
        let nginx = PanelController::new(NginxPanel::new(api.clone()), window_hours);
        let badge = PanelController::new(BadgePanel::new(api.clone()), window_hours);

        let tabs = TabCoordinator::new()
            .with_panel(Domain::Overview, overview.clone())
            .with_panel(Domain::Attacks, attacks.clone())
            .with_panel(Domain::Ssh, ssh.clone())
            .with_panel(Domain::Nginx, nginx.clone());

        Self {
            api,
            window_hours,
            overview,
            attacks,
            ssh,
            nginx,
            badge,
            tabs: Arc::new(tabs),
        }
    }

    /// Probe the backend, then start the badge poller and open Overview.
    ///
    /// A failed probe is fatal: nothing is started and the caller should
    /// show a blocking notice.
    pub async fn launch(&self) -> Result<(), CoreError> {
        let url = self.api.base_url().to_string();
        info!(%url, "probing backend");

        if let Err(e) = self.api.probe().await {
            warn!(%url, error = %e, "backend unreachable");
            return Err(CoreError::BackendUnreachable {
                url,
                reason: e.to_string(),
            });
        }

        self.badge.start();
        self.tabs.switch_to(Domain::Overview);
        info!("dashboard launched");
        Ok(())
    }

    /// Stop every timer, including the badge poller.
    pub fn shutdown(&self) {
        self.tabs.stop_all();
        self.badge.stop();
        info!("dashboard stopped");
    }

    pub fn switch_to(&self, domain: Domain) {
        self.tabs.switch_to(domain);
    }

    pub fn active(&self) -> Option<Domain> {
        self.tabs.active()
    }

    /// Current tab badge, hidden until the first summary arrives.
    pub fn badge_state(&self) -> AttackBadge {
        self.badge
            .view()
            .stats
            .as_ref()
            .map(attack_badge)
            .unwrap_or_default()
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn window_hours(&self) -> u32 {
        self.window_hours
    }

    pub fn tabs(&self) -> &TabCoordinator {
        &self.tabs
    }

    pub fn overview(&self) -> &PanelController<OverviewPanel> {
        &self.overview
    }

    pub fn attacks(&self) -> &AttackController {
        &self.attacks
    }

    pub fn ssh(&self) -> &PanelController<SshPanel> {
        &self.ssh
    }

    pub fn nginx(&self) -> &NginxController {
        &self.nginx
    }

    pub fn badge(&self) -> &PanelController<BadgePanel> {
        &self.badge
    }
}
