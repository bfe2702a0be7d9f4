//! Data bridge: forwards panel controller watch channels to TUI actions.
//!
//! Runs as a background task after a successful launch. Every published
//! view, phase transition and badge update becomes an [`Action`] on the
//! app's action channel.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use minisoc_core::aggregate::attack_badge;
use minisoc_core::{Dashboard, Domain};

use crate::action::Action;

/// Forward controller updates until `cancel` fires.
pub async fn spawn_data_bridge(
    dashboard: Dashboard,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut overview = dashboard.overview().subscribe_view();
    let mut attacks = dashboard.attacks().subscribe_view();
    let mut ssh = dashboard.ssh().subscribe_view();
    let mut nginx = dashboard.nginx().subscribe_view();
    let mut badge = dashboard.badge().subscribe_view();

    let mut overview_phase = dashboard.overview().subscribe_phase();
    let mut attacks_phase = dashboard.attacks().subscribe_phase();
    let mut ssh_phase = dashboard.ssh().subscribe_phase();
    let mut nginx_phase = dashboard.nginx().subscribe_phase();

    // Launch already opened Overview and the badge; push what they have so far.
    let snapshot = overview.borrow_and_update().clone();
    let _ = action_tx.send(Action::OverviewUpdated(Arc::new(snapshot)));
    let phase = *overview_phase.borrow_and_update();
    let _ = action_tx.send(Action::PhaseChanged(Domain::Overview, phase));
    // The first badge poll may have landed before we subscribed.
    if let Some(summary) = badge.borrow_and_update().stats {
        let _ = action_tx.send(Action::BadgeUpdated(attack_badge(&summary)));
    }

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Ok(()) = overview.changed() => {
                debug!("dispatching OverviewUpdated");
                let view = overview.borrow_and_update().clone();
                let _ = action_tx.send(Action::OverviewUpdated(Arc::new(view)));
            }
            Ok(()) = attacks.changed() => {
                debug!("dispatching AttacksUpdated");
                let view = attacks.borrow_and_update().clone();
                let _ = action_tx.send(Action::AttacksUpdated(Arc::new(view)));
            }
            Ok(()) = ssh.changed() => {
                let view = ssh.borrow_and_update().clone();
                let _ = action_tx.send(Action::SshUpdated(Arc::new(view)));
            }
            Ok(()) = nginx.changed() => {
                let view = nginx.borrow_and_update().clone();
                let _ = action_tx.send(Action::NginxUpdated(Arc::new(view)));
            }
            Ok(()) = badge.changed() => {
                let summary = badge.borrow_and_update().stats;
                if let Some(summary) = summary {
                    let _ = action_tx.send(Action::BadgeUpdated(attack_badge(&summary)));
                }
            }
            Ok(()) = overview_phase.changed() => {
                let phase = *overview_phase.borrow_and_update();
                let _ = action_tx.send(Action::PhaseChanged(Domain::Overview, phase));
            }
            Ok(()) = attacks_phase.changed() => {
                let phase = *attacks_phase.borrow_and_update();
                let _ = action_tx.send(Action::PhaseChanged(Domain::Attacks, phase));
            }
            Ok(()) = ssh_phase.changed() => {
                let phase = *ssh_phase.borrow_and_update();
                let _ = action_tx.send(Action::PhaseChanged(Domain::Ssh, phase));
            }
            Ok(()) = nginx_phase.changed() => {
                let phase = *nginx_phase.borrow_and_update();
                let _ = action_tx.send(Action::PhaseChanged(Domain::Nginx, phase));
            }
        }
    }

    debug!("data bridge shut down");
}
