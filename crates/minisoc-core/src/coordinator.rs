// ── Tab coordinator ──
//
// Guarantees at most one domain panel is polling: switching tabs stops the
// outgoing panel before the incoming one starts.

use std::collections::BTreeMap;
use std::sync::Mutex;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::controller::PanelLifecycle;
use crate::domain::Domain;

/// Owns the active-tab selection and the lifecycle handles of every domain
/// panel.
pub struct TabCoordinator {
    panels: BTreeMap<Domain, Box<dyn PanelLifecycle>>,
    active: watch::Sender<Option<Domain>>,
    switching: Mutex<()>,
}

impl Default for TabCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl TabCoordinator {
    pub fn new() -> Self {
        let (active, _) = watch::channel(None);
        Self {
            panels: BTreeMap::new(),
            active,
            switching: Mutex::new(()),
        }
    }

    /// Register the panel that backs `domain`, replacing any earlier one.
    pub fn register(&mut self, domain: Domain, panel: impl PanelLifecycle + 'static) {
        self.panels.insert(domain, Box::new(panel));
    }

    pub fn with_panel(mut self, domain: Domain, panel: impl PanelLifecycle + 'static) -> Self {
        self.register(domain, panel);
        self
    }

    pub fn panel(&self, domain: Domain) -> Option<&dyn PanelLifecycle> {
        self.panels.get(&domain).map(|p| &**p)
    }

    /// Make `domain` the active tab.
    ///
    /// Stops the previously active panel (if different), publishes the new
    /// selection, then starts the target: one immediate load plus its timer.
    /// Re-selecting the active tab reloads it without arming a second timer.
    pub fn switch_to(&self, domain: Domain) {
        let _guard = self.switching.lock().expect("tab switch lock poisoned");

        let previous = *self.active.borrow();
        if let Some(prev) = previous.filter(|&p| p != domain) {
            if let Some(panel) = self.panels.get(&prev) {
                panel.stop();
            }
        }

        self.active.send_replace(Some(domain));
        info!(from = ?previous, to = %domain, "switched tab");

        match self.panels.get(&domain) {
            Some(panel) => panel.start(),
            None => warn!(%domain, "no panel registered for tab"),
        }
    }

    pub fn active(&self) -> Option<Domain> {
        *self.active.borrow()
    }

    pub fn subscribe_active(&self) -> watch::Receiver<Option<Domain>> {
        self.active.subscribe()
    }

    /// Stop every panel and clear the selection.
    pub fn stop_all(&self) {
        let _guard = self.switching.lock().expect("tab switch lock poisoned");
        for panel in self.panels.values() {
            panel.stop();
        }
        self.active.send_replace(None);
    }

    /// Domains whose panel currently has a timer armed.
    pub fn polling(&self) -> Vec<Domain> {
        self.panels
            .iter()
            .filter(|(_, p)| p.has_timer())
            .map(|(&d, _)| d)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use super::*;
    use crate::panel::PanelPhase;

    #[derive(Default)]
    struct Probe {
        starts: AtomicUsize,
        stops: AtomicUsize,
        timer: AtomicBool,
    }

    #[derive(Clone, Default)]
    struct FakeLifecycle(Arc<Probe>);

    impl PanelLifecycle for FakeLifecycle {
        fn start(&self) {
            self.0.starts.fetch_add(1, Ordering::SeqCst);
            self.0.timer.store(true, Ordering::SeqCst);
        }

        fn stop(&self) {
            self.0.stops.fetch_add(1, Ordering::SeqCst);
            self.0.timer.store(false, Ordering::SeqCst);
        }

        fn has_timer(&self) -> bool {
            self.0.timer.load(Ordering::SeqCst)
        }

        fn phase(&self) -> PanelPhase {
            if self.has_timer() {
                PanelPhase::Active
            } else {
                PanelPhase::Idle
            }
        }
    }

    fn coordinator() -> (TabCoordinator, BTreeMap<Domain, FakeLifecycle>) {
        let mut tabs = TabCoordinator::new();
        let mut fakes = BTreeMap::new();
        for d in Domain::ALL {
            let fake = FakeLifecycle::default();
            tabs.register(d, fake.clone());
            fakes.insert(d, fake);
        }
        (tabs, fakes)
    }

    #[test]
    fn nothing_active_before_first_switch() {
        let (tabs, _) = coordinator();
        assert_eq!(tabs.active(), None);
        assert!(tabs.polling().is_empty());
    }

    #[test]
    fn switch_stops_previous_and_starts_target() {
        let (tabs, fakes) = coordinator();
        tabs.switch_to(Domain::Overview);
        tabs.switch_to(Domain::Ssh);

        assert_eq!(tabs.active(), Some(Domain::Ssh));
        assert_eq!(fakes[&Domain::Overview].0.stops.load(Ordering::SeqCst), 1);
        assert_eq!(tabs.polling(), vec![Domain::Ssh]);
    }

    #[test]
    fn reselecting_active_tab_does_not_stop_it() {
        let (tabs, fakes) = coordinator();
        tabs.switch_to(Domain::Attacks);
        tabs.switch_to(Domain::Attacks);

        let probe = &fakes[&Domain::Attacks].0;
        assert_eq!(probe.starts.load(Ordering::SeqCst), 2);
        assert_eq!(probe.stops.load(Ordering::SeqCst), 0);
        assert_eq!(tabs.polling(), vec![Domain::Attacks]);
    }

    #[test]
    fn stop_all_clears_selection() {
        let (tabs, _) = coordinator();
        tabs.switch_to(Domain::Nginx);
        tabs.stop_all();
        assert_eq!(tabs.active(), None);
        assert!(tabs.polling().is_empty());
    }

    #[test]
    fn subscribers_see_selection() {
        let (tabs, _) = coordinator();
        let rx = tabs.subscribe_active();
        tabs.switch_to(Domain::Ssh);
        assert_eq!(*rx.borrow(), Some(Domain::Ssh));
    }
}
