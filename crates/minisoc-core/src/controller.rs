// ── Panel controller ──
//
// Owns one panel's poll timer, query state and published view. Each timer
// tick spawns an independent fetch cycle, so cycles may overlap when the
// backend is slower than the interval. A generation counter decides which
// results may still render:
//
//   - every cycle is stamped with the next generation when it is issued,
//   - a result applies only if its generation is >= `floor`, and applying
//     raises `floor` past it (latest-applied wins),
//   - `stop()` and query changes raise `floor` past every generation issued
//     so far, discarding whatever is still in flight.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Local;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::panel::{Cycle, Panel, PanelPhase, PanelQuery, PanelView, TableView};

/// Type-erased lifecycle handle, used by the tab coordinator.
pub trait PanelLifecycle: Send + Sync {
    fn start(&self);
    fn stop(&self);
    fn has_timer(&self) -> bool;
    fn phase(&self) -> PanelPhase;
}

struct Lifecycle {
    running: bool,
    issued: u64,
    floor: u64,
    timer: Option<CancellationToken>,
}

struct Inner<P: Panel> {
    panel: P,
    period: Duration,
    lifecycle: Mutex<Lifecycle>,
    query: watch::Sender<PanelQuery<P::Filter>>,
    view: watch::Sender<PanelView<P::Stats, P::Row>>,
    phase: watch::Sender<PanelPhase>,
}

/// Drives a [`Panel`] through its Idle/Loading/Active/Error lifecycle.
///
/// Cheaply cloneable via `Arc<Inner>`.
pub struct PanelController<P: Panel> {
    inner: Arc<Inner<P>>,
}

impl<P: Panel> Clone for PanelController<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: Panel> PanelController<P> {
    pub fn new(panel: P, window_hours: u32) -> Self {
        let period = panel.poll_interval();
        let (query, _) = watch::channel(PanelQuery::new(window_hours));
        let (view, _) = watch::channel(PanelView::default());
        let (phase, _) = watch::channel(PanelPhase::Idle);
        Self {
            inner: Arc::new(Inner {
                panel,
                period,
                lifecycle: Mutex::new(Lifecycle {
                    running: false,
                    issued: 0,
                    floor: 0,
                    timer: None,
                }),
                query,
                view,
                phase,
            }),
        }
    }

    pub fn panel(&self) -> &P {
        &self.inner.panel
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Lifecycle> {
        self.inner.lifecycle.lock().expect("panel lifecycle lock poisoned")
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Run one cycle now and arm the recurring timer if it is not armed.
    ///
    /// Calling `start()` on a running panel only triggers the extra cycle;
    /// the timer is never duplicated.
    pub fn start(&self) {
        let (cycle, timer) = {
            let mut lc = self.lock();
            lc.running = true;
            let timer = if lc.timer.is_none() {
                let token = CancellationToken::new();
                lc.timer = Some(token.clone());
                Some(token)
            } else {
                None
            };
            (self.issue(&mut lc), timer)
        };

        self.inner.phase.send_replace(PanelPhase::Loading);
        self.spawn_cycle(cycle);

        if let Some(cancel) = timer {
            debug!(panel = P::NAME, period_ms = ?self.inner.period.as_millis(), "poll timer armed");
            tokio::spawn(poll_task(self.clone(), self.inner.period, cancel));
        }
    }

    /// Cancel the timer and return to Idle. Cycles still in flight finish
    /// but their results are discarded.
    pub fn stop(&self) {
        {
            let mut lc = self.lock();
            lc.running = false;
            lc.floor = lc.issued + 1;
            if let Some(cancel) = lc.timer.take() {
                cancel.cancel();
                debug!(panel = P::NAME, "poll timer cancelled");
            }
        }
        self.inner.phase.send_replace(PanelPhase::Idle);
    }

    /// Run one cycle immediately without touching the timer. Ignored while
    /// Idle. The handle resolves to whether the result was applied.
    pub fn refresh(&self) -> Option<JoinHandle<bool>> {
        let cycle = {
            let mut lc = self.lock();
            if !lc.running {
                debug!(panel = P::NAME, "refresh ignored while idle");
                return None;
            }
            self.issue(&mut lc)
        };
        Some(self.spawn_cycle(cycle))
    }

    pub fn has_timer(&self) -> bool {
        self.lock().timer.is_some()
    }

    // ── Query state ──────────────────────────────────────────────────

    /// Replace the filter. Resets to page 0 and invalidates in-flight
    /// cycles; takes effect on the next cycle.
    pub fn set_filter(&self, filter: P::Filter) {
        self.update_filter(|f| *f = filter);
    }

    /// Edit the filter in place. A no-op edit leaves paging untouched.
    pub fn update_filter(&self, edit: impl FnOnce(&mut P::Filter)) {
        let mut lc = self.lock();
        let changed = self.inner.query.send_if_modified(|q| {
            let mut next = q.filter.clone();
            edit(&mut next);
            if next == q.filter {
                return false;
            }
            q.filter = next;
            q.page = 0;
            true
        });
        if changed {
            lc.floor = lc.issued + 1;
            debug!(panel = P::NAME, filter = ?self.inner.query.borrow().filter, "filter changed");
        }
    }

    pub fn set_page(&self, page: u32) {
        let mut lc = self.lock();
        let changed = self.inner.query.send_if_modified(|q| {
            if q.page == page {
                return false;
            }
            q.page = page;
            true
        });
        if changed {
            lc.floor = lc.issued + 1;
        }
    }

    /// Advance one page unless the known total says this is the last one.
    pub fn next_page(&self) {
        let total = self.inner.view.borrow().total;
        let query = self.query();
        let next_offset = u64::from(query.offset()) + u64::from(query.page_size);
        if total.is_some_and(|t| next_offset >= t) {
            return;
        }
        self.set_page(query.page.saturating_add(1));
    }

    pub fn prev_page(&self) {
        let page = self.inner.query.borrow().page;
        self.set_page(page.saturating_sub(1));
    }

    /// Drop the current rows back to the loading state, e.g. when the
    /// table switches to a different record type.
    pub fn clear_rows(&self) {
        self.inner.view.send_modify(|view| {
            view.table = TableView::Loading;
            view.total = None;
        });
    }

    // ── Snapshots and subscriptions ──────────────────────────────────

    pub fn query(&self) -> PanelQuery<P::Filter> {
        self.inner.query.borrow().clone()
    }

    pub fn view(&self) -> PanelView<P::Stats, P::Row> {
        self.inner.view.borrow().clone()
    }

    pub fn phase(&self) -> PanelPhase {
        *self.inner.phase.borrow()
    }

    pub fn subscribe_view(&self) -> watch::Receiver<PanelView<P::Stats, P::Row>> {
        self.inner.view.subscribe()
    }

    pub fn subscribe_phase(&self) -> watch::Receiver<PanelPhase> {
        self.inner.phase.subscribe()
    }

    // ── Cycles ───────────────────────────────────────────────────────

    /// Stamp a new generation and snapshot the query, under the lock so the
    /// pair is consistent with concurrent filter changes.
    fn issue(&self, lc: &mut Lifecycle) -> (u64, PanelQuery<P::Filter>) {
        lc.issued += 1;
        (lc.issued, self.inner.query.borrow().clone())
    }

    /// Issue a cycle from the timer, unless `stop()` won the race.
    fn tick(&self, cancel: &CancellationToken) -> Option<JoinHandle<bool>> {
        let cycle = {
            let mut lc = self.lock();
            if cancel.is_cancelled() {
                return None;
            }
            self.issue(&mut lc)
        };
        Some(self.spawn_cycle(cycle))
    }

    fn spawn_cycle(&self, (generation, query): (u64, PanelQuery<P::Filter>)) -> JoinHandle<bool> {
        let ctrl = self.clone();
        tokio::spawn(async move {
            let cycle = ctrl.inner.panel.fetch(&query).await;
            ctrl.apply(generation, &query, cycle)
        })
    }

    /// Publish a finished cycle if it is still current.
    fn apply(
        &self,
        generation: u64,
        query: &PanelQuery<P::Filter>,
        cycle: Cycle<P::Stats, P::Row>,
    ) -> bool {
        let mut lc = self.lock();
        if !lc.running || generation < lc.floor {
            debug!(
                panel = P::NAME,
                generation,
                floor = lc.floor,
                "discarding stale cycle"
            );
            return false;
        }
        lc.floor = generation + 1;

        let Cycle {
            stats,
            rows,
            mut errors,
        } = cycle;

        self.inner.view.send_modify(|view| {
            if let Some(fresh) = stats {
                view.stats = Some(P::merge_stats(view.stats.take(), fresh));
            }
            match rows {
                Some(Ok(page)) => {
                    view.table = TableView::from_rows(page.rows);
                    view.total = page.total;
                }
                Some(Err(e)) => {
                    view.table = TableView::Failed(e.to_string());
                    errors.push(e);
                }
                None => {}
            }
            view.page = query.page;
            view.updated_at = Some(Local::now());
            view.last_error = errors.first().map(ToString::to_string);
        });

        for e in &errors {
            warn!(panel = P::NAME, error = %e, "refresh cycle failed");
        }
        let phase = if errors.is_empty() {
            PanelPhase::Active
        } else {
            PanelPhase::Error
        };
        self.inner.phase.send_replace(phase);
        true
    }
}

impl<P: Panel> PanelLifecycle for PanelController<P> {
    fn start(&self) {
        PanelController::start(self);
    }

    fn stop(&self) {
        PanelController::stop(self);
    }

    fn has_timer(&self) -> bool {
        PanelController::has_timer(self)
    }

    fn phase(&self) -> PanelPhase {
        PanelController::phase(self)
    }
}

// ── Background task ──────────────────────────────────────────────────

/// Issue a cycle every `period` until cancelled. The first cycle is run by
/// `start()`, so the immediate first tick is consumed.
async fn poll_task<P: Panel>(ctrl: PanelController<P>, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                if ctrl.tick(&cancel).is_none() {
                    break;
                }
            }
        }
    }
    debug!(panel = P::NAME, "poll task stopped");
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

    use tokio::sync::Notify;

    use super::*;
    use crate::error::CoreError;
    use crate::panel::RowPage;

    /// Fake panel: counts fetches and echoes the filter and fetch number
    /// back as a row. A gated panel holds fetch `n` until `release(n)`.
    struct FakePanel {
        fetches: AtomicUsize,
        gates: Option<Mutex<Vec<Arc<Notify>>>>,
        fail_rows: AtomicBool,
        seq: AtomicU64,
    }

    impl FakePanel {
        fn new() -> Self {
            Self {
                fetches: AtomicUsize::new(0),
                gates: None,
                fail_rows: AtomicBool::new(false),
                seq: AtomicU64::new(0),
            }
        }

        fn gated() -> Self {
            Self {
                gates: Some(Mutex::new(Vec::new())),
                ..Self::new()
            }
        }

        fn gate(&self, n: u64) -> Option<Arc<Notify>> {
            let mut gates = self.gates.as_ref()?.lock().expect("gate lock");
            let index = usize::try_from(n).expect("fetch number fits usize") - 1;
            while gates.len() <= index {
                gates.push(Arc::new(Notify::new()));
            }
            Some(Arc::clone(&gates[index]))
        }

        /// Let fetch `n` finish. The permit is kept if it is not waiting yet.
        fn release(&self, n: u64) {
            self.gate(n).expect("gated panel").notify_one();
        }
    }

    impl Panel for FakePanel {
        type Filter = String;
        type Stats = u64;
        type Row = String;
        const NAME: &'static str = "fake";

        fn poll_interval(&self) -> Duration {
            Duration::from_secs(3)
        }

        async fn fetch(&self, query: &PanelQuery<String>) -> Cycle<u64, String> {
            let n = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = self.gate(n) {
                gate.notified().await;
            }
            let rows = if self.fail_rows.load(Ordering::SeqCst) {
                Err(CoreError::Api {
                    message: "HTTP error! status: 500".into(),
                    status: Some(500),
                })
            } else {
                Ok(RowPage {
                    rows: vec![format!("{}#{n}", query.filter)],
                    total: Some(120),
                })
            };
            Cycle::default().with_stats(Ok(n)).with_rows(rows)
        }
    }

    async fn settle() {
        // Let spawned cycles run to completion on the paused clock.
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    fn fetches(ctrl: &PanelController<FakePanel>) -> usize {
        ctrl.panel().fetches.load(Ordering::SeqCst)
    }

    #[tokio::test(start_paused = true)]
    async fn start_runs_immediately_then_on_interval() {
        let ctrl = PanelController::new(FakePanel::new(), 24);
        assert_eq!(ctrl.phase(), PanelPhase::Idle);

        ctrl.start();
        settle().await;
        assert_eq!(fetches(&ctrl), 1);
        assert_eq!(ctrl.phase(), PanelPhase::Active);
        assert!(ctrl.has_timer());

        tokio::time::sleep(Duration::from_millis(3_050)).await;
        settle().await;
        assert_eq!(fetches(&ctrl), 2);

        tokio::time::sleep(Duration::from_secs(3)).await;
        settle().await;
        assert_eq!(fetches(&ctrl), 3);
        ctrl.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn double_start_keeps_single_timer() {
        let ctrl = PanelController::new(FakePanel::new(), 24);
        ctrl.start();
        ctrl.start();
        settle().await;
        assert_eq!(fetches(&ctrl), 2, "each start runs one immediate cycle");

        tokio::time::sleep(Duration::from_millis(3_050)).await;
        settle().await;
        assert_eq!(fetches(&ctrl), 3, "one timer means one tick per period");
        ctrl.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_timer_and_goes_idle() {
        let ctrl = PanelController::new(FakePanel::new(), 24);
        ctrl.start();
        settle().await;
        ctrl.stop();
        assert!(!ctrl.has_timer());
        assert_eq!(ctrl.phase(), PanelPhase::Idle);

        tokio::time::sleep(Duration::from_secs(10)).await;
        settle().await;
        assert_eq!(fetches(&ctrl), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn late_result_after_stop_is_discarded() {
        let ctrl = PanelController::new(FakePanel::gated(), 24);

        ctrl.start();
        settle().await;
        assert_eq!(fetches(&ctrl), 1);

        ctrl.stop();
        ctrl.panel().release(1);
        settle().await;

        let view = ctrl.view();
        assert_eq!(view.stats, None);
        assert_eq!(view.table, TableView::Loading);
        assert_eq!(ctrl.phase(), PanelPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn filter_change_discards_in_flight_cycle() {
        let ctrl = PanelController::new(FakePanel::gated(), 24);

        ctrl.start();
        settle().await;
        let old_filter = ctrl.refresh().expect("running");
        settle().await;

        ctrl.set_filter("failed".into());
        let fresh = ctrl.refresh().expect("running");
        settle().await;
        assert_eq!(fetches(&ctrl), 3);

        // The old-filter cycle lands first; only the filter change rejects it.
        ctrl.panel().release(2);
        assert!(!old_filter.await.expect("cycle task"));
        assert_eq!(ctrl.view().table, TableView::Loading);

        ctrl.panel().release(3);
        assert!(fresh.await.expect("cycle task"));
        ctrl.panel().release(1);
        settle().await;

        let view = ctrl.view();
        assert_eq!(view.table, TableView::Rows(vec!["failed#3".into()]));
        assert_eq!(view.stats, Some(3));
        ctrl.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn older_overlapping_cycle_never_overwrites_newer() {
        let ctrl = PanelController::new(FakePanel::gated(), 24);
        ctrl.start();
        settle().await;

        let older = ctrl.refresh().expect("running");
        settle().await;
        let newer = ctrl.refresh().expect("running");
        settle().await;
        assert_eq!(fetches(&ctrl), 3);

        ctrl.panel().release(3);
        assert!(newer.await.expect("cycle task"));
        assert_eq!(ctrl.view().stats, Some(3));

        ctrl.panel().release(2);
        assert!(!older.await.expect("cycle task"));
        ctrl.panel().release(1);
        settle().await;

        let view = ctrl.view();
        assert_eq!(view.stats, Some(3));
        assert_eq!(view.table, TableView::Rows(vec!["#3".into()]));
        assert_eq!(ctrl.phase(), PanelPhase::Active);
        ctrl.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn filter_change_resets_page() {
        let ctrl = PanelController::new(FakePanel::new(), 24);
        ctrl.set_page(4);
        assert_eq!(ctrl.query().offset(), 200);

        ctrl.set_filter("closed".into());
        let q = ctrl.query();
        assert_eq!(q.page, 0);
        assert_eq!(q.filter, "closed");

        ctrl.set_page(2);
        ctrl.set_filter("closed".into());
        assert_eq!(ctrl.query().page, 2, "identical filter keeps paging");
    }

    #[tokio::test(start_paused = true)]
    async fn next_page_stops_at_known_total() {
        let ctrl = PanelController::new(FakePanel::new(), 24);
        ctrl.start();
        settle().await;
        assert_eq!(ctrl.view().total, Some(120));

        ctrl.next_page();
        ctrl.next_page();
        assert_eq!(ctrl.query().page, 2);
        ctrl.next_page();
        assert_eq!(ctrl.query().page, 2, "offset 150 would pass total 120");

        ctrl.prev_page();
        ctrl.prev_page();
        ctrl.prev_page();
        assert_eq!(ctrl.query().page, 0);
        ctrl.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_is_ignored_while_idle() {
        let ctrl = PanelController::new(FakePanel::new(), 24);
        assert!(ctrl.refresh().is_none());
        settle().await;
        assert_eq!(fetches(&ctrl), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn row_failure_keeps_stats_and_timer() {
        let ctrl = PanelController::new(FakePanel::new(), 24);
        ctrl.start();
        settle().await;
        assert_eq!(ctrl.view().stats, Some(1));

        ctrl.panel().fail_rows.store(true, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(3_050)).await;
        settle().await;

        let view = ctrl.view();
        assert_eq!(ctrl.phase(), PanelPhase::Error);
        assert_eq!(
            view.table,
            TableView::Failed("HTTP error! status: 500".into())
        );
        assert_eq!(view.last_error.as_deref(), Some("HTTP error! status: 500"));
        assert!(ctrl.has_timer(), "a failed cycle never stops polling");

        ctrl.panel().fail_rows.store(false, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(3)).await;
        settle().await;
        assert_eq!(ctrl.phase(), PanelPhase::Active);
        ctrl.stop();
    }
}
