// ── Panel abstraction ──
//
// A panel is one polled view of the backend: it knows how to fetch a stats
// snapshot and a page of rows for a given query. `PanelController` drives
// any `Panel` through the Idle/Loading/Active/Error lifecycle.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Local};

use crate::domain::PAGE_SIZE;
use crate::error::CoreError;

/// Paging, filter and stats window for one fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelQuery<F> {
    pub page: u32,
    pub page_size: u32,
    pub window_hours: u32,
    pub filter: F,
}

impl<F: Default> PanelQuery<F> {
    pub fn new(window_hours: u32) -> Self {
        Self {
            page: 0,
            page_size: PAGE_SIZE,
            window_hours,
            filter: F::default(),
        }
    }
}

impl<F> PanelQuery<F> {
    /// Row offset of the current page: `page * page_size`.
    pub fn offset(&self) -> u32 {
        self.page.saturating_mul(self.page_size)
    }

    /// The `limit`/`offset` pair sent to paged endpoints.
    pub fn page_param(&self) -> minisoc_api::Page {
        minisoc_api::Page {
            limit: self.page_size,
            offset: self.offset(),
        }
    }
}

/// One page of rows plus the server-reported total, when known.
#[derive(Debug, Clone, PartialEq)]
pub struct RowPage<R> {
    pub rows: Vec<R>,
    pub total: Option<u64>,
}

/// Outcome of one fetch cycle.
///
/// Stats and rows fail independently: a failed stats request leaves
/// `stats` empty and records the error, while a failed rows request is
/// carried in `rows` so the table can show it inline.
#[derive(Debug)]
pub struct Cycle<S, R> {
    pub stats: Option<S>,
    pub rows: Option<Result<RowPage<R>, CoreError>>,
    pub errors: Vec<CoreError>,
}

impl<S, R> Default for Cycle<S, R> {
    fn default() -> Self {
        Self {
            stats: None,
            rows: None,
            errors: Vec::new(),
        }
    }
}

impl<S, R> Cycle<S, R> {
    /// Record a stats result, keeping the error on failure.
    pub fn with_stats(mut self, result: Result<S, CoreError>) -> Self {
        match result {
            Ok(stats) => self.stats = Some(stats),
            Err(e) => self.errors.push(e),
        }
        self
    }

    pub fn with_rows(mut self, result: Result<RowPage<R>, CoreError>) -> Self {
        self.rows = Some(result);
        self
    }
}

/// A domain view the controller can poll.
pub trait Panel: Send + Sync + 'static {
    type Filter: Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static;
    type Stats: Clone + fmt::Debug + Send + Sync + 'static;
    type Row: Clone + fmt::Debug + Send + Sync + 'static;

    /// Short name used in log fields.
    const NAME: &'static str;

    fn poll_interval(&self) -> Duration;

    /// Fetch stats and rows for `query`. Never fails as a whole; partial
    /// failures are reported inside the [`Cycle`].
    fn fetch(
        &self,
        query: &PanelQuery<Self::Filter>,
    ) -> impl Future<Output = Cycle<Self::Stats, Self::Row>> + Send;

    /// Combine fresh stats with the previous snapshot. Replaces by default;
    /// panels assembled from several requests override this to keep the
    /// last good value of the parts that failed.
    fn merge_stats(_previous: Option<Self::Stats>, fresh: Self::Stats) -> Self::Stats {
        fresh
    }
}

// ── View state ──────────────────────────────────────────────────────

/// Lifecycle phase of a panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
pub enum PanelPhase {
    /// No timer armed; the panel is not the active tab.
    #[default]
    Idle,
    /// Started, first cycle in flight.
    Loading,
    /// Timer armed, last applied cycle succeeded.
    Active,
    /// Timer armed, last applied cycle had a failure. Stale data stays.
    Error,
}

/// What the log table should show.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TableView<R> {
    /// Nothing fetched yet.
    #[default]
    Loading,
    Rows(Vec<R>),
    /// The server returned zero rows: show the placeholder, not an empty body.
    Empty,
    /// The rows request failed; the message is shown inline.
    Failed(String),
}

impl<R> TableView<R> {
    pub fn from_rows(rows: Vec<R>) -> Self {
        if rows.is_empty() {
            Self::Empty
        } else {
            Self::Rows(rows)
        }
    }

    pub fn rows(&self) -> &[R] {
        match self {
            Self::Rows(rows) => rows,
            _ => &[],
        }
    }
}

/// Everything a renderer needs for one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView<S, R> {
    /// Last good stats snapshot.
    pub stats: Option<S>,
    pub table: TableView<R>,
    /// Server-reported row total for the current filter.
    pub total: Option<u64>,
    /// Page the current rows belong to.
    pub page: u32,
    pub updated_at: Option<DateTime<Local>>,
    pub last_error: Option<String>,
}

impl<S, R> Default for PanelView<S, R> {
    fn default() -> Self {
        Self {
            stats: None,
            table: TableView::Loading,
            total: None,
            page: 0,
            updated_at: None,
            last_error: None,
        }
    }
}
