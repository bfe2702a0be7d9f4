// Dashboard domains (tabs) and their fixed polling cadences.

use std::time::Duration;

use strum::{Display, EnumIter};

/// Rows requested per page on every log table.
pub const PAGE_SIZE: u32 = 50;

/// Cadence of the attack badge poller, independent of the active tab.
pub const BADGE_INTERVAL: Duration = Duration::from_millis(30_000);

/// Default stats window for every panel.
pub const DEFAULT_WINDOW_HOURS: u32 = 24;

const OVERVIEW_INTERVAL: Duration = Duration::from_millis(5_000);
const LIVE_INTERVAL: Duration = Duration::from_millis(3_000);

/// One tab of the dashboard. Declaration order is tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
pub enum Domain {
    Overview,
    Attacks,
    #[strum(to_string = "SSH")]
    Ssh,
    Nginx,
}

impl Domain {
    pub const ALL: [Self; 4] = [Self::Overview, Self::Attacks, Self::Ssh, Self::Nginx];

    /// Refresh cadence while this domain is the active tab.
    pub fn poll_interval(self) -> Duration {
        match self {
            Self::Overview => OVERVIEW_INTERVAL,
            Self::Attacks | Self::Ssh | Self::Nginx => LIVE_INTERVAL,
        }
    }

    /// 1-based tab number, used for the `1`..`4` shortcuts.
    pub fn number(self) -> u8 {
        match self {
            Self::Overview => 1,
            Self::Attacks => 2,
            Self::Ssh => 3,
            Self::Nginx => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.number() == n)
    }

    pub fn next(self) -> Self {
        match self {
            Self::Overview => Self::Attacks,
            Self::Attacks => Self::Ssh,
            Self::Ssh => Self::Nginx,
            Self::Nginx => Self::Overview,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Overview => Self::Nginx,
            Self::Attacks => Self::Overview,
            Self::Ssh => Self::Attacks,
            Self::Nginx => Self::Ssh,
        }
    }
}
