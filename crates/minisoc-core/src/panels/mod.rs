// Concrete panels, one per dashboard domain, plus the always-on badge.

mod attacks;
mod badge;
mod nginx;
mod overview;
mod ssh;

pub use attacks::{ATTACK_TYPE_OPTIONS, AttackController, AttackPanel, SEVERITY_OPTIONS};
pub use badge::BadgePanel;
pub use nginx::{
    ERROR_LEVEL_OPTIONS, HTTP_METHOD_OPTIONS, NginxController, NginxEntry, NginxFilter, NginxPanel,
    NginxView, STATUS_CODE_OPTIONS,
};
pub use overview::{OverviewPanel, OverviewStats};
pub use ssh::{SSH_STATUS_OPTIONS, SshPanel};

use crate::error::CoreError;
use crate::panel::RowPage;

/// Step a select-style filter through `None -> options[0] -> ... -> None`.
///
/// A current value that is not among `options` restarts at the first one.
pub fn cycle_option<T: Clone + PartialEq>(current: Option<&T>, options: &[T]) -> Option<T> {
    match current {
        None => options.first().cloned(),
        Some(value) => options
            .iter()
            .position(|o| o == value)
            .map_or_else(|| options.first().cloned(), |i| options.get(i + 1).cloned()),
    }
}

fn row_page<T>(
    result: Result<minisoc_api::LogPage<T>, minisoc_api::Error>,
) -> Result<RowPage<T>, CoreError> {
    result
        .map(|page| RowPage {
            rows: page.logs,
            total: page.total,
        })
        .map_err(CoreError::from)
}
