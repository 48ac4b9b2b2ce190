//! Schedule sources.
//!
//! A source renders one month of the schedule at a time. The browser driver
//! that logs in and clicks through months lives outside this crate; it only
//! has to implement `ScheduleSource`.

mod snapshot;

pub use snapshot::{SnapshotSource, SnapshotView};

use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::view::ViewMonth;

/// One raw element of the schedule grid that may describe a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedFragment {
    pub text: String,
    /// Id of the element itself (e.g. `cal_day_shift_15`)
    #[serde(default)]
    pub element_id: Option<String>,
    /// Id of the nearest enclosing day cell (e.g. `cal_day_15`)
    #[serde(default)]
    pub ancestor_id: Option<String>,
}

#[allow(async_fn_in_trait)]
pub trait ScheduleSource {
    /// Whether the current view has finished loading.
    async fn is_ready(&mut self) -> bool;

    /// Month currently rendered.
    async fn current_view(&mut self) -> ViewMonth;

    /// All shift fragments visible in the current view.
    async fn fragments(&mut self) -> Result<Vec<ScrapedFragment>, SourceError>;

    /// Move to the next month. `Ok(false)` means there is no way forward.
    async fn advance(&mut self) -> Result<bool, SourceError>;
}
