//! A schedule source replayed from a JSON dump of the rendered views.
//!
//! Expected layout:
//!
//! ```json
//! {
//!   "views": [
//!     {
//!       "body_text": "Červen 2025 ...",
//!       "fragments": [
//!         { "text": "3 kola 09:30", "element_id": "cal_day_shift_15" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! `year` and `month` may be given per view; otherwise they are detected from
//! `body_text`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ScheduleSource, ScrapedFragment};
use crate::constants::{LOADING_MARKERS, SHIFT_TZ};
use crate::error::SourceError;
use crate::view::ViewMonth;

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    views: Vec<SnapshotView>,
}

/// One captured month view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotView {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub body_text: String,
    #[serde(default)]
    pub fragments: Vec<ScrapedFragment>,
}

impl SnapshotView {
    fn view_month(&self) -> ViewMonth {
        self.year
            .zip(self.month)
            .and_then(|(year, month)| ViewMonth::new(year, month))
            .unwrap_or_else(|| ViewMonth::detect_or_current(&self.body_text, SHIFT_TZ))
    }

    fn is_loading(&self) -> bool {
        LOADING_MARKERS
            .iter()
            .any(|marker| self.body_text.contains(marker))
    }
}

pub struct SnapshotSource {
    views: Vec<SnapshotView>,
    cursor: usize,
}

impl SnapshotSource {
    pub fn new(views: Vec<SnapshotView>) -> Result<Self, SourceError> {
        if views.is_empty() {
            return Err(SourceError::Snapshot("snapshot contains no views".into()));
        }

        Ok(SnapshotSource { views, cursor: 0 })
    }

    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let file: SnapshotFile =
            serde_json::from_str(json).map_err(|e| SourceError::Snapshot(e.to_string()))?;
        Self::new(file.views)
    }

    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let contents = std::fs::read_to_string(path)?;
        let file: SnapshotFile = serde_json::from_str(&contents)
            .map_err(|e| SourceError::Snapshot(format!("{}: {}", path.display(), e)))?;
        Self::new(file.views)
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    fn view(&self) -> &SnapshotView {
        &self.views[self.cursor]
    }
}

impl ScheduleSource for SnapshotSource {
    async fn is_ready(&mut self) -> bool {
        !self.view().is_loading()
    }

    async fn current_view(&mut self) -> ViewMonth {
        self.view().view_month()
    }

    async fn fragments(&mut self) -> Result<Vec<ScrapedFragment>, SourceError> {
        Ok(self.view().fragments.clone())
    }

    async fn advance(&mut self) -> Result<bool, SourceError> {
        if self.cursor + 1 >= self.views.len() {
            return Ok(false);
        }

        self.cursor += 1;
        Ok(true)
    }
}
