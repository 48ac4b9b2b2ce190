//! The remote calendar as seen by the reconciler.
//!
//! Backends (e.g. Google Calendar) implement `CalendarApi`; the core never
//! deletes anything through it.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::SHIFT_TZ_NAME;
use crate::error::CalendarResult;
use crate::shift::ShiftEntity;

/// An event that already exists in the remote calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub color_id: Option<String>,
}

impl RemoteEvent {
    /// The event a backend is expected to hold after writing `body` under `id`.
    pub fn from_body(id: String, body: &EventBody) -> Self {
        RemoteEvent {
            id,
            title: body.title.clone(),
            start: body.start.with_timezone(&Utc),
            end: body.end.with_timezone(&Utc),
            color_id: Some(body.color_id.clone()),
        }
    }
}

/// Payload of an insert or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBody {
    pub title: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub color_id: String,
    pub time_zone: String,
}

impl From<&ShiftEntity> for EventBody {
    fn from(shift: &ShiftEntity) -> Self {
        EventBody {
            title: shift.title().to_string(),
            start: shift.start(),
            end: shift.end(),
            color_id: shift.color().color_id().to_string(),
            time_zone: SHIFT_TZ_NAME.to_string(),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait CalendarApi {
    /// Id of the calendar named `name`, creating it when missing.
    async fn find_or_create_calendar(&self, name: &str) -> CalendarResult<String>;

    /// Events overlapping `[time_min, time_max]`.
    async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> CalendarResult<Vec<RemoteEvent>>;

    async fn insert_event(&self, calendar_id: &str, body: &EventBody) -> CalendarResult<RemoteEvent>;

    /// Replace title, times and color of an existing event.
    async fn update_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        body: &EventBody,
    ) -> CalendarResult<RemoteEvent>;
}
