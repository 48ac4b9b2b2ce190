//! In-memory collaborators shared by the unit tests.

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::error::{CalendarError, CalendarResult, SourceError};
use crate::remote::{CalendarApi, EventBody, RemoteEvent};
use crate::source::{ScheduleSource, ScrapedFragment};
use crate::view::ViewMonth;

/// A schedule source that plays back a fixed list of views.
pub(crate) struct ScriptedSource {
    pub views: Vec<(ViewMonth, Vec<ScrapedFragment>)>,
    pub cursor: usize,
    pub ready: bool,
    pub fail_advance: bool,
    pub fail_fragments_at: Option<usize>,
    pub ready_checks: usize,
    pub view_checks: usize,
}

impl ScriptedSource {
    pub fn new(views: Vec<(ViewMonth, Vec<ScrapedFragment>)>) -> Self {
        ScriptedSource {
            views,
            cursor: 0,
            ready: true,
            fail_advance: false,
            fail_fragments_at: None,
            ready_checks: 0,
            view_checks: 0,
        }
    }
}

impl ScheduleSource for ScriptedSource {
    async fn is_ready(&mut self) -> bool {
        self.ready_checks += 1;
        self.ready
    }

    async fn current_view(&mut self) -> ViewMonth {
        self.view_checks += 1;
        self.views[self.cursor].0
    }

    async fn fragments(&mut self) -> Result<Vec<ScrapedFragment>, SourceError> {
        if self.fail_fragments_at == Some(self.cursor) {
            return Err(SourceError::Navigation("page went away".into()));
        }
        Ok(self.views[self.cursor].1.clone())
    }

    async fn advance(&mut self) -> Result<bool, SourceError> {
        if self.fail_advance {
            return Err(SourceError::Navigation("click intercepted".into()));
        }
        if self.cursor + 1 >= self.views.len() {
            return Ok(false);
        }
        self.cursor += 1;
        Ok(true)
    }
}

#[derive(Default)]
struct CalendarState {
    events: Vec<RemoteEvent>,
    next_id: usize,
    writes: usize,
    list_calls: usize,
}

/// A remote calendar kept in memory.
///
/// Writes for titles listed in `failing_titles` are refused with an API error.
#[derive(Default)]
pub(crate) struct MemoryCalendar {
    state: Mutex<CalendarState>,
    pub failing_titles: HashSet<String>,
    pub fail_listing: bool,
}

impl MemoryCalendar {
    pub fn with_events(events: Vec<RemoteEvent>) -> Self {
        let calendar = MemoryCalendar::default();
        {
            let mut state = calendar.state.lock().unwrap();
            state.next_id = events.len();
            state.events = events;
        }
        calendar
    }

    pub fn events(&self) -> Vec<RemoteEvent> {
        self.state.lock().unwrap().events.clone()
    }

    pub fn writes(&self) -> usize {
        self.state.lock().unwrap().writes
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    fn check_write(&self, body: &EventBody) -> CalendarResult<()> {
        if self.failing_titles.contains(&body.title) {
            return Err(CalendarError::Api(format!("write rejected: {}", body.title)));
        }
        Ok(())
    }
}

pub(crate) fn remote_event(id: &str, title: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> RemoteEvent {
    RemoteEvent {
        id: id.to_string(),
        title: title.to_string(),
        start,
        end,
        color_id: None,
    }
}

impl CalendarApi for MemoryCalendar {
    async fn find_or_create_calendar(&self, name: &str) -> CalendarResult<String> {
        Ok(format!("memory:{}", name))
    }

    async fn list_events(
        &self,
        _calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> CalendarResult<Vec<RemoteEvent>> {
        if self.fail_listing {
            return Err(CalendarError::Api("listing unavailable".into()));
        }

        let mut state = self.state.lock().unwrap();
        state.list_calls += 1;
        Ok(state
            .events
            .iter()
            .filter(|e| e.start < time_max && e.end > time_min)
            .cloned()
            .collect())
    }

    async fn insert_event(&self, _calendar_id: &str, body: &EventBody) -> CalendarResult<RemoteEvent> {
        self.check_write(body)?;

        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        state.writes += 1;
        let event = RemoteEvent::from_body(format!("evt-{}", state.next_id), body);
        state.events.push(event.clone());
        Ok(event)
    }

    async fn update_event(
        &self,
        _calendar_id: &str,
        event_id: &str,
        body: &EventBody,
    ) -> CalendarResult<RemoteEvent> {
        self.check_write(body)?;

        let mut state = self.state.lock().unwrap();
        state.writes += 1;
        let event = state
            .events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| CalendarError::Api(format!("no event {}", event_id)))?;
        *event = RemoteEvent::from_body(event_id.to_string(), body);
        Ok(event.clone())
    }
}
