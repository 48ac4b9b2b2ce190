//! `CalendarApi` over the Google Calendar REST API.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use google_calendar::Client;
use google_calendar::types::{Calendar, MinAccessRole, OrderBy, SendUpdates};
use shiftsync_core::constants::SHIFT_TZ_NAME;
use shiftsync_core::error::{CalendarError, CalendarResult};
use shiftsync_core::remote::{CalendarApi, EventBody, RemoteEvent};
use tracing::{debug, info};

use crate::app_config::AppConfig;
use crate::google_event::{FromGoogle, ToGoogle};
use crate::session::Session;

pub struct GoogleCalendar {
    client: Client,
    account_email: String,
}

impl GoogleCalendar {
    /// Load credentials and a valid session for `account_email`.
    ///
    /// Fails before any API call when either file is missing.
    pub async fn connect(account_email: &str) -> Result<Self> {
        let app_config = AppConfig::load()?;
        let session = Session::load_valid(account_email, &app_config).await?;

        Ok(GoogleCalendar {
            client: session.client(&app_config),
            account_email: account_email.to_string(),
        })
    }

    pub fn account_email(&self) -> &str {
        &self.account_email
    }

    async fn find_calendar(&self, name: &str) -> Result<Option<String>> {
        let calendars = self
            .client
            .calendar_list()
            .list_all(MinAccessRole::default(), false, false)
            .await
            .context("Failed to fetch calendars")?
            .body;

        Ok(calendars
            .into_iter()
            .find(|c| c.summary == name && !c.id.is_empty())
            .map(|c| c.id))
    }

    async fn create_calendar(&self, name: &str) -> Result<String> {
        let calendar = new_calendar(name);

        let created = self
            .client
            .calendars()
            .insert(&calendar)
            .await
            .with_context(|| format!("Failed to create calendar: {}", name))?
            .body;

        info!(calendar = name, id = %created.id, "calendar created");
        Ok(created.id)
    }

    async fn fetch_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<RemoteEvent>> {
        let time_min = time_min.to_rfc3339();
        let time_max = time_max.to_rfc3339();

        let response = self
            .client
            .events()
            .list_all(
                calendar_id,
                "",                 // i_cal_uid
                0,                  // max_attendees
                OrderBy::StartTime, // order_by
                &[],                // private_extended_property
                "",                 // q (search query)
                &[],                // shared_extended_property
                false,              // show_deleted
                false,              // show_hidden_invitations
                true,               // single_events
                &time_max,
                &time_min,
                "", // time_zone
                "", // updated_min
            )
            .await
            .context("Failed to fetch events")?;

        let events = response
            .body
            .into_iter()
            .filter_map(|event| {
                let id = event.id.clone();
                match RemoteEvent::from_google(event) {
                    Ok(remote) => Some(remote),
                    Err(e) => {
                        debug!(%id, reason = %e, "remote event skipped");
                        None
                    }
                }
            })
            .collect();

        Ok(events)
    }

    async fn create_event(&self, calendar_id: &str, body: &EventBody) -> Result<RemoteEvent> {
        let google_event = body.to_google();

        let response = self
            .client
            .events()
            .insert(
                calendar_id,
                0,
                0,
                false,
                SendUpdates::None,
                false,
                &google_event,
            )
            .await
            .with_context(|| format!("Failed to create event: {}", body.title))?;

        RemoteEvent::from_google(response.body)
    }

    async fn replace_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        body: &EventBody,
    ) -> Result<RemoteEvent> {
        let google_event = body.to_google();

        let response = self
            .client
            .events()
            .update(
                calendar_id,
                event_id,
                0,
                0,
                false,
                SendUpdates::None,
                false,
                &google_event,
            )
            .await
            .with_context(|| format!("Failed to update event: {}", body.title))?;

        RemoteEvent::from_google(response.body)
    }
}

/// Body for a fresh shifts calendar in the shift time zone.
fn new_calendar(name: &str) -> Calendar {
    Calendar {
        conference_properties: None,
        description: String::new(),
        etag: String::new(),
        id: String::new(),
        kind: String::new(),
        location: String::new(),
        summary: name.to_string(),
        time_zone: SHIFT_TZ_NAME.to_string(),
    }
}

fn api_error(e: anyhow::Error) -> CalendarError {
    CalendarError::Api(format!("{:#}", e))
}

impl CalendarApi for GoogleCalendar {
    async fn find_or_create_calendar(&self, name: &str) -> CalendarResult<String> {
        if let Some(id) = self.find_calendar(name).await.map_err(api_error)? {
            debug!(calendar = name, %id, "calendar found");
            return Ok(id);
        }
        self.create_calendar(name).await.map_err(api_error)
    }

    async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> CalendarResult<Vec<RemoteEvent>> {
        self.fetch_events(calendar_id, time_min, time_max)
            .await
            .map_err(api_error)
    }

    async fn insert_event(&self, calendar_id: &str, body: &EventBody) -> CalendarResult<RemoteEvent> {
        self.create_event(calendar_id, body).await.map_err(api_error)
    }

    async fn update_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        body: &EventBody,
    ) -> CalendarResult<RemoteEvent> {
        self.replace_event(calendar_id, event_id, body)
            .await
            .map_err(api_error)
    }
}
