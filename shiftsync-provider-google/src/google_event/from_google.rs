use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use google_calendar::types::{Event, EventDateTime};
use shiftsync_core::remote::RemoteEvent;

pub trait FromGoogle {
    fn from_google(event: Event) -> Result<Self>
    where
        Self: Sized;
}

impl FromGoogle for RemoteEvent {
    fn from_google(event: Event) -> Result<Self> {
        if event.id.is_empty() {
            bail!("Event has no id");
        }
        if event.status == "cancelled" {
            bail!("Event {} is cancelled", event.id);
        }

        let start = timed(event.start.as_ref(), "start")?;
        let end = timed(event.end.as_ref(), "end")?;

        Ok(RemoteEvent {
            id: event.id,
            title: event.summary,
            start,
            end,
            color_id: if event.color_id.is_empty() {
                None
            } else {
                Some(event.color_id)
            },
        })
    }
}

/// Only timed events take part in reconciliation; all-day ones are refused.
fn timed(time: Option<&EventDateTime>, which: &str) -> Result<DateTime<Utc>> {
    match time {
        Some(EventDateTime {
            date_time: Some(dt), ..
        }) => Ok(*dt),
        Some(EventDateTime { date: Some(_), .. }) => bail!("All-day event has no {} time", which),
        _ => bail!("Event has no {} time", which),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn at(hour: u32) -> EventDateTime {
        EventDateTime {
            date: None,
            date_time: Some(Utc.with_ymd_and_hms(2025, 6, 15, hour, 0, 0).unwrap()),
            time_zone: String::new(),
        }
    }

    fn event(id: &str, start: EventDateTime, end: EventDateTime) -> Event {
        Event {
            id: id.to_string(),
            summary: "1K 8:00".to_string(),
            status: "confirmed".to_string(),
            color_id: "5".to_string(),
            start: Some(start),
            end: Some(end),
            ..Default::default()
        }
    }

    #[test]
    fn test_timed_event() {
        let remote = RemoteEvent::from_google(event("abc", at(6), at(11))).unwrap();

        assert_eq!(remote.id, "abc");
        assert_eq!(remote.title, "1K 8:00");
        assert_eq!(remote.start, Utc.with_ymd_and_hms(2025, 6, 15, 6, 0, 0).unwrap());
        assert_eq!(remote.end, Utc.with_ymd_and_hms(2025, 6, 15, 11, 0, 0).unwrap());
        assert_eq!(remote.color_id.as_deref(), Some("5"));
    }

    #[test]
    fn test_missing_color_is_none() {
        let mut google = event("abc", at(6), at(11));
        google.color_id = String::new();

        assert!(RemoteEvent::from_google(google).unwrap().color_id.is_none());
    }

    #[test]
    fn test_all_day_event_is_refused() {
        let day = EventDateTime {
            date: NaiveDate::from_ymd_opt(2025, 6, 15),
            date_time: None,
            time_zone: String::new(),
        };

        assert!(RemoteEvent::from_google(event("abc", day.clone(), day)).is_err());
    }

    #[test]
    fn test_cancelled_event_is_refused() {
        let mut google = event("abc", at(6), at(11));
        google.status = "cancelled".to_string();

        assert!(RemoteEvent::from_google(google).is_err());
    }
}
