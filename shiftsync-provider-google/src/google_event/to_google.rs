use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use google_calendar::types::{Event, EventDateTime};
use shiftsync_core::remote::EventBody;

pub trait ToGoogle {
    fn to_google(&self) -> Event;
}

impl ToGoogle for EventBody {
    fn to_google(&self) -> Event {
        Event {
            summary: self.title.clone(),
            start: Some(event_time_to_google(&self.start, &self.time_zone)),
            end: Some(event_time_to_google(&self.end, &self.time_zone)),
            color_id: self.color_id.clone(),
            ..Default::default()
        }
    }
}

fn event_time_to_google(time: &DateTime<Tz>, time_zone: &str) -> EventDateTime {
    EventDateTime {
        date: None,
        date_time: Some(time.with_timezone(&Utc)),
        time_zone: time_zone.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shiftsync_core::constants::SHIFT_TZ;

    #[test]
    fn test_body_to_google() {
        let start = SHIFT_TZ.with_ymd_and_hms(2025, 6, 15, 9, 30, 0).unwrap();
        let body = EventBody {
            title: "3K 9:30".to_string(),
            start,
            end: start + chrono::Duration::hours(12),
            color_id: "10".to_string(),
            time_zone: "Europe/Prague".to_string(),
        };

        let event = body.to_google();

        assert_eq!(event.summary, "3K 9:30");
        assert_eq!(event.color_id, "10");
        assert!(event.id.is_empty());

        let google_start = event.start.unwrap();
        assert_eq!(
            google_start.date_time,
            Some(Utc.with_ymd_and_hms(2025, 6, 15, 7, 30, 0).unwrap())
        );
        assert_eq!(google_start.time_zone, "Europe/Prague");
        assert!(google_start.date.is_none());
    }
}
