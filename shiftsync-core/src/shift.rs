//! The shift entity produced by the parser and consumed by the reconciler.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Duration, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::classify::ShiftKind;

/// Google Calendar palette entries used for shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftColor {
    Banana,
    Grape,
    Basil,
    Peacock,
    Graphite,
}

impl ShiftColor {
    /// The `colorId` understood by the Google Calendar API.
    pub fn color_id(self) -> &'static str {
        match self {
            ShiftColor::Banana => "5",
            ShiftColor::Grape => "3",
            ShiftColor::Basil => "10",
            ShiftColor::Peacock => "7",
            ShiftColor::Graphite => "8",
        }
    }
}

impl fmt::Display for ShiftColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShiftColor::Banana => "Banana",
            ShiftColor::Grape => "Grape",
            ShiftColor::Basil => "Basil",
            ShiftColor::Peacock => "Peacock",
            ShiftColor::Graphite => "Graphite",
        };
        write!(f, "{}", name)
    }
}

/// Identity of a shift across the whole pipeline.
///
/// Two shifts are the same shift if and only if title, start and end match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShiftKey {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// One work shift parsed from the schedule.
///
/// Immutable once built; `end` is always `start + duration_hours`.
#[derive(Debug, Clone)]
pub struct ShiftEntity {
    label: String,
    color: ShiftColor,
    duration_hours: u32,
    start: DateTime<Tz>,
    end: DateTime<Tz>,
    title: String,
    raw_text: String,
}

impl ShiftEntity {
    pub fn new(kind: ShiftKind, start: DateTime<Tz>, raw_text: impl Into<String>) -> Self {
        Self::with_wall_time(kind, start.time(), start, raw_text)
    }

    /// Like `new`, but the title shows `wall` as written in the schedule.
    /// Differs from `start`'s local time only for times skipped by a DST jump.
    pub fn with_wall_time(
        kind: ShiftKind,
        wall: NaiveTime,
        start: DateTime<Tz>,
        raw_text: impl Into<String>,
    ) -> Self {
        let end = start + Duration::hours(i64::from(kind.duration_hours));
        let title = format!("{} {}:{:02}", kind.label, wall.hour(), wall.minute());

        ShiftEntity {
            label: kind.label,
            color: kind.color,
            duration_hours: kind.duration_hours,
            start,
            end,
            title,
            raw_text: raw_text.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color(&self) -> ShiftColor {
        self.color
    }

    pub fn duration_hours(&self) -> u32 {
        self.duration_hours
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start.with_timezone(&Utc)
    }

    pub fn end_utc(&self) -> DateTime<Utc> {
        self.end.with_timezone(&Utc)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Source fragment text, kept for diagnostics only.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn key(&self) -> ShiftKey {
        ShiftKey {
            title: self.title.clone(),
            start: self.start_utc(),
            end: self.end_utc(),
        }
    }
}

impl PartialEq for ShiftEntity {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.start == other.start && self.end == other.end
    }
}

impl Eq for ShiftEntity {}

impl Hash for ShiftEntity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for ShiftEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} → {}",
            self.title,
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::constants::SHIFT_TZ;
    use chrono::TimeZone;

    fn shift_at(text: &str, hour: u32, minute: u32) -> ShiftEntity {
        let start = SHIFT_TZ
            .with_ymd_and_hms(2025, 3, 4, hour, minute, 0)
            .unwrap();
        ShiftEntity::new(classify(text), start, text)
    }

    #[test]
    fn test_title_keeps_hour_unpadded_and_minute_padded() {
        assert_eq!(shift_at("1k", 9, 5).title(), "1K 9:05");
        assert_eq!(shift_at("4k", 14, 30).title(), "4K 14:30");
    }

    #[test]
    fn test_end_is_start_plus_duration() {
        let shift = shift_at("2 kola", 6, 0);
        assert_eq!(shift.end() - shift.start(), Duration::hours(9));
        assert!(shift.end() > shift.start());
    }

    #[test]
    fn test_equality_ignores_raw_text() {
        let start = SHIFT_TZ.with_ymd_and_hms(2025, 3, 4, 8, 0, 0).unwrap();
        let a = ShiftEntity::new(classify("1k"), start, "1k 8:00");
        let b = ShiftEntity::new(classify("1 kola"), start, "1 kola 08:00 extra");

        assert_eq!(a, b);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_different_start_is_a_different_shift() {
        assert_ne!(shift_at("1k", 8, 0), shift_at("1k", 9, 0));
    }
}
