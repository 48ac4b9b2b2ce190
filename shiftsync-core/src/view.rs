//! The month currently rendered by the schedule.

use std::fmt;

use chrono::{Datelike, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// `červenec` is listed before its prefix `červen` so the longer name wins.
static MONTH_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(leden|únor|unor|březen|brezen|duben|květen|kveten|červenec|cervenec|červen|cerven|srpen|září|zari|říjen|rijen|listopad|prosinec)\s+(\d{4})",
    )
    .expect("month header pattern is valid")
});

/// A (year, month) pair identifying one schedule view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewMonth {
    pub year: i32,
    pub month: u32,
}

impl ViewMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(ViewMonth { year, month })
    }

    /// Current month in the given time zone.
    pub fn current(tz: Tz) -> Self {
        let now = Utc::now().with_timezone(&tz);
        ViewMonth {
            year: now.year(),
            month: now.month(),
        }
    }

    /// Find a Czech month header ("Červen 2025") in the page text.
    pub fn detect(body_text: &str) -> Option<Self> {
        let caps = MONTH_HEADER_RE.captures(body_text)?;
        let month = month_number(&caps[1].to_lowercase())?;
        let year = caps[2].parse().ok()?;
        ViewMonth::new(year, month)
    }

    /// Like `detect`, falling back to the current month when the page shows
    /// no recognizable header.
    pub fn detect_or_current(body_text: &str, tz: Tz) -> Self {
        Self::detect(body_text).unwrap_or_else(|| Self::current(tz))
    }
}

impl fmt::Display for ViewMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

fn month_number(name: &str) -> Option<u32> {
    let month = match name {
        "leden" => 1,
        "únor" | "unor" => 2,
        "březen" | "brezen" => 3,
        "duben" => 4,
        "květen" | "kveten" => 5,
        "červen" | "cerven" => 6,
        "červenec" | "cervenec" => 7,
        "srpen" => 8,
        "září" | "zari" => 9,
        "říjen" | "rijen" => 10,
        "listopad" => 11,
        "prosinec" => 12,
        _ => return None,
    };
    Some(month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SHIFT_TZ;

    #[test]
    fn test_detect_month_header() {
        assert_eq!(
            ViewMonth::detect("Bloky\nČerven 2025\nPo Út St"),
            ViewMonth::new(2025, 6)
        );
        assert_eq!(ViewMonth::detect("prosinec 2024"), ViewMonth::new(2024, 12));
    }

    #[test]
    fn test_detect_prefers_cervenec_over_cerven() {
        assert_eq!(ViewMonth::detect("Červenec 2025"), ViewMonth::new(2025, 7));
        assert_eq!(ViewMonth::detect("cervenec 2025"), ViewMonth::new(2025, 7));
    }

    #[test]
    fn test_detect_ascii_folded_names() {
        assert_eq!(ViewMonth::detect("ZARI 2025"), ViewMonth::new(2025, 9));
        assert_eq!(ViewMonth::detect("unor   2026"), ViewMonth::new(2026, 2));
    }

    #[test]
    fn test_detect_requires_year() {
        assert_eq!(ViewMonth::detect("Červen"), None);
        assert_eq!(ViewMonth::detect("no header here"), None);
    }

    #[test]
    fn test_detect_or_current_falls_back() {
        let view = ViewMonth::detect_or_current("", SHIFT_TZ);
        assert_eq!(view, ViewMonth::current(SHIFT_TZ));
    }

    #[test]
    fn test_new_rejects_invalid_month() {
        assert!(ViewMonth::new(2025, 0).is_none());
        assert!(ViewMonth::new(2025, 13).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(ViewMonth { year: 2025, month: 6 }.to_string(), "2025-06");
    }
}
