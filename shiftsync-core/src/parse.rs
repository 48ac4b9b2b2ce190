//! Parsing of a single schedule fragment into a shift.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::classify::classify;
use crate::constants::SHIFT_TZ;
use crate::shift::ShiftEntity;
use crate::source::ScrapedFragment;
use crate::view::ViewMonth;

static START_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([01]?\d|2[0-3]):([0-5]\d)\b").expect("time pattern is valid"));

static SHIFT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"cal_day_shift_(\d+)").expect("shift id pattern is valid"));

static DAY_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"cal_day_(\d+)").expect("day id pattern is valid"));

/// Everything the parser needs to know about one fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftFragment {
    pub text: String,
    /// Day of month, when it could be resolved from the page.
    pub day: Option<u32>,
    pub view: ViewMonth,
}

impl ShiftFragment {
    pub fn from_scraped(scraped: &ScrapedFragment, view: ViewMonth) -> Self {
        ShiftFragment {
            text: scraped.text.clone(),
            day: resolve_day(scraped.element_id.as_deref(), scraped.ancestor_id.as_deref()),
            view,
        }
    }
}

/// Day of month from the fragment's own id (`cal_day_shift_15`), falling back
/// to the enclosing day cell (`cal_day_15`). Malformed ids resolve to `None`.
pub fn resolve_day(element_id: Option<&str>, ancestor_id: Option<&str>) -> Option<u32> {
    let from_id = |id: Option<&str>, re: &Regex| {
        id.and_then(|id| re.captures(id))
            .and_then(|caps| caps[1].parse::<u32>().ok())
    };

    from_id(element_id, &SHIFT_ID_RE).or_else(|| from_id(ancestor_id, &DAY_ID_RE))
}

/// First `H:MM` / `HH:MM` time in the text.
fn start_time(text: &str) -> Option<(u32, u32)> {
    let caps = START_TIME_RE.captures(text)?;
    let hour = caps[1].parse().ok()?;
    let minute = caps[2].parse().ok()?;
    Some((hour, minute))
}

/// Local start instant. Dates that do not exist yield `None`. A repeated
/// local time takes the earlier instant; a local time skipped by a DST jump
/// is read with the offset in force before the jump.
fn civil_start(view: ViewMonth, day: u32, hour: u32, minute: u32) -> Option<DateTime<Tz>> {
    let naive = NaiveDate::from_ymd_opt(view.year, view.month, day)?.and_hms_opt(hour, minute, 0)?;

    match SHIFT_TZ.from_local_datetime(&naive) {
        LocalResult::Single(start) => Some(start),
        LocalResult::Ambiguous(earlier, _) => Some(earlier),
        LocalResult::None => {
            let before = SHIFT_TZ
                .from_local_datetime(&(naive - Duration::hours(1)))
                .earliest()?;
            Some(before + Duration::hours(1))
        }
    }
}

/// Parse one fragment. Returns `None` for anything that is not a usable shift:
/// empty text, unresolved day, missing start time or impossible date.
pub fn parse(fragment: &ShiftFragment) -> Option<ShiftEntity> {
    let text = fragment.text.trim();
    if text.is_empty() {
        return None;
    }

    let day = fragment.day?;
    let (hour, minute) = start_time(text)?;
    let kind = classify(&text.to_lowercase());
    let start = civil_start(fragment.view, day, hour, minute)?;
    let wall = NaiveTime::from_hms_opt(hour, minute, 0)?;

    Some(ShiftEntity::with_wall_time(kind, wall, start, text))
}
