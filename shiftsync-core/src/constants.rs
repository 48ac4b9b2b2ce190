use chrono_tz::Tz;

/// Civil time zone every shift is expressed in.
pub const SHIFT_TZ: Tz = chrono_tz::Europe::Prague;

/// IANA name of `SHIFT_TZ`, sent along with every event written to the calendar.
pub const SHIFT_TZ_NAME: &str = "Europe/Prague";

/// Calendar that receives the shifts when nothing else is configured.
pub const DEFAULT_CALENDAR_NAME: &str = "Rohlik směny";

/// Number of successive schedule views collected per run (current + next).
pub const DEFAULT_MONTHS: usize = 2;

/// Slack added on both sides of a shift when querying the remote calendar.
pub const GUARD_WINDOW_MINUTES: i64 = 1;

/// Texts shown by the schedule page while it is still loading.
pub const LOADING_MARKERS: [&str; 2] = ["Načítám bloky", "Pracuji"];
