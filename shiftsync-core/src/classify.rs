//! Shift label classification.
//!
//! A schedule entry announces its length as a number of rounds ("2 kola",
//! "3K", ...). The count maps to a canonical label, a calendar color and a
//! duration in hours.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::shift::ShiftColor;

static ROUNDS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d+)\s*(k|kola)\b").expect("rounds pattern is valid"));

/// Explicitly known round counts: (count, color, hours).
/// The first entry is the default for entries without a recognizable count.
const KNOWN_KINDS: [(u32, ShiftColor, u32); 4] = [
    (1, ShiftColor::Banana, 5),
    (2, ShiftColor::Grape, 9),
    (3, ShiftColor::Basil, 12),
    (4, ShiftColor::Peacock, 15),
];

/// Color for any recognized count outside `KNOWN_KINDS`.
const FALLBACK_COLOR: ShiftColor = ShiftColor::Graphite;

/// Canonical label, color and duration of a shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftKind {
    pub label: String,
    pub color: ShiftColor,
    pub duration_hours: u32,
}

impl ShiftKind {
    fn known((count, color, duration_hours): (u32, ShiftColor, u32)) -> Self {
        ShiftKind {
            label: format!("{}K", count),
            color,
            duration_hours,
        }
    }

    /// Any recognized count outside the table. `digits` is the count as
    /// written, without leading zeros, so counts beyond `u32` keep their label.
    fn generic(digits: &str) -> Self {
        ShiftKind {
            label: format!("{}K", digits),
            color: FALLBACK_COLOR,
            duration_hours: KNOWN_KINDS[0].2,
        }
    }
}

/// Round count announced in `text`, as a digit string without leading zeros.
fn rounds(text: &str) -> Option<&str> {
    let digits = ROUNDS_RE.captures(text)?.get(1)?.as_str();
    let trimmed = digits.trim_start_matches('0');
    Some(if trimmed.is_empty() { "0" } else { trimmed })
}

/// Classify a lower-cased schedule entry. Never fails: text without a
/// recognizable count is a first-kind shift.
pub fn classify(text: &str) -> ShiftKind {
    let Some(digits) = rounds(text) else {
        return ShiftKind::known(KNOWN_KINDS[0]);
    };

    let known = digits
        .parse::<u32>()
        .ok()
        .and_then(|count| KNOWN_KINDS.iter().find(|(known, _, _)| *known == count));

    match known {
        Some(entry) => ShiftKind::known(*entry),
        None => ShiftKind::generic(digits),
    }
}
