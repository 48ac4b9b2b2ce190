//! Extraction of all shifts visible in one schedule view.

use std::collections::HashSet;

use tracing::debug;

use crate::parse::{ShiftFragment, parse};
use crate::shift::{ShiftEntity, ShiftKey};
use crate::source::ScrapedFragment;
use crate::view::ViewMonth;

/// Shifts in discovery order, deduplicated by identity key.
/// The first occurrence of a key wins.
#[derive(Debug, Default)]
pub struct ShiftSet {
    seen: HashSet<ShiftKey>,
    shifts: Vec<ShiftEntity>,
}

impl ShiftSet {
    /// Returns false when an identical shift was already present.
    pub fn insert(&mut self, shift: ShiftEntity) -> bool {
        if !self.seen.insert(shift.key()) {
            return false;
        }
        self.shifts.push(shift);
        true
    }

    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    pub fn into_vec(self) -> Vec<ShiftEntity> {
        self.shifts
    }
}

impl Extend<ShiftEntity> for ShiftSet {
    fn extend<I: IntoIterator<Item = ShiftEntity>>(&mut self, iter: I) {
        for shift in iter {
            self.insert(shift);
        }
    }
}

/// Parse every fragment of one view. Fragments that are not shifts are
/// skipped; duplicate nodes for the same shift collapse into one.
pub fn collect_month(view: ViewMonth, fragments: &[ScrapedFragment]) -> Vec<ShiftEntity> {
    let mut set = ShiftSet::default();

    for scraped in fragments {
        let fragment = ShiftFragment::from_scraped(scraped, view);

        let Some(shift) = parse(&fragment) else {
            debug!(%view, text = %scraped.text, "fragment skipped");
            continue;
        };

        if !set.insert(shift) {
            debug!(%view, text = %scraped.text, "duplicate shift node skipped");
        }
    }

    set.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scraped(text: &str, element_id: Option<&str>) -> ScrapedFragment {
        ScrapedFragment {
            text: text.to_string(),
            element_id: element_id.map(str::to_string),
            ancestor_id: None,
        }
    }

    const JUNE: ViewMonth = ViewMonth {
        year: 2025,
        month: 6,
    };

    #[test]
    fn test_collects_in_discovery_order() {
        let fragments = vec![
            scraped("2 kola 10:00", Some("cal_day_shift_20")),
            scraped("1k 08:00", Some("cal_day_shift_3")),
        ];

        let shifts = collect_month(JUNE, &fragments);
        let titles: Vec<_> = shifts.iter().map(|s| s.title()).collect();
        assert_eq!(titles, vec!["2K 10:00", "1K 8:00"]);
    }

    #[test]
    fn test_skips_noise() {
        let fragments = vec![
            scraped("", Some("cal_day_shift_1")),
            scraped("Legenda", Some("cal_day_shift_1")),
            scraped("08:00", None),
            scraped("3 kola 09:30", Some("cal_day_shift_15")),
        ];

        let shifts = collect_month(JUNE, &fragments);
        assert_eq!(shifts.len(), 1);
        assert_eq!(shifts[0].title(), "3K 9:30");
    }

    #[test]
    fn test_deduplicates_identical_nodes() {
        let fragments = vec![
            scraped("1k 08:00", Some("cal_day_shift_3")),
            scraped("1 kola 8:00", Some("cal_day_shift_3")),
            scraped("1k 08:00", Some("cal_day_shift_4")),
        ];

        let shifts = collect_month(JUNE, &fragments);
        assert_eq!(shifts.len(), 2);
        assert_eq!(shifts[0].raw_text(), "1k 08:00");
    }

    #[test]
    fn test_shift_set_first_occurrence_wins() {
        let mut set = ShiftSet::default();
        let first = collect_month(JUNE, &[scraped("1k 08:00 first", Some("cal_day_shift_3"))]);
        let second = collect_month(JUNE, &[scraped("1k 08:00 second", Some("cal_day_shift_3"))]);

        set.extend(first);
        set.extend(second);

        assert_eq!(set.len(), 1);
        assert_eq!(set.into_vec()[0].raw_text(), "1k 08:00 first");
    }
}
