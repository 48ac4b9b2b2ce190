use crate::reconcile::Outcome;
use crate::remote::RemoteEvent;
use crate::shift::ShiftEntity;

/// The single write needed to bring one shift in line with the remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileAction {
    /// An event with the same title exists; re-apply times and color.
    Update { event_id: String },
    /// An event occupies exactly the same slot under another title.
    Rename { event_id: String },
    Insert,
}

impl ReconcileAction {
    pub fn outcome(&self) -> Outcome {
        match self {
            ReconcileAction::Update { .. } => Outcome::Updated,
            ReconcileAction::Rename { .. } => Outcome::Renamed,
            ReconcileAction::Insert => Outcome::Inserted,
        }
    }
}

/// Pick the action for `shift` given the remote events in its guard window.
///
/// First match wins: same title, then same start and end, then insert.
pub fn decide(shift: &ShiftEntity, remote: &[RemoteEvent]) -> ReconcileAction {
    if let Some(event) = remote.iter().find(|e| e.title == shift.title()) {
        return ReconcileAction::Update {
            event_id: event.id.clone(),
        };
    }

    let (start, end) = (shift.start_utc(), shift.end_utc());
    if let Some(event) = remote.iter().find(|e| e.start == start && e.end == end) {
        return ReconcileAction::Rename {
            event_id: event.id.clone(),
        };
    }

    ReconcileAction::Insert
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{ShiftFragment, parse};
    use crate::testing::remote_event;
    use crate::view::ViewMonth;
    use chrono::Duration;

    fn shift(text: &str) -> ShiftEntity {
        parse(&ShiftFragment {
            text: text.to_string(),
            day: Some(12),
            view: ViewMonth { year: 2025, month: 5 },
        })
        .unwrap()
    }

    #[test]
    fn test_empty_window_inserts() {
        assert_eq!(decide(&shift("1k 08:00"), &[]), ReconcileAction::Insert);
    }

    #[test]
    fn test_same_title_updates() {
        let s = shift("1k 08:00");
        let remote = vec![remote_event(
            "a",
            "1K 8:00",
            s.start_utc() + Duration::minutes(30),
            s.end_utc(),
        )];

        assert_eq!(
            decide(&s, &remote),
            ReconcileAction::Update {
                event_id: "a".to_string()
            }
        );
    }

    #[test]
    fn test_same_slot_renames() {
        let s = shift("2 kola 08:00");
        let remote = vec![remote_event("old", "1K 8:00", s.start_utc(), s.end_utc())];

        assert_eq!(
            decide(&s, &remote),
            ReconcileAction::Rename {
                event_id: "old".to_string()
            }
        );
    }

    #[test]
    fn test_title_match_wins_over_slot_match() {
        let s = shift("2 kola 08:00");
        let remote = vec![
            remote_event("slot", "Dentist", s.start_utc(), s.end_utc()),
            remote_event("title", "2K 8:00", s.start_utc(), s.end_utc() - Duration::hours(1)),
        ];

        assert_eq!(
            decide(&s, &remote),
            ReconcileAction::Update {
                event_id: "title".to_string()
            }
        );
    }

    #[test]
    fn test_partial_overlap_inserts() {
        let s = shift("1k 08:00");
        let remote = vec![remote_event(
            "lunch",
            "Lunch",
            s.start_utc() + Duration::hours(2),
            s.start_utc() + Duration::hours(3),
        )];

        assert_eq!(decide(&s, &remote), ReconcileAction::Insert);
    }

    #[test]
    fn test_outcomes() {
        assert_eq!(ReconcileAction::Insert.outcome(), Outcome::Inserted);
        assert_eq!(
            ReconcileAction::Rename {
                event_id: String::new()
            }
            .outcome(),
            Outcome::Renamed
        );
    }
}
