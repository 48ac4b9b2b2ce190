//! Idempotent reconciliation of parsed shifts into a remote calendar.
//!
//! Each shift is handled on its own: query its guard window, decide, write
//! once. Events that no shift touches are left alone, and nothing is ever
//! deleted. The query-then-write sequence is not atomic with respect to
//! other clients editing the same calendar.

mod action;
mod outcome;
mod report;

pub use action::{ReconcileAction, decide};
pub use outcome::Outcome;
pub use report::{ReconcileCounts, ReconcileReport, ShiftReport};

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::constants::GUARD_WINDOW_MINUTES;
use crate::error::CalendarResult;
use crate::remote::{CalendarApi, EventBody};
use crate::shift::ShiftEntity;

/// Query window for a shift: its span widened by the guard on both sides.
pub fn guard_window(shift: &ShiftEntity) -> (DateTime<Utc>, DateTime<Utc>) {
    let guard = Duration::minutes(GUARD_WINDOW_MINUTES);
    (shift.start_utc() - guard, shift.end_utc() + guard)
}

/// Reconcile every shift in order. A failure for one shift is recorded in
/// its report and does not stop the others.
pub async fn reconcile<A: CalendarApi>(
    api: &A,
    calendar_id: &str,
    shifts: &[ShiftEntity],
) -> ReconcileReport {
    let mut reports = Vec::with_capacity(shifts.len());

    for shift in shifts {
        let result = reconcile_shift(api, calendar_id, shift).await;

        match &result {
            Ok(outcome) => info!(title = shift.title(), %outcome, "shift reconciled"),
            Err(e) => warn!(title = shift.title(), error = %e, "shift not reconciled"),
        }

        reports.push(ShiftReport {
            shift: shift.clone(),
            result,
        });
    }

    ReconcileReport(reports)
}

async fn reconcile_shift<A: CalendarApi>(
    api: &A,
    calendar_id: &str,
    shift: &ShiftEntity,
) -> CalendarResult<Outcome> {
    let (time_min, time_max) = guard_window(shift);
    let existing = api.list_events(calendar_id, time_min, time_max).await?;

    let action = decide(shift, &existing);
    let body = EventBody::from(shift);

    match &action {
        ReconcileAction::Update { event_id } | ReconcileAction::Rename { event_id } => {
            api.update_event(calendar_id, event_id, &body).await?;
        }
        ReconcileAction::Insert => {
            api.insert_event(calendar_id, &body).await?;
        }
    }

    Ok(action.outcome())
}
