use crate::error::CalendarError;
use crate::reconcile::Outcome;
use crate::shift::ShiftEntity;

/// Result of reconciling one shift.
#[derive(Debug)]
pub struct ShiftReport {
    pub shift: ShiftEntity,
    pub result: Result<Outcome, CalendarError>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileCounts {
    pub inserted: usize,
    pub updated: usize,
    pub renamed: usize,
    pub failed: usize,
}

/// Per-shift results of a reconciliation run, in processing order.
#[derive(Debug, Default)]
pub struct ReconcileReport(pub Vec<ShiftReport>);

impl ReconcileReport {
    pub fn counts(&self) -> ReconcileCounts {
        let mut counts = ReconcileCounts::default();
        for report in &self.0 {
            match report.result {
                Ok(Outcome::Inserted) => counts.inserted += 1,
                Ok(Outcome::Updated) => counts.updated += 1,
                Ok(Outcome::Renamed) => counts.renamed += 1,
                Err(_) => counts.failed += 1,
            }
        }
        counts
    }

    pub fn failures(&self) -> impl Iterator<Item = &ShiftReport> {
        self.0.iter().filter(|r| r.result.is_err())
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShiftReport> {
        self.0.iter()
    }
}
