//! Collection across successive schedule views.

use tracing::{info, warn};

use crate::collect::{ShiftSet, collect_month};
use crate::constants::DEFAULT_MONTHS;
use crate::poll::PollBudget;
use crate::shift::ShiftEntity;
use crate::source::ScheduleSource;
use crate::view::ViewMonth;

#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Number of views to collect, starting with the one currently shown.
    pub months: usize,
    pub ready: PollBudget,
    pub settle: PollBudget,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        AggregateOptions {
            months: DEFAULT_MONTHS,
            ready: PollBudget::READY,
            settle: PollBudget::SETTLE,
        }
    }
}

/// Shifts gathered from all views that could be reached.
#[derive(Debug, Default)]
pub struct Aggregation {
    pub shifts: Vec<ShiftEntity>,
    /// Views actually collected, in order.
    pub views: Vec<ViewMonth>,
}

/// Collect the current view and up to `months - 1` following ones.
///
/// Navigation trouble never fails the run: aggregation stops and returns what
/// was collected so far. Shifts are deduplicated across views, first
/// occurrence wins.
pub async fn aggregate<S: ScheduleSource>(source: &mut S, options: &AggregateOptions) -> Aggregation {
    let mut set = ShiftSet::default();
    let mut views = Vec::new();

    for index in 0..options.months {
        if index == 0 {
            if !wait_ready(source, options.ready).await {
                warn!("schedule did not finish loading, collecting anyway");
            }
        } else {
            let Some(&previous) = views.last() else {
                break;
            };
            if !advance(source, previous, options).await {
                break;
            }
        }

        let view = source.current_view().await;
        let fragments = match source.fragments().await {
            Ok(fragments) => fragments,
            Err(e) => {
                warn!(%view, error = %e, "could not read schedule fragments");
                break;
            }
        };

        let shifts = collect_month(view, &fragments);
        info!(%view, fragments = fragments.len(), shifts = shifts.len(), "view collected");

        set.extend(shifts);
        views.push(view);
    }

    Aggregation {
        shifts: set.into_vec(),
        views,
    }
}

async fn wait_ready<S: ScheduleSource>(source: &mut S, budget: PollBudget) -> bool {
    for _ in 0..budget.attempts {
        if source.is_ready().await {
            return true;
        }
        budget.pause().await;
    }
    false
}

/// Move past `from` and wait until the source shows a different month.
async fn advance<S: ScheduleSource>(source: &mut S, from: ViewMonth, options: &AggregateOptions) -> bool {
    match source.advance().await {
        Ok(true) => {}
        Ok(false) => {
            info!(%from, "no next month available");
            return false;
        }
        Err(e) => {
            warn!(%from, error = %e, "could not move to next month");
            return false;
        }
    }

    let mut changed = false;
    for _ in 0..options.settle.attempts {
        if source.current_view().await != from {
            changed = true;
            break;
        }
        options.settle.pause().await;
    }

    if !changed {
        warn!(%from, "view did not change after navigation");
        return false;
    }

    if !wait_ready(source, options.ready).await {
        warn!(%from, "next month did not finish loading, collecting anyway");
    }
    true
}
