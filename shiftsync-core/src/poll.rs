//! Bounded polling for the schedule source's loading states.

use std::time::Duration;

/// How many times to check a condition and how long to sleep in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollBudget {
    pub attempts: u32,
    pub interval: Duration,
}

impl PollBudget {
    /// Waiting for a view to finish loading.
    pub const READY: PollBudget = PollBudget::new(80, Duration::from_millis(500));

    /// Waiting for the month header to change after navigation.
    pub const SETTLE: PollBudget = PollBudget::new(40, Duration::from_millis(500));

    pub const fn new(attempts: u32, interval: Duration) -> Self {
        PollBudget { attempts, interval }
    }

    /// Upper bound on the time spent sleeping before the budget is exhausted.
    pub fn max_wait(&self) -> Duration {
        self.interval * self.attempts
    }

    pub async fn pause(&self) {
        if !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
    }
}
