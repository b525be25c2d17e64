use std::time::{Duration, Instant};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A cancellable periodic schedule. The owner polls it from its event loop;
/// a cancelled ticker never fires again until re-armed.
#[derive(Clone, Debug)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Number of periods that elapsed since the last poll. Missed periods are
    /// coalesced into the returned count.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };
        let mut fired = 0;
        while due <= now {
            due += self.period;
            fired += 1;
        }
        self.next_due = Some(due);
        fired
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}
