//! Deadline arithmetic shared by the timed processes.
//!
//! Nothing in the engine sleeps. A timed process stores the instant it next
//! needs attention; the host calls [`Session::tick`] at (or after) that
//! instant. Deadlines chain from the previous deadline, not from the tick
//! time, so a late tick does not stretch the schedule.
//!
//! [`Session::tick`]: crate::session::Session::tick

use embassy_time::{Duration, Instant};

/// `at + after`, saturating at [`Instant::MAX`].
pub(crate) fn later(at: Instant, after: Duration) -> Instant {
    at.checked_add(after).unwrap_or(Instant::MAX)
}

/// Fixed-period tick source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ticker {
    next: Instant,
    period: Duration,
}

impl Ticker {
    /// First tick fires one `period` after `now`.
    pub(crate) fn start(now: Instant, period: Duration) -> Self {
        Self {
            next: later(now, period),
            period,
        }
    }

    pub(crate) fn deadline(&self) -> Instant {
        self.next
    }

    /// Consume one due tick. Returns `false` when `now` is before the deadline.
    pub(crate) fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next = later(self.next, self.period);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_fires_on_deadline() {
        let mut t = Ticker::start(Instant::from_millis(0), Duration::from_secs(1));
        assert!(!t.poll(Instant::from_millis(999)));
        assert!(t.poll(Instant::from_millis(1000)));
        assert_eq!(t.deadline(), Instant::from_millis(2000));
    }

    #[test]
    fn test_late_tick_keeps_schedule() {
        let mut t = Ticker::start(Instant::from_millis(0), Duration::from_secs(1));
        assert!(t.poll(Instant::from_millis(1500)));
        assert_eq!(t.deadline(), Instant::from_millis(2000));
        assert!(t.poll(Instant::from_millis(2100)));
        assert!(!t.poll(Instant::from_millis(2200)));
    }

    #[test]
    fn test_later_saturates() {
        assert_eq!(later(Instant::MAX, Duration::from_secs(1)), Instant::MAX);
    }
}
