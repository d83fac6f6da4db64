//! Cancel-and-reschedule timer state.
//!
//! The engine never sleeps. It records the pending value and its deadline;
//! whoever drives the engine (the async runtime, a test) asks for
//! [`Debounce::deadline`] and calls [`Debounce::poll`] once it has passed.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debounce<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debounce<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replace any pending value and restart the quiescence period
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Drop the pending value, returning it
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Release the pending value if its deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.cancel(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_values_supersede_earlier_ones() {
        let start = Instant::now();
        let mut debounce = Debounce::new(Duration::from_millis(500));

        debounce.schedule(1.5_f32, start);
        debounce.schedule(2.0, start + Duration::from_millis(300));
        debounce.schedule(2.5, start + Duration::from_millis(600));

        // 500ms after the first value, but the period restarted
        assert_eq!(debounce.poll(start + Duration::from_millis(800)), None);
        assert_eq!(debounce.poll(start + Duration::from_millis(1100)), Some(2.5));
        assert_eq!(debounce.deadline(), None);
    }

    #[test]
    fn cancel_clears_deadline() {
        let start = Instant::now();
        let mut debounce = Debounce::new(Duration::from_millis(100));
        debounce.schedule((), start);
        assert_eq!(debounce.deadline(), Some(start + Duration::from_millis(100)));

        assert_eq!(debounce.cancel(), Some(()));
        assert_eq!(debounce.deadline(), None);
        assert_eq!(debounce.poll(start + Duration::from_secs(1)), None);
    }
}
