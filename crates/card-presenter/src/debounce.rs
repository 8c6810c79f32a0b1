/// A debounced input cell.
///
/// Writes land in the input cell and push the commit deadline out by
/// `delay_ms`; only when the input has been quiet for the full delay does it
/// move into the committed cell. The browser owns the real timer, so time is
/// passed in as milliseconds: the host calls [`Debounce::set`] on input,
/// schedules a timer for [`Debounce::deadline`], and calls
/// [`Debounce::poll`] when it fires.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    delay_ms: f64,
    input: Option<T>,
    committed: Option<T>,
    deadline: Option<f64>,
}

impl<T: Clone> Debounce<T> {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms: delay_ms.max(0.0),
            input: None,
            committed: None,
            deadline: None,
        }
    }

    /// Start with a committed value already in place.
    pub fn with_value(delay_ms: f64, value: T) -> Self {
        let mut debounce = Self::new(delay_ms);
        debounce.input = Some(value.clone());
        debounce.committed = Some(value);
        debounce
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    /// Write the input cell and restart the timer.
    pub fn set(&mut self, value: T, now_ms: f64) {
        self.input = Some(value);
        self.deadline = Some(now_ms + self.delay_ms);
    }

    /// Commit the pending input if its deadline has passed.
    ///
    /// Returns the newly committed value, or `None` when nothing was due.
    pub fn poll(&mut self, now_ms: f64) -> Option<&T> {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                self.committed = self.input.clone();
                self.committed.as_ref()
            }
            _ => None,
        }
    }

    /// When the pending input is due, if any.
    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Drop the pending deadline. Nothing commits until the next `set`.
    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            tracing::trace!("pending debounce cancelled");
        }
    }

    pub fn input(&self) -> Option<&T> {
        self.input.as_ref()
    }

    pub fn committed(&self) -> Option<&T> {
        self.committed.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_last_write_commits() {
        let mut d = Debounce::new(300.0);
        d.set("v1", 0.0);
        assert_eq!(d.poll(100.0), None);
        d.set("v2", 200.0);
        // v1's original deadline has passed but was pushed out.
        assert_eq!(d.poll(350.0), None);
        assert_eq!(d.poll(501.0), Some(&"v2"));
        assert_eq!(d.committed(), Some(&"v2"));
    }

    #[test]
    fn test_commits_once() {
        let mut d = Debounce::new(50.0);
        d.set(1, 0.0);
        assert_eq!(d.poll(50.0), Some(&1));
        assert_eq!(d.poll(500.0), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn test_separate_windows_commit_separately() {
        let mut d = Debounce::new(10.0);
        d.set("a", 0.0);
        assert_eq!(d.poll(20.0), Some(&"a"));
        d.set("b", 30.0);
        assert_eq!(d.deadline(), Some(40.0));
        assert_eq!(d.poll(45.0), Some(&"b"));
    }

    #[test]
    fn test_cancel_prevents_commit() {
        let mut d = Debounce::with_value(100.0, "initial");
        d.set("typed", 0.0);
        d.cancel();
        assert_eq!(d.poll(1_000.0), None);
        assert_eq!(d.committed(), Some(&"initial"));
        assert_eq!(d.input(), Some(&"typed"));
    }

    #[test]
    fn test_negative_delay_clamped() {
        let mut d = Debounce::new(-5.0);
        assert_eq!(d.delay_ms(), 0.0);
        d.set(7, 10.0);
        assert_eq!(d.poll(10.0), Some(&7));
    }
}
