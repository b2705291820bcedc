//! Cooperative cancellation for search
//!
//! A `SearchControl` is threaded through every recursive call. It combines
//! an optional wall-clock deadline with an optional shared flag that another
//! thread can raise; the search checks it on entry to each node and unwinds
//! with `SearchError::Cancelled`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Deadline and cancel flag for one search.
#[derive(Debug, Clone, Default)]
pub struct SearchControl {
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
}

impl SearchControl {
    /// No deadline, no flag
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Deadline `budget` from now
    #[must_use]
    pub fn with_budget(budget: Duration) -> Self {
        Self::unbounded().deadline(Instant::now() + budget)
    }

    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self::unbounded().deadline(deadline)
    }

    #[must_use]
    pub fn with_cancel_flag(flag: Arc<AtomicBool>) -> Self {
        Self::unbounded().cancel_flag(flag)
    }

    /// Set the deadline
    #[must_use]
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the cancel flag
    #[must_use]
    pub fn cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// True once the deadline has passed or the flag is raised
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_never_cancels() {
        assert!(!SearchControl::unbounded().is_cancelled());
    }

    #[test]
    fn test_zero_budget_cancels() {
        let ctl = SearchControl::with_budget(Duration::ZERO);
        assert!(ctl.is_cancelled());
    }

    #[test]
    fn test_future_deadline() {
        let ctl = SearchControl::with_deadline(Instant::now() + Duration::from_secs(3600));
        assert!(!ctl.is_cancelled());
    }

    #[test]
    fn test_cancel_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let ctl = SearchControl::with_cancel_flag(Arc::clone(&flag));
        assert!(!ctl.is_cancelled());
        flag.store(true, Ordering::Relaxed);
        assert!(ctl.is_cancelled());
    }
}
