//! Retained previous sample used to compute the next rate table.

use std::time::Instant;

use crate::Snapshot;

/// The single most recent prior sample, or empty before the first cycle
/// completes.
///
/// Owned by the sampling cycle; `set` fully replaces any previous content,
/// so no more than one snapshot is ever retained.
#[derive(Debug, Default)]
pub struct History {
    last: Option<(Snapshot, Instant)>,
}

impl History {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored snapshot and the instant it was taken, if any.
    #[must_use]
    pub fn get(&self) -> Option<(&Snapshot, Instant)> {
        self.last
            .as_ref()
            .map(|(snapshot, taken_at)| (snapshot, *taken_at))
    }

    /// Replace the stored sample.
    pub fn set(&mut self, snapshot: Snapshot, taken_at: Instant) {
        self.last = Some((snapshot, taken_at));
    }

    /// Whether no sample has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let history = History::new();
        assert!(history.is_empty());
        assert!(history.get().is_none());
    }

    #[test]
    fn test_set_replaces_previous_content() {
        let mut history = History::new();

        let first = Snapshot::parse("header\n  HI: 1\n", 1);
        let t0 = Instant::now();
        history.set(first, t0);
        assert!(!history.is_empty());

        let second = Snapshot::parse("header\n  HI: 2\n", 1);
        let t1 = Instant::now();
        history.set(second.clone(), t1);

        let (stored, taken_at) = history.get().unwrap();
        assert_eq!(*stored, second);
        assert_eq!(taken_at, t1);
    }
}
