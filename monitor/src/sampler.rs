//! The sampling cycle: read, parse, diff, render, store.

use std::time::Instant;

use log::debug;
use softirqtop_core::{MonitorError, ProcFile, TextSource};

use crate::{render, History, Snapshot};

/// Default counter source.
pub const SOFTIRQS_PATH: &str = "/proc/softirqs";

/// Periodic softirq rate sampler.
///
/// Each call to [`sample`](SoftirqSampler::sample) runs one full cycle:
/// read raw text from the source, parse a fresh [`Snapshot`], compute
/// rates against the retained previous sample, render the table, and
/// store the new sample. The first successful cycle only primes the
/// history and produces no table. A failed read leaves the history
/// untouched so the next cycle diffs against the last good sample.
#[derive(Debug)]
pub struct SoftirqSampler<S> {
    source: S,
    cpu_count: usize,
    refresh_secs: u64,
    history: History,
}

impl SoftirqSampler<ProcFile> {
    /// Create a sampler reading from [`SOFTIRQS_PATH`].
    #[must_use]
    pub fn new(cpu_count: usize, refresh_secs: u64) -> Self {
        Self::with_source(ProcFile::new(SOFTIRQS_PATH), cpu_count, refresh_secs)
    }
}

impl<S: TextSource> SoftirqSampler<S> {
    /// Create a sampler reading from an arbitrary source.
    #[must_use]
    pub fn with_source(source: S, cpu_count: usize, refresh_secs: u64) -> Self {
        Self {
            source,
            cpu_count,
            refresh_secs,
            history: History::new(),
        }
    }

    /// Check if the counter source is available on this system.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read.
    pub fn check_availability(&self) -> Result<(), MonitorError> {
        self.source.check_availability()
    }

    /// Human-readable description of the counter source.
    #[must_use]
    pub fn describe_source(&self) -> String {
        self.source.describe()
    }

    /// Run one sampling cycle.
    ///
    /// Returns the rendered table, or `None` on the priming cycle (no
    /// previous sample to diff against).
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read; the history is left
    /// untouched in that case and the caller should retry on the next
    /// trigger.
    pub fn sample(&mut self) -> Result<Option<String>, MonitorError> {
        let raw = self.source.read_raw()?;
        let taken_at = Instant::now();
        Ok(self.ingest(&raw, taken_at))
    }

    /// Parse a reading taken at `taken_at`, diff it against the history,
    /// and make it the new history entry.
    fn ingest(&mut self, raw: &str, taken_at: Instant) -> Option<String> {
        let snapshot = Snapshot::parse(raw, self.cpu_count);
        debug!(
            "parsed {} counters from {}",
            snapshot.len(),
            self.source.describe()
        );

        let table = self.history.get().map(|(prev, prev_taken_at)| {
            let elapsed = taken_at.duration_since(prev_taken_at);
            let rates = snapshot.rates_since(prev, elapsed);
            render(&rates, self.cpu_count, self.refresh_secs)
        });

        self.history.set(snapshot, taken_at);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::NamedTempFile;

    struct FailingSource;

    impl TextSource for FailingSource {
        fn read_raw(&mut self) -> Result<String, MonitorError> {
            Err(MonitorError::temporarily_unavailable("gone"))
        }

        fn describe(&self) -> String {
            "failing source".to_owned()
        }
    }

    fn write_counters(file: &NamedTempFile, hi: (u64, u64), timer: (u64, u64)) {
        let raw = format!(
            "                    CPU0       CPU1\n  HI: {} {}\n  TIMER: {} {}\n",
            hi.0, hi.1, timer.0, timer.1
        );
        fs::write(file.path(), raw).unwrap();
    }

    #[test]
    fn test_first_cycle_primes_without_output() {
        let file = NamedTempFile::new().unwrap();
        write_counters(&file, (5, 0), (100, 200));

        let mut sampler =
            SoftirqSampler::with_source(ProcFile::new(file.path()), 2, 3);
        assert!(sampler.history.is_empty());

        let out = sampler.sample().unwrap();
        assert!(out.is_none());
        assert!(!sampler.history.is_empty());
    }

    #[test]
    fn test_steady_state_renders_and_updates_history() {
        let file = NamedTempFile::new().unwrap();
        write_counters(&file, (5, 0), (100, 200));

        let mut sampler =
            SoftirqSampler::with_source(ProcFile::new(file.path()), 2, 3);
        sampler.sample().unwrap();

        // Samples land within the same second; elapsed clamps to 1s.
        write_counters(&file, (9, 2), (130, 260));
        let out = sampler.sample().unwrap().unwrap();
        assert!(out.contains("4/s"));
        assert!(out.contains("30/s"));
        assert!(out.contains("60/s"));

        // A third cycle diffs against the second sample, not the first.
        write_counters(&file, (9, 2), (130, 260));
        let out = sampler.sample().unwrap().unwrap();
        assert!(out.contains("0/s"));
        assert!(!out.contains("30/s"));
    }

    #[test]
    fn test_read_failure_skips_cycle_and_keeps_history() {
        let file = NamedTempFile::new().unwrap();
        write_counters(&file, (5, 0), (100, 200));

        let path = file.path().to_path_buf();
        let mut sampler = SoftirqSampler::with_source(ProcFile::new(&path), 2, 3);
        sampler.sample().unwrap();
        let (primed, _) = sampler.history.get().unwrap();
        let primed = primed.clone();

        // Source disappears: the cycle fails, history is untouched.
        drop(file);
        assert!(sampler.sample().is_err());
        let (kept, _) = sampler.history.get().unwrap();
        assert_eq!(*kept, primed);
    }

    #[test]
    fn test_failing_source_never_populates_history() {
        let mut sampler = SoftirqSampler::with_source(FailingSource, 2, 3);
        assert!(sampler.sample().is_err());
        assert!(sampler.history.is_empty());
    }

    #[test]
    fn test_check_availability() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "header").unwrap();

        let sampler = SoftirqSampler::with_source(ProcFile::new(file.path()), 1, 1);
        assert!(sampler.check_availability().is_ok());

        let sampler =
            SoftirqSampler::with_source(ProcFile::new("/no/such/file"), 1, 1);
        assert!(sampler.check_availability().is_err());
    }
}
