//! Per-second rate computation between two snapshots.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::Snapshot;

/// Minimum elapsed divisor in seconds.
///
/// Two samples taken within the same second would otherwise divide by
/// zero; the divisor is clamped instead of failing the cycle.
const MIN_ELAPSED_SECS: u64 = 1;

/// Per-second rates for every counter of a current snapshot.
///
/// Maps counter name to an ordered sequence of signed per-second rates,
/// one per CPU index. Rates are negative only when a counter decreased
/// (reset or wrap); that is surfaced as-is, not corrected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateTable {
    rates: BTreeMap<String, Vec<i64>>,
}

impl RateTable {
    /// Per-CPU rates for a counter name, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[i64]> {
        self.rates.get(name).map(Vec::as_slice)
    }

    /// Iterate over counters in lexicographic name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[i64])> {
        self.rates
            .iter()
            .map(|(name, rates)| (name.as_str(), rates.as_slice()))
    }

    /// Number of counters in this table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Whether the table holds no counters at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Snapshot {
    /// Compute per-second rates of change against an earlier snapshot.
    ///
    /// For every counter in `self`, each cell is
    /// `(current - previous) / elapsed_secs` using integer truncating
    /// division, where `elapsed_secs` is the whole-second floor of
    /// `elapsed`, clamped to at least one second. A counter or cell
    /// missing from `prev` is treated as previously zero, so a newly
    /// appearing counter's first reading is its absolute value divided
    /// by the elapsed time. Counters present only in `prev` are dropped:
    /// the result's key set equals this snapshot's key set.
    #[must_use]
    pub fn rates_since(&self, prev: &Snapshot, elapsed: Duration) -> RateTable {
        let secs = elapsed.as_secs().max(MIN_ELAPSED_SECS) as i64;

        let mut rates = BTreeMap::new();
        for (name, counts) in self.iter() {
            let prev_counts = prev.get(name);
            let row = counts
                .iter()
                .enumerate()
                .map(|(cpu, &count)| {
                    let prev_count = prev_counts
                        .and_then(|counts| counts.get(cpu))
                        .copied()
                        .unwrap_or(0);
                    (count as i64 - prev_count as i64) / secs
                })
                .collect();
            rates.insert(name.to_owned(), row);
        }
        RateTable { rates }
    }
}
