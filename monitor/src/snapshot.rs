//! Snapshot parsing for `/proc/softirqs` style counter text.
//!
//! The source format is a header line naming the CPU columns followed by
//! one line per softirq counter:
//!
//! ```text
//!                     CPU0       CPU1       CPU2       CPU3
//!           HI:          5          0          0          1
//!        TIMER:     332519     310498     289555     272913
//!       NET_RX:       2122        235        882        550
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use log::warn;
use regex::Regex;

/// Matches one counter line: optional leading whitespace, a counter name,
/// a colon, then the whitespace-separated per-CPU fields.
static COUNTER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\w+):\s*(.*)$").expect("counter line pattern is valid")
});

/// One point-in-time parsed reading of all counters across all CPUs.
///
/// Maps counter name to an ordered sequence of per-CPU counts, index 0
/// being CPU0. A snapshot is built fresh from raw text each cycle and
/// never mutated afterwards.
///
/// Counter lines with fewer numeric fields than the CPU count produce a
/// shorter sequence; the missing cells are not zero-padded. Downstream
/// rate computation treats absent previous cells as zero (see
/// [`Snapshot::rates_since`](crate::Snapshot::rates_since)).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    counters: BTreeMap<String, Vec<u64>>,
}

impl Snapshot {
    /// Parse raw counter text into a snapshot.
    ///
    /// The first line is the CPU column header and is discarded. Lines
    /// that do not match the `<name>: <counts>` shape are skipped; at
    /// most `cpu_count` fields are taken per line. Individual fields
    /// that fail to parse are logged and omitted from the sequence.
    #[must_use]
    pub fn parse(raw: &str, cpu_count: usize) -> Self {
        let mut counters = BTreeMap::new();
        for line in raw.lines().skip(1) {
            if let Some((name, counts)) = parse_line(line, cpu_count) {
                counters.insert(name, counts);
            }
        }
        Self { counters }
    }

    /// Per-CPU counts for a counter name, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[u64]> {
        self.counters.get(name).map(Vec::as_slice)
    }

    /// Iterate over counters in lexicographic name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u64])> {
        self.counters
            .iter()
            .map(|(name, counts)| (name.as_str(), counts.as_slice()))
    }

    /// Number of counters in this snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Whether the snapshot holds no counters at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

/// Parse a single counter line, or `None` if the line does not have the
/// name-then-numbers shape (blank lines and trailer lines are expected).
fn parse_line(line: &str, cpu_count: usize) -> Option<(String, Vec<u64>)> {
    let caps = COUNTER_LINE.captures(line)?;
    let name = &caps[1];

    let mut counts = Vec::with_capacity(cpu_count);
    for field in caps[2].split_whitespace().take(cpu_count) {
        match field.parse::<u64>() {
            Ok(value) => counts.push(value),
            Err(err) => {
                warn!("skipping unparsable field {field:?} for counter {name}: {err}");
            }
        }
    }

    if counts.is_empty() {
        return None;
    }
    Some((name.to_owned(), counts))
}
