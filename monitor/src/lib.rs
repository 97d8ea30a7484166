//! # softirqtop
//!
//! Terminal monitor for per-CPU kernel softirq rates.
//!
//! Periodically samples `/proc/softirqs`, diffs each counter against the
//! previous sample, and renders the per-second rate of change as an
//! aligned table with one column per CPU.

mod history;
mod rates;
mod render;
mod sampler;
mod snapshot;

pub use history::History;
pub use rates::RateTable;
pub use render::render;
pub use sampler::{SoftirqSampler, SOFTIRQS_PATH};
pub use snapshot::Snapshot;
