//! Fixed-width table rendering for rate output.

use softirqtop_core::format;

use crate::RateTable;

/// Render a rate table as aligned text.
///
/// The output is the refresh-interval line, a blank line, a header row
/// with one right-aligned `CPU<i>` column per CPU index, then one row per
/// counter in ascending name order with each rate formatted as
/// `<value>/s`. Clearing the terminal between redraws is the caller's
/// responsibility.
#[must_use]
pub fn render(table: &RateTable, cpu_count: usize, refresh_secs: u64) -> String {
    let mut out = String::new();

    out.push_str(&format!("Refresh Interval: every {refresh_secs} seconds\n"));
    out.push('\n');

    out.push_str(&format::label_cell(""));
    for cpu in 0..cpu_count {
        out.push_str(&format::value_cell(&format!("CPU{cpu}")));
    }
    out.push('\n');

    for (name, rates) in table.iter() {
        out.push_str(&format::label_cell(name));
        for &rate in rates {
            out.push_str(&format::value_cell(&format::per_second(rate)));
        }
        out.push('\n');
    }

    out
}
