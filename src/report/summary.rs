use std::io::Write;

use crate::core::connection::Connection;
use crate::core::filters::ConnectionFilter;
use crate::core::stats::{StateCounts, REPORTED_STATES};
use crate::error::NetstatError;

/// Tabular report of a single listing, one `total/filtered` line per state.
pub struct SummaryReport {
    filter: ConnectionFilter,
    show_zero: bool,
}

impl SummaryReport {
    pub fn new(filter: ConnectionFilter) -> Self {
        Self {
            filter,
            show_zero: false,
        }
    }

    pub fn with_show_zero(mut self, show_zero: bool) -> Self {
        self.show_zero = show_zero;
        self
    }

    pub fn write(
        &self,
        connections: &[Connection],
        writer: &mut impl Write,
    ) -> Result<(), NetstatError> {
        let counts = StateCounts::tally(connections, &self.filter);
        let label = self.filter.label();
        // Labels are right-aligned on the widest one so counts line up.
        let width = REPORTED_STATES
            .iter()
            .map(|s| row_label(s.as_str(), label).len())
            .max()
            .unwrap_or(0);

        for (state, total, filtered) in counts.rows() {
            if total == 0 && !self.show_zero {
                continue;
            }
            writeln!(
                writer,
                "{:>width$} {}/{}",
                row_label(state.as_str(), label),
                total,
                filtered,
                width = width
            )
            .map_err(NetstatError::Write)?;
        }

        writer.flush().map_err(NetstatError::Write)
    }
}

fn row_label(state: &str, label: &str) -> String {
    format!("{} (total/{}):", state, label)
}
