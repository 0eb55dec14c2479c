use std::io::Write;

use crate::core::filters::ConnectionFilter;
use crate::core::parser::Snapshot;
use crate::core::stats::{StateCounts, REPORTED_STATES};
use crate::core::timestamp::OUTPUT_FORMAT;
use crate::error::NetstatError;

/// CSV-like report with one row per snapshot: the timestamp, the total
/// count of every state, then the filtered count of every state.
pub struct TimelineReport {
    filter: ConnectionFilter,
    header_written: bool,
}

impl TimelineReport {
    pub fn new(filter: ConnectionFilter) -> Self {
        Self {
            filter,
            header_written: false,
        }
    }

    pub fn write_snapshot(
        &mut self,
        snapshot: &Snapshot,
        writer: &mut impl Write,
    ) -> Result<(), NetstatError> {
        self.write_header(writer)?;

        let counts = StateCounts::tally(&snapshot.connections, &self.filter);
        log::debug!(
            "snapshot {}: {} connection(s)",
            snapshot.timestamp,
            counts.connections()
        );
        let mut fields = vec![snapshot.timestamp.format(OUTPUT_FORMAT).to_string()];
        fields.extend(counts.rows().map(|(_, total, _)| total.to_string()));
        fields.extend(counts.rows().map(|(_, _, filtered)| filtered.to_string()));

        writeln!(writer, "{}", fields.join(", ")).map_err(NetstatError::Write)
    }

    /// Writes the header if no snapshot was reported.
    pub fn finish(&mut self, writer: &mut impl Write) -> Result<(), NetstatError> {
        self.write_header(writer)?;
        writer.flush().map_err(NetstatError::Write)
    }

    fn write_header(&mut self, writer: &mut impl Write) -> Result<(), NetstatError> {
        if self.header_written {
            return Ok(());
        }
        self.header_written = true;

        let label = self.filter.label();
        let mut columns = vec!["# time".to_string()];
        columns.extend(REPORTED_STATES.iter().map(|s| format!("{} (total)", s)));
        columns.extend(REPORTED_STATES.iter().map(|s| format!("{} ({})", s, label)));

        writeln!(writer, "{}", columns.join(", ")).map_err(NetstatError::Write)
    }
}
