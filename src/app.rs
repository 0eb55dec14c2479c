use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use crate::core::filters::ConnectionFilter;
use crate::core::parser::{parse_connections, parse_snapshots};
use crate::error::NetstatError;
use crate::report::{SummaryReport, TimelineReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportMode {
    /// One row per timestamped snapshot.
    #[default]
    Timeline,
    /// The whole capture as a single listing.
    Summary,
}

impl ReportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportMode::Timeline => "timeline",
            ReportMode::Summary => "summary",
        }
    }
}

pub struct App {
    pub mode: ReportMode,
    pub filter: ConnectionFilter,
    pub show_zero: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        App {
            mode: ReportMode::default(),
            filter: ConnectionFilter::default_process(),
            show_zero: false,
        }
    }

    pub fn with_mode(mut self, mode: ReportMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_filter(mut self, filter: ConnectionFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_show_zero(mut self, show_zero: bool) -> Self {
        self.show_zero = show_zero;
        self
    }

    /// Parses the capture at `path` and writes the report to `out`.
    pub fn run(&self, path: &Path, out: &mut impl Write) -> Result<(), NetstatError> {
        let file = File::open(path).map_err(|source| NetstatError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);

        log::info!(
            "reading {} ({} report, {})",
            path.display(),
            self.mode.as_str(),
            self.filter
        );
        if self.filter.is_empty() {
            log::info!("no filter configured, both columns count every connection");
        }

        match self.mode {
            ReportMode::Timeline => {
                let mut report = TimelineReport::new(self.filter.clone());
                let snapshots =
                    parse_snapshots(reader, |snapshot| report.write_snapshot(&snapshot, out))?;
                report.finish(out)?;
                log::info!("reported {} snapshot(s)", snapshots);
            }
            ReportMode::Summary => {
                let connections = parse_connections(reader)?;
                SummaryReport::new(self.filter.clone())
                    .with_show_zero(self.show_zero)
                    .write(&connections, out)?;
                log::info!("reported {} connection(s)", connections.len());
            }
        }

        Ok(())
    }
}
