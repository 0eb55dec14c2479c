use std::io::BufRead;
use std::mem;

use chrono::NaiveDateTime;

use super::connection::{Connection, Protocol};
use super::error::{summarize, ParseError};
use super::timestamp;
use crate::error::NetstatError;

/// Connections captured at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub timestamp: NaiveDateTime,
    pub connections: Vec<Connection>,
}

/// A date line seen, waiting for its time line and for the next boundary.
struct OpenSnapshot {
    date_line: usize,
    date: String,
    timestamp: Option<NaiveDateTime>,
}

impl OpenSnapshot {
    fn close(self, connections: Vec<Connection>) -> Result<Snapshot, ParseError> {
        let timestamp = self.timestamp.ok_or_else(|| ParseError::TimestampParse {
            line: self.date_line,
            reason: format!("no time line follows date '{}'", self.date),
        })?;
        Ok(Snapshot {
            timestamp,
            connections,
        })
    }
}

/// Reads every connection of a capture as a single listing.
///
/// Date and time lines get no special treatment here; like any other
/// unbracketed text they are skipped.
pub fn parse_connections<R: BufRead>(reader: R) -> Result<Vec<Connection>, NetstatError> {
    let mut current: Option<Connection> = None;
    let mut finished = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(NetstatError::Read)?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        accept_record_line(&mut current, &mut finished, index + 1, line)?;
    }

    finished.extend(current);
    Ok(finished)
}

/// Reads a capture made of timestamped readings, handing each snapshot to
/// `on_snapshot` as soon as the next date line (or end of input) closes it.
///
/// Returns the number of snapshots delivered.
pub fn parse_snapshots<R, F>(reader: R, mut on_snapshot: F) -> Result<usize, NetstatError>
where
    R: BufRead,
    F: FnMut(Snapshot) -> Result<(), NetstatError>,
{
    let mut current: Option<Connection> = None;
    let mut finished = Vec::new();
    let mut open: Option<OpenSnapshot> = None;
    let mut delivered = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(NetstatError::Read)?;
        let line = line.trim();
        let line_number = index + 1;
        if line.is_empty() {
            continue;
        }

        if timestamp::is_date_line(line) {
            finished.extend(current.take());
            let connections = mem::take(&mut finished);
            match open.take() {
                Some(previous) => {
                    on_snapshot(previous.close(connections)?)?;
                    delivered += 1;
                }
                None => drop_unstamped(connections),
            }
            open = Some(OpenSnapshot {
                date_line: line_number,
                date: line.to_string(),
                timestamp: None,
            });
        } else if timestamp::is_time_line(line) {
            let snapshot = open.as_mut().ok_or_else(|| ParseError::TimestampParse {
                line: line_number,
                reason: format!("time '{}' has no preceding date line", line),
            })?;
            snapshot.timestamp = Some(timestamp::combine(line_number, &snapshot.date, line)?);
        } else {
            accept_record_line(&mut current, &mut finished, line_number, line)?;
        }
    }

    finished.extend(current);
    match open {
        Some(last) => {
            on_snapshot(last.close(finished)?)?;
            delivered += 1;
        }
        None => drop_unstamped(finished),
    }
    Ok(delivered)
}

/// Feeds one non-blank, non-timestamp line to the record under construction.
fn accept_record_line(
    current: &mut Option<Connection>,
    finished: &mut Vec<Connection>,
    line_number: usize,
    line: &str,
) -> Result<(), ParseError> {
    if Protocol::strip(line).is_some() {
        let next = Connection::parse(line_number, line)?;
        log::trace!("line {}: {}", line_number, next);
        finished.extend(current.replace(next));
    } else if let Some(conn) = current.as_mut() {
        if !conn.attach_continuation(line_number, line)? {
            log::debug!("line {}: ignoring '{}'", line_number, summarize(line));
        }
    }
    Ok(())
}

fn drop_unstamped(connections: Vec<Connection>) {
    if !connections.is_empty() {
        log::warn!(
            "dropping {} connection(s) listed before the first timestamp",
            connections.len()
        );
    }
}
