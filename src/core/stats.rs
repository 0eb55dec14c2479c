use std::collections::HashMap;

use super::connection::{Connection, ConnectionState};
use super::filters::ConnectionFilter;

/// Column order of every report.
pub const REPORTED_STATES: [ConnectionState; 11] = [
    ConnectionState::Established,
    ConnectionState::Listening,
    ConnectionState::TimeWait,
    ConnectionState::Closed,
    ConnectionState::CloseWait,
    ConnectionState::Closing,
    ConnectionState::FinWait1,
    ConnectionState::FinWait2,
    ConnectionState::LastAck,
    ConnectionState::SynReceived,
    ConnectionState::SynSent,
];

/// Per-state connection counts of one snapshot.
#[derive(Debug, Clone, Default)]
pub struct StateCounts {
    total_by_state: HashMap<ConnectionState, usize>,
    filtered_by_state: HashMap<ConnectionState, usize>,
}

impl StateCounts {
    pub fn tally(connections: &[Connection], filter: &ConnectionFilter) -> Self {
        let mut counts = Self::default();
        for conn in connections {
            *counts.total_by_state.entry(conn.state).or_insert(0) += 1;
            if filter.matches(conn) {
                *counts.filtered_by_state.entry(conn.state).or_insert(0) += 1;
            }
        }
        counts
    }

    pub fn total(&self, state: ConnectionState) -> usize {
        self.total_by_state.get(&state).copied().unwrap_or(0)
    }

    pub fn filtered(&self, state: ConnectionState) -> usize {
        self.filtered_by_state.get(&state).copied().unwrap_or(0)
    }

    /// Number of connections tallied, across all states.
    pub fn connections(&self) -> usize {
        self.total_by_state.values().sum()
    }

    /// `(state, total, filtered)` in report order.
    pub fn rows(&self) -> impl Iterator<Item = (ConnectionState, usize, usize)> + '_ {
        REPORTED_STATES
            .into_iter()
            .map(|state| (state, self.total(state), self.filtered(state)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::connection::Protocol;

    fn conn(state: ConnectionState, process: Option<&str>) -> Connection {
        let c = Connection::new(Protocol::Tcp, state, "10.0.0.1", 80, "10.0.0.2", 61000);
        match process {
            Some(p) => c.with_process(p),
            None => c,
        }
    }

    fn sample() -> Vec<Connection> {
        vec![
            conn(ConnectionState::Established, Some("java.exe")),
            conn(ConnectionState::Established, Some("java.exe")),
            conn(ConnectionState::Established, None),
            conn(ConnectionState::Listening, Some("svchost.exe")),
            conn(ConnectionState::TimeWait, None),
            conn(ConnectionState::Closing, Some("java.exe")),
            conn(ConnectionState::SynSent, Some("chrome.exe")),
        ]
    }

    #[test]
    fn counts_by_state() {
        let counts = StateCounts::tally(&sample(), &ConnectionFilter::default_process());
        assert_eq!(counts.total(ConnectionState::Established), 3);
        assert_eq!(counts.filtered(ConnectionState::Established), 2);
        assert_eq!(counts.total(ConnectionState::Listening), 1);
        assert_eq!(counts.filtered(ConnectionState::Listening), 0);
        assert_eq!(counts.total(ConnectionState::Closing), 1);
        assert_eq!(counts.filtered(ConnectionState::Closing), 1);
        assert_eq!(counts.total(ConnectionState::LastAck), 0);
    }

    #[test]
    fn every_connection_is_counted_once() {
        let records = sample();
        let counts = StateCounts::tally(&records, &ConnectionFilter::default_process());
        assert_eq!(counts.connections(), records.len());
        let summed: usize = counts.rows().map(|(_, total, _)| total).sum();
        assert_eq!(summed, records.len());
        for (_, total, filtered) in counts.rows() {
            assert!(filtered <= total);
        }
    }

    #[test]
    fn empty_filter_counts_everything() {
        let counts = StateCounts::tally(&sample(), &ConnectionFilter::new());
        for (state, total, filtered) in counts.rows() {
            assert_eq!(total, filtered, "{state}");
        }
    }

    #[test]
    fn rows_follow_report_order() {
        let counts = StateCounts::tally(&[], &ConnectionFilter::new());
        let states: Vec<_> = counts.rows().map(|(s, _, _)| s).collect();
        assert_eq!(states, REPORTED_STATES.to_vec());
        assert!(counts.rows().all(|(_, t, f)| t == 0 && f == 0));
    }

    #[test]
    fn every_state_is_reported() {
        for state in ConnectionState::ALL {
            assert!(REPORTED_STATES.contains(&state), "{state} missing");
        }
    }
}
