/// Longest slice of a raw line quoted back in a diagnostic.
const SUMMARY_LEN: usize = 64;

/// A line of the capture that could not be turned into records.
///
/// Every variant carries the 1-based number of the offending line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: unknown connection type: {content}")]
    UnrecognizedProtocol { line: usize, content: String },
    #[error("line {line}: {reason}: {content}")]
    MalformedLine {
        line: usize,
        reason: &'static str,
        content: String,
    },
    #[error("line {line}: invalid state {state}: {content}")]
    UnknownState {
        line: usize,
        state: String,
        content: String,
    },
    #[error("line {line}: unknown standard port {name}: {content}")]
    UnknownPortName {
        line: usize,
        name: String,
        content: String,
    },
    #[error("line {line}: invalid timestamp: {reason}")]
    TimestampParse { line: usize, reason: String },
}

impl ParseError {
    pub(crate) fn malformed(line: usize, reason: &'static str, content: &str) -> Self {
        ParseError::MalformedLine {
            line,
            reason,
            content: summarize(content),
        }
    }
}

/// Shortens a raw line for inclusion in an error message.
pub(crate) fn summarize(content: &str) -> String {
    match content.char_indices().nth(SUMMARY_LEN) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}
