use std::fmt;

use super::error::{summarize, ParseError};
use super::ports::standard_port;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Tcp,
    Udp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "TCP",
            Protocol::Udp => "UDP",
        }
    }

    /// Splits a leading `TCP`/`UDP` token off a trimmed line.
    ///
    /// The literal has to be the whole first token, so `TCPv6` is not a
    /// protocol line.
    pub fn strip(line: &str) -> Option<(Protocol, &str)> {
        let (token, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let protocol = match token {
            "TCP" => Protocol::Tcp,
            "UDP" => Protocol::Udp,
            _ => return None,
        };
        Some((protocol, rest))
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    Closed,
    CloseWait,
    Closing,
    Established,
    FinWait1,
    FinWait2,
    LastAck,
    Listening,
    SynReceived,
    SynSent,
    TimeWait,
}

impl ConnectionState {
    pub const ALL: [ConnectionState; 11] = [
        ConnectionState::Closed,
        ConnectionState::CloseWait,
        ConnectionState::Closing,
        ConnectionState::Established,
        ConnectionState::FinWait1,
        ConnectionState::FinWait2,
        ConnectionState::LastAck,
        ConnectionState::Listening,
        ConnectionState::SynReceived,
        ConnectionState::SynSent,
        ConnectionState::TimeWait,
    ];

    /// The name netstat prints for this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Closed => "CLOSED",
            ConnectionState::CloseWait => "CLOSE_WAIT",
            ConnectionState::Closing => "CLOSING",
            ConnectionState::Established => "ESTABLISHED",
            ConnectionState::FinWait1 => "FIN_WAIT_1",
            ConnectionState::FinWait2 => "FIN_WAIT_2",
            ConnectionState::LastAck => "LAST_ACK",
            ConnectionState::Listening => "LISTENING",
            ConnectionState::SynReceived => "SYN_RECEIVED",
            ConnectionState::SynSent => "SYN_SENT",
            ConnectionState::TimeWait => "TIME_WAIT",
        }
    }

    /// Case-sensitive lookup by printed name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.as_str() == name)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub protocol: Protocol,
    pub state: ConnectionState,
    pub local_host: String,
    pub local_port: u16,
    pub remote_host: String,
    pub remote_port: u16,
    pub process: Option<String>, // From a following "[name]" line
}

impl Connection {
    pub fn new(
        protocol: Protocol,
        state: ConnectionState,
        local_host: &str,
        local_port: u16,
        remote_host: &str,
        remote_port: u16,
    ) -> Self {
        Self {
            protocol,
            state,
            local_host: local_host.to_string(),
            local_port,
            remote_host: remote_host.to_string(),
            remote_port,
            process: None,
        }
    }

    pub fn with_process(mut self, process: &str) -> Self {
        self.process = Some(process.to_string());
        self
    }

    /// Parses a connection line such as
    /// `TCP    10.0.0.1:80    10.0.0.2:61000    ESTABLISHED`.
    ///
    /// UDP lines need a trailing state like TCP lines do; a stateless row
    /// such as `UDP 0.0.0.0:123 *:*` fails with [`ParseError::UnknownState`].
    pub fn parse(line_number: usize, line: &str) -> Result<Self, ParseError> {
        let line = line.trim();

        let (protocol, rest) =
            Protocol::strip(line).ok_or_else(|| ParseError::UnrecognizedProtocol {
                line: line_number,
                content: summarize(line),
            })?;

        let (addresses, state_name) = rest
            .trim_start()
            .rsplit_once(char::is_whitespace)
            .ok_or_else(|| {
                ParseError::malformed(line_number, "no space separator identified", line)
            })?;

        let state =
            ConnectionState::from_name(state_name).ok_or_else(|| ParseError::UnknownState {
                line: line_number,
                state: state_name.to_string(),
                content: summarize(line),
            })?;

        let (local, remote) = addresses
            .trim_end()
            .split_once(char::is_whitespace)
            .ok_or_else(|| {
                ParseError::malformed(
                    line_number,
                    "missing space separator between local address and remote address",
                    line,
                )
            })?;

        let (local_host, local_port) = split_address(
            line_number,
            line,
            local.trim(),
            "missing ':' separator in the local address",
        )?;
        let (remote_host, remote_port) = split_address(
            line_number,
            line,
            remote.trim(),
            "missing ':' separator in the remote address",
        )?;

        Ok(Self {
            protocol,
            state,
            local_host: local_host.to_string(),
            local_port,
            remote_host: remote_host.to_string(),
            remote_port,
            process: None,
        })
    }

    /// Offers a line following the connection line as process information.
    ///
    /// Returns `Ok(true)` when a `[name]` line was attached; any other text
    /// is left alone and yields `Ok(false)`.
    pub fn attach_continuation(
        &mut self,
        line_number: usize,
        line: &str,
    ) -> Result<bool, ParseError> {
        let line = line.trim();
        let Some(inner) = line.strip_prefix('[') else {
            return Ok(false);
        };
        let name = inner
            .strip_suffix(']')
            .ok_or_else(|| ParseError::malformed(line_number, "invalid process", line))?;
        self.process = Some(name.to_string());
        Ok(true)
    }

    pub fn local_address(&self) -> String {
        format!("{}:{}", self.local_host, self.local_port)
    }

    pub fn remote_address(&self) -> String {
        format!("{}:{}", self.remote_host, self.remote_port)
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.protocol,
            self.local_address(),
            self.remote_address(),
            self.state
        )?;
        if let Some(process) = &self.process {
            write!(f, " [{}]", process)?;
        }
        Ok(())
    }
}

fn split_address<'a>(
    line_number: usize,
    line: &str,
    address: &'a str,
    missing_colon: &'static str,
) -> Result<(&'a str, u16), ParseError> {
    let (host, port) = address
        .rsplit_once(':')
        .ok_or_else(|| ParseError::malformed(line_number, missing_colon, line))?;
    Ok((host, resolve_port(line_number, line, port)?))
}

fn resolve_port(line_number: usize, line: &str, token: &str) -> Result<u16, ParseError> {
    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        return token
            .parse::<u16>()
            .map_err(|_| ParseError::malformed(line_number, "port out of range", line));
    }
    standard_port(token).ok_or_else(|| ParseError::UnknownPortName {
        line: line_number,
        name: token.to_string(),
        content: summarize(line),
    })
}
