use std::fmt;

use super::connection::Connection;

pub const DEFAULT_PROCESS: &str = "java.exe";

/// Selects the connections counted in the restricted report column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionFilter {
    pub process_name: Option<String>,
    pub remote_host: Option<String>,
    pub remote_port: Option<u16>,
}

impl ConnectionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The filter used when nothing else is configured: connections owned
    /// by `java.exe`.
    pub fn default_process() -> Self {
        Self::new().with_process_name(DEFAULT_PROCESS.to_string())
    }

    pub fn with_process_name(mut self, name: String) -> Self {
        self.process_name = Some(name);
        self
    }

    pub fn with_remote_host(mut self, host: String) -> Self {
        self.remote_host = Some(host);
        self
    }

    pub fn with_remote_port(mut self, port: u16) -> Self {
        self.remote_port = Some(port);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.process_name.is_none() && self.remote_host.is_none() && self.remote_port.is_none()
    }

    /// Short column label: `java` for `java.exe`, `filtered` when no process
    /// is configured.
    pub fn label(&self) -> &str {
        match self.process_name.as_deref() {
            Some(name) => name.strip_suffix(".exe").unwrap_or(name),
            None => "filtered",
        }
    }

    pub fn matches(&self, conn: &Connection) -> bool {
        // Process names compare exactly; a connection without one never matches.
        if let Some(ref process_filter) = self.process_name {
            if conn.process.as_deref() != Some(process_filter.as_str()) {
                return false;
            }
        }

        if let Some(ref host_filter) = self.remote_host {
            if !conn.remote_host.contains(host_filter.as_str()) {
                return false;
            }
        }

        if let Some(port) = self.remote_port {
            if conn.remote_port != port {
                return false;
            }
        }

        true
    }
}

impl fmt::Display for ConnectionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if let Some(ref process_name) = self.process_name {
            parts.push(format!("Process: {}", process_name));
        }

        if let Some(ref remote_host) = self.remote_host {
            parts.push(format!("Host: {}", remote_host));
        }

        if let Some(port) = self.remote_port {
            parts.push(format!("Port: {}", port));
        }

        if parts.is_empty() {
            f.write_str("No filters")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}
