use crate::types::TimeSource;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Timestamp format of the sidecar (UTC, second precision)
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Error types for the network time query
#[derive(Debug, thiserror::Error)]
pub enum NtpError {
    #[error("network time query disabled")]
    Disabled,

    #[error("time server query failed: {0}")]
    Sync(#[from] rsntp::SynchroniztationError),

    #[error("time server returned an unrepresentable time: {0}")]
    Conversion(#[from] rsntp::ConversionError),
}

/// Source of the current UTC time
pub trait TimeService {
    fn fetch_utc(&self) -> Result<DateTime<Utc>, NtpError>;
}

/// SNTP time service, one synchronization per call
#[derive(Debug, Clone)]
pub struct SntpClient {
    server: String,
    port: u16,
    timeout: Duration,
}

impl SntpClient {
    pub fn new(server: &str, port: u16, timeout: Duration) -> Self {
        Self {
            server: server.to_string(),
            port,
            timeout,
        }
    }

    /// `host:port`, with IPv6 literals bracketed
    fn server_address(&self) -> String {
        if self.server.contains(':') && !self.server.starts_with('[') {
            format!("[{}]:{}", self.server, self.port)
        } else {
            format!("{}:{}", self.server, self.port)
        }
    }
}

impl TimeService for SntpClient {
    fn fetch_utc(&self) -> Result<DateTime<Utc>, NtpError> {
        let address = self.server_address();
        log::debug!("Querying time server {} (timeout {:?})", address, self.timeout);

        let mut client = rsntp::SntpClient::new();
        client.set_timeout(self.timeout);

        let result = client.synchronize(address)?;
        Ok(result.datetime().into_chrono_datetime()?)
    }
}

/// Time service used when the network must not be contacted
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

impl TimeService for Offline {
    fn fetch_utc(&self) -> Result<DateTime<Utc>, NtpError> {
        Err(NtpError::Disabled)
    }
}

/// Extraction timestamp with provenance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTime {
    pub time: DateTime<Utc>,
    pub source: TimeSource,
}

impl ResolvedTime {
    pub fn formatted(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }
}

/// Ask the time service once, fall back to the local clock on any failure
pub fn resolve_timestamp(service: &dyn TimeService) -> ResolvedTime {
    match service.fetch_utc() {
        Ok(time) => {
            log::debug!("Time server returned {}", time);
            ResolvedTime { time, source: TimeSource::Internet }
        }
        Err(e) => {
            log::warn!("Could not sync with time server ({}). Taking local timestamp", e);
            ResolvedTime { time: Utc::now(), source: TimeSource::Local }
        }
    }
}
