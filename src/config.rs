use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default public NTP pool queried for the extraction timestamp
pub const DEFAULT_NTP_SERVER: &str = "europe.pool.ntp.org";

/// Standard NTP port
pub const DEFAULT_NTP_PORT: u16 = 123;

/// Name of the sidecar file written next to the input
pub const DEFAULT_OUTPUT_NAME: &str = "metadata.json";

/// Metadata extraction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Host name of the time server
    pub ntp_server: String,
    /// UDP port of the time server
    pub ntp_port: u16,
    /// Timeout of the SNTP request/response exchange (name resolution not included)
    pub ntp_timeout: Duration,
    /// Skip the time server and use the local clock
    pub offline: bool,
    /// EPSG code of the geographic reference used for the bounding box
    pub geographic_epsg: u32,
    /// File name of the sidecar inside the output directory
    pub output_name: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            ntp_server: DEFAULT_NTP_SERVER.to_string(),
            ntp_port: DEFAULT_NTP_PORT,
            ntp_timeout: Duration::from_secs(5),
            offline: false,
            geographic_epsg: 4326,      // WGS84 lon/lat
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
        }
    }
}
