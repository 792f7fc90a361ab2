//! Connection settings for a terminal session.

use std::time::Duration;
use zkenroll_core::constants::{DEFAULT_PORT, DEFAULT_TIMEOUT_SECS};

/// Configuration for one terminal connection.
///
/// Carries everything a [`Gateway`](crate::Gateway) needs to open a
/// session: network endpoint, the single I/O timeout applied to connect,
/// read and write operations, and the device communication key.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use zkenroll_device::DeviceConfig;
///
/// let config = DeviceConfig {
///     address: "192.168.1.201".to_string(),
///     timeout: Duration::from_secs(10),
///     ..DeviceConfig::default()
/// };
/// assert_eq!(config.endpoint(), "192.168.1.201:4370");
/// ```
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Terminal network address (hostname or IP).
    pub address: String,

    /// Terminal TCP port.
    pub port: u16,

    /// Timeout for all I/O operations (connect, read, write).
    ///
    /// No additional deadlines are imposed above the gateway; this is the
    /// only timeout in play.
    pub timeout: Duration,

    /// Device communication key; 0 means no key is configured.
    pub comm_key: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            address: "192.168.1.201".to_string(),
            port: DEFAULT_PORT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            comm_key: 0,
        }
    }
}

impl DeviceConfig {
    /// Render the endpoint as `address:port` for logging and errors.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}
