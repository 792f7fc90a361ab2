//! Error types for terminal gateway operations.

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, DeviceError>;

/// Errors that can occur while talking to a terminal.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// Session is not open or has already been closed.
    #[error("Not connected to terminal")]
    NotConnected,

    /// Connection attempt timed out.
    #[error("Connection timeout after {0}ms")]
    ConnectionTimeout(u64),

    /// Terminal refused the session.
    #[error("Connection refused: {0}")]
    ConnectionRefused(String),

    /// Terminal could not enumerate its stored user records.
    #[error("User enumeration failed: {0}")]
    ListFailed(String),

    /// Terminal rejected a user record write.
    #[error("Write rejected: {0}")]
    WriteRejected(String),

    /// Terminal failed to read a record back.
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// Low-level I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeviceError {
    /// Create a connection-refused error.
    pub fn refused(message: impl Into<String>) -> Self {
        Self::ConnectionRefused(message.into())
    }

    /// Create an enumeration-failed error.
    pub fn list_failed(message: impl Into<String>) -> Self {
        Self::ListFailed(message.into())
    }

    /// Create a write-rejected error.
    pub fn write_rejected(message: impl Into<String>) -> Self {
        Self::WriteRejected(message.into())
    }

    /// Create a read-failed error.
    pub fn read_failed(message: impl Into<String>) -> Self {
        Self::ReadFailed(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DeviceError::NotConnected.to_string(),
            "Not connected to terminal"
        );
        assert_eq!(
            DeviceError::ConnectionTimeout(5000).to_string(),
            "Connection timeout after 5000ms"
        );
        assert_eq!(
            DeviceError::refused("bad comm key").to_string(),
            "Connection refused: bad comm key"
        );
    }

    #[test]
    fn test_constructor_helpers() {
        assert!(matches!(
            DeviceError::list_failed("busy"),
            DeviceError::ListFailed(_)
        ));
        assert!(matches!(
            DeviceError::write_rejected("full"),
            DeviceError::WriteRejected(_)
        ));
        assert!(matches!(
            DeviceError::read_failed("timeout"),
            DeviceError::ReadFailed(_)
        ));
    }
}
