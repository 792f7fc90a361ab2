use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Invocation errors
    #[error("{0}")]
    Usage(String),

    // Validation errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Device errors
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    // Allocation errors
    #[error("Maximum UID limit reached ({ceiling})")]
    CapacityExhausted { ceiling: u16 },
}

impl Error {
    /// Stable error kind identifier, surfaced as `error_type` in the
    /// result payload.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Usage(_) => "UsageError",
            Error::InvalidInput(_) => "InvalidInput",
            Error::ConnectionFailed(_) => "ConnectionFailed",
            Error::WriteFailed(_) => "WriteFailed",
            Error::CapacityExhausted { .. } => "CapacityExhausted",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(Error::Usage("u".into()).kind(), "UsageError");
        assert_eq!(Error::InvalidInput("i".into()).kind(), "InvalidInput");
        assert_eq!(
            Error::ConnectionFailed("c".into()).kind(),
            "ConnectionFailed"
        );
        assert_eq!(Error::WriteFailed("w".into()).kind(), "WriteFailed");
        assert_eq!(
            Error::CapacityExhausted { ceiling: 65535 }.kind(),
            "CapacityExhausted"
        );
    }

    #[test]
    fn test_capacity_display_includes_ceiling() {
        let error = Error::CapacityExhausted { ceiling: 65535 };
        assert_eq!(error.to_string(), "Maximum UID limit reached (65535)");
    }
}
