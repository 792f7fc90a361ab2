//! Caller input for one enrollment run.

use zkenroll_core::{Result, constants::RESERVED_UID, error::Error};
use zkenroll_device::DeviceConfig;

/// Everything the caller supplies for a single invocation.
///
/// The preferred UID and privilege arrive as raw text and are coerced
/// inside the workflow, so a malformed value surfaces as `InvalidInput`
/// in the structured outcome rather than as an invocation error.
/// Ephemeral; consumed once by the orchestrator and discarded.
#[derive(Debug, Clone)]
pub struct EnrollmentRequest {
    /// Terminal connection settings.
    pub device: DeviceConfig,

    /// Caller-preferred device slot, raw text.
    pub preferred_uid: String,

    /// Display name (truncated to the device limit during validation).
    pub name: String,

    /// External identifier, raw text (digits required).
    pub user_id: String,

    /// Privilege level, raw text; absent or empty means 0.
    pub privilege: Option<String>,

    /// User credential; absent means no password.
    pub password: Option<String>,
}

/// Parse the device communication key from its invocation form.
///
/// The terminal treats the literal `None` — or any non-numeric text — as
/// "no key configured", which maps to key 0.
#[must_use]
pub fn parse_comm_key(raw: &str) -> u32 {
    if raw == "None" || raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    raw.parse().unwrap_or(0)
}

/// Coerce the caller-preferred UID to a raw slot value.
///
/// Negative values clamp to 0 (the allocator never assigns below 1) and
/// values above the reserved ceiling clamp to it, where allocation fails
/// with `CapacityExhausted`.
///
/// # Errors
/// Returns `Error::InvalidInput` if the text is not a valid integer.
pub fn coerce_preferred_uid(raw: &str) -> Result<u16> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::InvalidInput(format!("preferred UID must be an integer, got: {raw}")))?;
    Ok(value.clamp(0, i64::from(RESERVED_UID)) as u16)
}

/// Coerce the optional privilege field, defaulting to 0.
///
/// # Errors
/// Returns `Error::InvalidInput` if a non-empty value is not a small
/// non-negative integer.
pub fn coerce_privilege(raw: Option<&str>) -> Result<u8> {
    match raw {
        None => Ok(0),
        Some(text) if text.trim().is_empty() => Ok(0),
        Some(text) => text
            .trim()
            .parse()
            .map_err(|_| Error::InvalidInput(format!("privilege must be 0-255, got: {text}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("None", 0)]
    #[case("", 0)]
    #[case("abc", 0)]
    #[case("0", 0)]
    #[case("12345", 12345)]
    #[case("99999999999999999999", 0)] // overflow treated as no key
    fn test_parse_comm_key(#[case] raw: &str, #[case] expected: u32) {
        assert_eq!(parse_comm_key(raw), expected);
    }

    #[rstest]
    #[case("1", 1)]
    #[case(" 42 ", 42)]
    #[case("-3", 0)] // clamped; allocator raises it to 1
    #[case("70000", 65535)] // clamped to the ceiling
    fn test_coerce_preferred_uid(#[case] raw: &str, #[case] expected: u16) {
        assert_eq!(coerce_preferred_uid(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("12a")]
    #[case("")]
    #[case("4.5")]
    fn test_coerce_preferred_uid_invalid(#[case] raw: &str) {
        assert!(coerce_preferred_uid(raw).is_err());
    }

    #[rstest]
    #[case(None, 0)]
    #[case(Some(""), 0)]
    #[case(Some("0"), 0)]
    #[case(Some("14"), 14)]
    fn test_coerce_privilege(#[case] raw: Option<&str>, #[case] expected: u8) {
        assert_eq!(coerce_privilege(raw).unwrap(), expected);
    }

    #[test]
    fn test_coerce_privilege_invalid() {
        assert!(coerce_privilege(Some("admin")).is_err());
        assert!(coerce_privilege(Some("-1")).is_err());
        assert!(coerce_privilege(Some("300")).is_err());
    }
}
