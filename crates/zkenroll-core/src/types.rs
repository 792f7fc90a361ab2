use crate::{
    Result,
    constants::{DEFAULT_GROUP_ID, DEFAULT_PRIVILEGE, MAX_UID, MIN_UID, NAME_LIMIT, NO_CARD},
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Device slot index for a stored user record (1-65534).
///
/// Distinct from [`UserId`]: the UID addresses a physical slot on the
/// terminal, while the user id is the external identifier stored inside
/// the record. Slot 0 is never assigned and 65535 is reserved by the
/// firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Uid(u16);

impl Uid {
    /// Create a new UID with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if the value is outside the valid
    /// slot range (1-65534).
    pub fn new(raw: u16) -> Result<Self> {
        if !(MIN_UID..=MAX_UID).contains(&raw) {
            return Err(Error::InvalidInput(format!(
                "UID must be {MIN_UID}-{MAX_UID}, got {raw}"
            )));
        }
        Ok(Uid(raw))
    }

    /// Get the raw slot value.
    #[must_use]
    pub fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Uid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let raw: u16 = s
            .trim()
            .parse()
            .map_err(|_| Error::InvalidInput(format!("Invalid UID: {s}")))?;
        Uid::new(raw)
    }
}

/// External identifier stored in a user record.
///
/// The terminal firmware accepts only numeric text in this field, so the
/// value is validated as digit-only at construction and never reaches the
/// transport layer otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Create a new user id with validation.
    ///
    /// Surrounding whitespace is stripped before validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if the trimmed value is empty or
    /// contains anything other than ASCII digits.
    pub fn new(raw: &str) -> Result<Self> {
        let value = raw.trim();
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidInput(format!(
                "user_id must contain only digits, got: {value}"
            )));
        }
        Ok(UserId(value.to_string()))
    }

    /// Get the user id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        UserId::new(s)
    }
}

/// Truncate a display name to the terminal's fixed name field.
///
/// Counts characters, not bytes, so multibyte names are never split
/// mid-character.
#[must_use]
pub fn truncate_name(name: &str) -> String {
    name.chars().take(NAME_LIMIT).collect()
}

/// One enrollable identity as stored on the terminal.
///
/// All field constraints are applied at construction: the name is
/// truncated to the hardware limit, the group and card fields carry the
/// enrollment-time defaults, and [`Uid`]/[`UserId`] are validated
/// newtypes. A `UserRecord` handed to a gateway is always safe to encode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Device slot this record occupies.
    pub uid: Uid,

    /// Display name, at most 24 characters.
    pub name: String,

    /// External identifier (digit-only text).
    pub user_id: UserId,

    /// Privilege level (0 = normal user).
    pub privilege: u8,

    /// Credential string; empty means "no password".
    pub password: String,

    /// Grouping value, fixed default at enrollment.
    pub group_id: String,

    /// Card-credential number; 0 means "no card assigned".
    pub card: u64,
}

impl UserRecord {
    /// Build a record with enrollment defaults.
    ///
    /// The name is truncated to [`NAME_LIMIT`] characters; privilege,
    /// password, group and card take their default values.
    #[must_use]
    pub fn new(uid: Uid, name: &str, user_id: UserId) -> Self {
        Self {
            uid,
            name: truncate_name(name),
            user_id,
            privilege: DEFAULT_PRIVILEGE,
            password: String::new(),
            group_id: DEFAULT_GROUP_ID.to_string(),
            card: NO_CARD,
        }
    }

    /// Set the privilege level.
    #[must_use]
    pub fn with_privilege(mut self, privilege: u8) -> Self {
        self.privilege = privilege;
        self
    }

    /// Set the credential string.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Whether the record carries a password credential.
    #[must_use]
    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", 1)]
    #[case("42", 42)]
    #[case("65534", 65534)]
    fn test_uid_valid(#[case] input: &str, #[case] expected: u16) {
        let uid: Uid = input.parse().unwrap();
        assert_eq!(uid.get(), expected);
        assert_eq!(uid.to_string(), expected.to_string());
    }

    #[rstest]
    #[case("0")] // below slot range
    #[case("65535")] // reserved
    #[case("70000")] // above u16
    #[case("abc")] // non-numeric
    fn test_uid_invalid(#[case] input: &str) {
        let result: Result<Uid> = input.parse();
        assert!(result.is_err());
    }

    #[rstest]
    #[case("12345", "12345")]
    #[case("  8872  ", "8872")]
    #[case("0", "0")]
    fn test_user_id_valid(#[case] input: &str, #[case] expected: &str) {
        let user_id = UserId::new(input).unwrap();
        assert_eq!(user_id.as_str(), expected);
    }

    #[rstest]
    #[case("12a")]
    #[case("")]
    #[case("   ")]
    #[case("12 34")]
    #[case("١٢٣")] // non-ASCII digits
    fn test_user_id_invalid(#[case] input: &str) {
        assert!(UserId::new(input).is_err());
    }

    #[test]
    fn test_truncate_name_counts_characters() {
        let name = "ação".repeat(10);
        let truncated = truncate_name(&name);
        assert_eq!(truncated.chars().count(), 24);
        // Must remain valid UTF-8 with no split characters
        assert!(truncated.ends_with('o') || truncated.ends_with('ã'));
    }

    #[test]
    fn test_truncate_name_short_untouched() {
        assert_eq!(truncate_name("John Doe"), "John Doe");
    }

    #[test]
    fn test_record_defaults() {
        let record = UserRecord::new(
            Uid::new(7).unwrap(),
            "Maria Souza",
            UserId::new("1001").unwrap(),
        );
        assert_eq!(record.uid.get(), 7);
        assert_eq!(record.name, "Maria Souza");
        assert_eq!(record.privilege, 0);
        assert_eq!(record.group_id, "1");
        assert_eq!(record.card, 0);
        assert!(!record.has_password());
    }

    #[test]
    fn test_record_builders() {
        let record = UserRecord::new(
            Uid::new(7).unwrap(),
            "Maria Souza",
            UserId::new("1001").unwrap(),
        )
        .with_privilege(14)
        .with_password("4321");
        assert_eq!(record.privilege, 14);
        assert_eq!(record.password, "4321");
        assert!(record.has_password());
    }

    #[test]
    fn test_record_name_truncated_on_build() {
        let record = UserRecord::new(
            Uid::new(1).unwrap(),
            "A name that is clearly longer than the device field",
            UserId::new("1").unwrap(),
        );
        assert_eq!(record.name.chars().count(), 24);
    }

    #[test]
    fn test_uid_serializes_as_number() {
        let uid = Uid::new(42).unwrap();
        assert_eq!(serde_json::to_string(&uid).unwrap(), "42");
    }

    #[test]
    fn test_user_id_serializes_as_string() {
        let user_id = UserId::new("1001").unwrap();
        assert_eq!(serde_json::to_string(&user_id).unwrap(), "\"1001\"");
    }
}
