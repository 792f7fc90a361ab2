//! Core constants for terminal user provisioning.
//!
//! These values are dictated by the terminal firmware: the addressable slot
//! space, the display-name hardware limit, and the defaults applied to a
//! record at enrollment time. Modifying them may produce records the device
//! refuses or silently truncates.

// ============================================================================
// Device Slot Space (UID)
// ============================================================================

/// Lowest assignable device slot.
///
/// Slot 0 is never allocated; an empty device starts at 1.
pub const MIN_UID: u16 = 1;

/// Highest assignable device slot.
///
/// # Value: 65534
pub const MAX_UID: u16 = 65534;

/// Reserved slot value, invalid for user records.
///
/// The allocator fails with `CapacityExhausted` once the only free values
/// are at or above this ceiling.
///
/// # Value: 65535
pub const RESERVED_UID: u16 = 65535;

// ============================================================================
// Record Field Limits
// ============================================================================

/// Maximum display-name length in characters.
///
/// The terminal stores names in a fixed 24-character field; longer names
/// are truncated before transmission so the device never sees an oversized
/// value.
///
/// # Value: 24 characters
pub const NAME_LIMIT: usize = 24;

/// Default grouping value assigned to every enrolled record.
pub const DEFAULT_GROUP_ID: &str = "1";

/// Privilege level of a normal (non-administrator) user.
pub const DEFAULT_PRIVILEGE: u8 = 0;

/// Card-credential value meaning "no card assigned at enrollment time".
pub const NO_CARD: u64 = 0;

// ============================================================================
// Connection Defaults
// ============================================================================

/// Default TCP port the terminal listens on.
///
/// # Value: 4370
pub const DEFAULT_PORT: u16 = 4370;

/// Default I/O timeout in seconds for connect, read and write operations.
///
/// # Value: 5 seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
