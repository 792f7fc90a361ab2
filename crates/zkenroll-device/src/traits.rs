//! Gateway trait definitions.
//!
//! These traits establish the contract between the enrollment workflow and
//! the terminal transport, enabling substitution between the in-memory
//! mock and real vendor protocol implementations.
//!
//! All traits use native `async fn` methods (Rust 1.90 + Edition 2024
//! RPITIT), eliminating the need for the `async_trait` macro.

use crate::config::DeviceConfig;
use crate::error::Result;
use zkenroll_core::{Uid, UserRecord};

/// Factory for terminal sessions.
///
/// A gateway knows how to reach one kind of terminal. `connect` opens a
/// session using the endpoint, timeout and communication key from the
/// config; the session must later be released with
/// [`DeviceSession::disconnect`].
pub trait Gateway: Send + Sync {
    /// Session type produced by this gateway.
    type Session: DeviceSession;

    /// Open a session to the terminal.
    ///
    /// # Errors
    ///
    /// Returns a [`DeviceError`](crate::DeviceError) if the terminal is
    /// unreachable, refuses the communication key, or the attempt times
    /// out. Connection failures are not retried here; the caller decides
    /// whether a run is abandoned.
    async fn connect(&self, config: &DeviceConfig) -> Result<Self::Session>;
}

/// One open session to a terminal.
///
/// Operations are serial; a session is the exclusively-held resource of a
/// single enrollment run and is released exactly once via `disconnect`.
pub trait DeviceSession: Send {
    /// Enumerate the user records currently stored on the device.
    async fn list_users(&mut self) -> Result<Vec<UserRecord>>;

    /// Write a user record to the device, overwriting the slot if the
    /// terminal already holds a record at that UID.
    async fn write_user(&mut self, record: &UserRecord) -> Result<()>;

    /// Read the record stored at `uid`, or `None` if the slot is empty.
    async fn read_user(&mut self, uid: Uid) -> Result<Option<UserRecord>>;

    /// Close the session.
    ///
    /// Must be called on every path once a session was opened, so the
    /// terminal is never left holding an orphaned session.
    async fn disconnect(&mut self) -> Result<()>;
}
