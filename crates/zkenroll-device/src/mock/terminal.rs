//! Programmable in-memory terminal.
//!
//! The mock terminal keeps its user table in shared state so a
//! [`MockTerminalHandle`] can seed records, inject per-operation failures
//! and inspect call counters while a session is driven through the
//! [`Gateway`] trait.

use crate::{
    Result,
    config::DeviceConfig,
    error::DeviceError,
    traits::{DeviceSession, Gateway},
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use zkenroll_core::{Uid, UserRecord};

#[derive(Debug, Default)]
struct TerminalState {
    /// User table keyed by raw slot value.
    users: BTreeMap<u16, UserRecord>,

    /// Injected failures, one per operation.
    refuse_connect: Option<String>,
    fail_list: Option<String>,
    reject_write: Option<String>,
    fail_read: Option<String>,

    /// Accept writes without storing them (simulates a record that
    /// vanishes before read-back verification).
    swallow_writes: bool,

    /// Call counters for lifecycle assertions.
    connect_count: u32,
    disconnect_count: u32,
    write_count: u32,
}

/// Mock enrollment terminal.
///
/// Implements [`Gateway`] over an in-memory user table. Sessions opened
/// from the same terminal share state, so records written through one
/// session are visible to the next.
///
/// # Examples
///
/// ```
/// use zkenroll_device::{DeviceConfig, DeviceSession, Gateway};
/// use zkenroll_device::mock::MockTerminal;
/// use zkenroll_core::{Uid, UserId, UserRecord};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let (terminal, handle) = MockTerminal::new();
///
///     let mut session = terminal.connect(&DeviceConfig::default()).await?;
///     let record = UserRecord::new(Uid::new(1)?, "Ana", UserId::new("100")?);
///     session.write_user(&record).await?;
///     session.disconnect().await?;
///
///     assert_eq!(handle.user_count().await, 1);
///     assert_eq!(handle.disconnect_count().await, 1);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockTerminal {
    state: Arc<Mutex<TerminalState>>,
}

impl MockTerminal {
    /// Create a new mock terminal with an empty user table.
    ///
    /// Returns a tuple of (MockTerminal, MockTerminalHandle) where the
    /// handle seeds state, injects failures and reads counters.
    pub fn new() -> (Self, MockTerminalHandle) {
        let state = Arc::new(Mutex::new(TerminalState::default()));
        let terminal = Self {
            state: Arc::clone(&state),
        };
        let handle = MockTerminalHandle { state };
        (terminal, handle)
    }
}

impl Gateway for MockTerminal {
    type Session = MockSession;

    async fn connect(&self, config: &DeviceConfig) -> Result<MockSession> {
        let mut state = self.state.lock().await;
        if let Some(reason) = &state.refuse_connect {
            return Err(DeviceError::refused(reason.clone()));
        }
        state.connect_count += 1;
        debug!(endpoint = %config.endpoint(), "mock terminal session opened");
        Ok(MockSession {
            state: Arc::clone(&self.state),
            open: true,
        })
    }
}

/// Session over the mock terminal's shared state.
#[derive(Debug)]
pub struct MockSession {
    state: Arc<Mutex<TerminalState>>,
    open: bool,
}

impl DeviceSession for MockSession {
    async fn list_users(&mut self) -> Result<Vec<UserRecord>> {
        if !self.open {
            return Err(DeviceError::NotConnected);
        }
        let state = self.state.lock().await;
        if let Some(reason) = &state.fail_list {
            return Err(DeviceError::list_failed(reason.clone()));
        }
        Ok(state.users.values().cloned().collect())
    }

    async fn write_user(&mut self, record: &UserRecord) -> Result<()> {
        if !self.open {
            return Err(DeviceError::NotConnected);
        }
        let mut state = self.state.lock().await;
        if let Some(reason) = &state.reject_write {
            return Err(DeviceError::write_rejected(reason.clone()));
        }
        state.write_count += 1;
        if !state.swallow_writes {
            state.users.insert(record.uid.get(), record.clone());
        }
        debug!(uid = %record.uid, "mock terminal stored user record");
        Ok(())
    }

    async fn read_user(&mut self, uid: Uid) -> Result<Option<UserRecord>> {
        if !self.open {
            return Err(DeviceError::NotConnected);
        }
        let state = self.state.lock().await;
        if let Some(reason) = &state.fail_read {
            return Err(DeviceError::read_failed(reason.clone()));
        }
        Ok(state.users.get(&uid.get()).cloned())
    }

    async fn disconnect(&mut self) -> Result<()> {
        let mut state = self.state.lock().await;
        state.disconnect_count += 1;
        if !self.open {
            return Err(DeviceError::NotConnected);
        }
        self.open = false;
        debug!("mock terminal session closed");
        Ok(())
    }
}

/// Handle for controlling and inspecting a [`MockTerminal`].
///
/// Cloneable; all methods are async because state is shared with live
/// sessions.
#[derive(Debug, Clone)]
pub struct MockTerminalHandle {
    state: Arc<Mutex<TerminalState>>,
}

impl MockTerminalHandle {
    /// Seed a user record into the terminal's table.
    pub async fn seed_user(&self, record: UserRecord) {
        let mut state = self.state.lock().await;
        state.users.insert(record.uid.get(), record);
    }

    /// Refuse all subsequent connection attempts with `reason`.
    pub async fn refuse_connect(&self, reason: impl Into<String>) {
        self.state.lock().await.refuse_connect = Some(reason.into());
    }

    /// Fail all subsequent `list_users` calls with `reason`.
    pub async fn fail_list_users(&self, reason: impl Into<String>) {
        self.state.lock().await.fail_list = Some(reason.into());
    }

    /// Reject all subsequent `write_user` calls with `reason`.
    pub async fn reject_writes(&self, reason: impl Into<String>) {
        self.state.lock().await.reject_write = Some(reason.into());
    }

    /// Fail all subsequent `read_user` calls with `reason`.
    pub async fn fail_read_back(&self, reason: impl Into<String>) {
        self.state.lock().await.fail_read = Some(reason.into());
    }

    /// Accept writes without storing them, so read-back finds nothing.
    pub async fn swallow_writes(&self) {
        self.state.lock().await.swallow_writes = true;
    }

    /// Get the record stored at `uid`, if any.
    pub async fn user(&self, uid: u16) -> Option<UserRecord> {
        self.state.lock().await.users.get(&uid).cloned()
    }

    /// Number of records currently stored.
    pub async fn user_count(&self) -> usize {
        self.state.lock().await.users.len()
    }

    /// Raw slot values currently occupied, in ascending order.
    pub async fn stored_uids(&self) -> Vec<u16> {
        self.state.lock().await.users.keys().copied().collect()
    }

    /// Number of sessions opened so far.
    pub async fn connect_count(&self) -> u32 {
        self.state.lock().await.connect_count
    }

    /// Number of `disconnect` calls so far.
    pub async fn disconnect_count(&self) -> u32 {
        self.state.lock().await.disconnect_count
    }

    /// Number of accepted `write_user` calls so far.
    pub async fn write_count(&self) -> u32 {
        self.state.lock().await.write_count
    }
}
