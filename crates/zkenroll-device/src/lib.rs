//! Device gateway abstraction for networked enrollment terminals.
//!
//! This crate defines the seam between the enrollment workflow and the
//! terminal's vendor protocol. The wire protocol itself is an external
//! collaborator and is deliberately not implemented here: a transport
//! (vendor SDK binding, protocol codec, or the in-memory mock below)
//! plugs in by implementing [`Gateway`] and [`DeviceSession`].
//!
//! # Design Philosophy
//!
//! - **Async-first**: all I/O operations are asynchronous using native
//!   `async fn` in traits (Rust 1.90 + Edition 2024 RPITIT).
//! - **One session per run**: a [`Gateway`] opens exactly one
//!   [`DeviceSession`]; the session is used serially and closed once.
//! - **Error-aware**: every operation returns [`Result<T>`][error::Result]
//!   with a [`DeviceError`] describing the failure.
//!
//! # Mock Terminal
//!
//! [`mock::MockTerminal`] is a programmable in-memory terminal for
//! development and testing: it holds a seedable user table, supports
//! failure injection per operation, and exposes call counters through
//! [`mock::MockTerminalHandle`] so tests can assert session lifecycle
//! invariants without physical hardware.

#![allow(async_fn_in_trait)]

pub mod config;
pub mod error;
pub mod mock;
pub mod traits;

// Re-export commonly used types for convenience
pub use config::DeviceConfig;
pub use error::{DeviceError, Result};
pub use traits::{DeviceSession, Gateway};
