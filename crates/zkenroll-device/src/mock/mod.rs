//! Mock terminal implementation for testing and development.
//!
//! This module provides a simulated enrollment terminal that can be
//! controlled programmatically without requiring physical hardware.

pub mod terminal;

// Re-export commonly used types
pub use terminal::{MockSession, MockTerminal, MockTerminalHandle};
