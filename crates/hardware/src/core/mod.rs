//! Core machine implementation.
//!
//! This module contains the architectural state, the dispatch table, the
//! instruction handlers, and the execution loop that ties them together.

/// Architectural register files (integer, float, vector).
pub mod arch;

/// Opcode/funct keyed dispatch table.
pub mod dispatch;

/// Per-instruction state transitions.
pub mod handlers;

/// Machine state, loading, and the run loop.
pub mod machine;

/// Flat byte-addressed memory.
pub mod memory;

/// Execution units (ALU).
pub mod units;

pub use self::machine::{Machine, RunStatus};
