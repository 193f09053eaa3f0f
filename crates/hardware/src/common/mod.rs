//! Common types and constants shared across the assembler and the simulator.
//!
//! This module provides:
//! 1. **Constants:** Instruction width, register file sizes, data-word width.
//! 2. **Error Handling:** Assembly, simulation, and configuration error enums.

/// Architecture-wide constants.
pub mod constants;

/// Error types for assembly, simulation, and configuration.
pub mod error;

pub use constants::{INSTRUCTION_SIZE, NUM_FPRS, NUM_GPRS, NUM_VREGS};
pub use error::{AsmError, ConfigError, SimError};
