//! Global Architecture Constants.
//!
//! This module defines constants used by both the assembler and the machine:
//! 1. **Instruction Constants:** Instruction width.
//! 2. **Register Files:** Sizes of the integer, float, and vector register files.
//! 3. **Data Loading:** Width of one value in a bulk-loaded data vector.

/// Size of an instruction in bytes; the PC advances by this on every fetch.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Number of general-purpose (integer) registers. `x0` is hardwired to zero.
pub const NUM_GPRS: usize = 16;

/// Number of floating-point registers (reserved; no instruction writes them).
pub const NUM_FPRS: usize = 16;

/// Number of vector registers.
pub const NUM_VREGS: usize = 16;

/// Bytes occupied by each value of a bulk-loaded data vector.
pub const DATA_VALUE_BYTES: usize = 8;
