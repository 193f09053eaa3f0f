//! Integer Multiplication and Division Extension (M).
//!
//! Shares the `OP_REG` major opcode with the base set; distinguished by
//! `funct7 = MULDIV`.

/// Function code 3 definitions for multiply/divide operations.
pub mod funct3;

/// `funct7` value selecting the multiply/divide group.
pub const MULDIV: u32 = 0b0000001;
