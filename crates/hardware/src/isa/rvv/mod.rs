//! Vector Extension (V), simplified.
//!
//! Vector loads/stores reuse the I-type layout with the vector register in the
//! `rd` slot. Vector arithmetic uses the OP-V layout:
//! `funct6 | vm | vs2 | vs1 | funct3 | vd | opcode`.

/// Vector function codes (funct3 operand categories).
pub mod funct3;

/// Vector arithmetic function codes (funct6).
pub mod funct6;

/// Vector major opcodes.
pub mod opcodes;
