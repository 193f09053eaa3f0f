//! Single-Precision Floating-Point Encodings (F).
//!
//! Only the encodings are recorded: the mnemonics are known to the assembler
//! so that they fail with a precise "not implemented" error rather than as
//! unknown mnemonics. No floating-point instruction is executed.

/// Floating-point computational instructions.
pub const OP_FP: u32 = 0b1010011;

/// Round-to-nearest-even rounding mode (placed in `funct3`).
pub const RM_RNE: u32 = 0b000;

/// FADD.S.
pub const FADD_S: u32 = 0b0000000;
/// FSUB.S.
pub const FSUB_S: u32 = 0b0000100;
/// FMUL.S.
pub const FMUL_S: u32 = 0b0001000;
/// FDIV.S.
pub const FDIV_S: u32 = 0b0001100;
