//! Vector Major Opcodes.

/// Vector load (LV), shares the LOAD-FP major opcode.
pub const OP_VLOAD: u32 = 0b0000111;

/// Vector store (SV), shares the STORE-FP major opcode.
pub const OP_VSTORE: u32 = 0b0100111;

/// Vector arithmetic and configuration (OP-V).
pub const OP_V: u32 = 0b1010111;

/// Returns true if `opcode` selects the vector decode path.
#[inline]
pub const fn is_vector(opcode: u32) -> bool {
    matches!(opcode, OP_VLOAD | OP_VSTORE | OP_V)
}
