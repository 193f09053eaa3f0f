//! Vector `funct3` Codes.

/// Unit-stride vector memory access; element width comes from SEW.
pub const VMEM_UNIT: u32 = 0b111;

/// Integer vector-vector operations.
pub const OPIVV: u32 = 0b000;
/// Multiply-class vector-vector operations.
pub const OPMVV: u32 = 0b010;
/// Vector configuration (VSETVL).
pub const OPCFG: u32 = 0b111;
