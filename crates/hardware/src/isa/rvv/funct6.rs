//! Vector Arithmetic Function Codes (funct6, bits 31-26).

/// VADD.VV (OPIVV).
pub const VADD: u32 = 0b000000;
/// VSUB.VV (OPIVV).
pub const VSUB: u32 = 0b000010;
/// VAND.VV (OPIVV).
pub const VAND: u32 = 0b001001;
/// VOR.VV (OPIVV).
pub const VOR: u32 = 0b001010;
/// VXOR.VV (OPIVV).
pub const VXOR: u32 = 0b001011;
/// VMUL.VV (OPMVV).
pub const VMUL: u32 = 0b100101;
