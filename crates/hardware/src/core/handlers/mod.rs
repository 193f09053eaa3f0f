//! Instruction Handlers.
//!
//! One function per instruction family, each a pure state transition on the
//! `Machine`. Handlers receive the operands already pulled out of the decoded
//! word together with the address of the instruction, so PC-relative targets
//! never depend on the fetch-time PC increment.

/// Scalar integer handlers (ALU, loads, stores, branches, jumps).
pub mod scalar;

/// Vector handlers (loads, stores, lane-wise arithmetic, configuration).
pub mod vector;

use crate::common::SimError;
use crate::core::machine::Machine;
use crate::isa::instruction::Decoded;

/// Signature shared by every instruction handler.
pub type Handler = fn(&mut Machine, Operands) -> Result<(), SimError>;

/// Operand fields handed to a handler.
///
/// Vector instructions map `vd`/`vreg` to `rd`, `vs1` to `rs1`, and `vs2` to
/// `rs2`. Fields an instruction does not have are zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Operands {
    /// Address of the instruction being executed.
    pub pc: u32,
    /// Destination register.
    pub rd: usize,
    /// First source register.
    pub rs1: usize,
    /// Second source register.
    pub rs2: usize,
    /// Sign-extended immediate (the raw 20-bit field for U-type).
    pub imm: i32,
}

impl Operands {
    /// Extracts the operands of `decoded`, executed at address `pc`.
    pub const fn from_decoded(pc: u32, decoded: &Decoded) -> Self {
        let (rd, rs1, rs2, imm) = match *decoded {
            Decoded::Register { rd, rs1, rs2, .. } => (rd, rs1, rs2, 0),
            Decoded::Immediate { rd, rs1, imm, .. } => (rd, rs1, 0, imm),
            Decoded::Store { rs1, rs2, imm, .. } | Decoded::Branch { rs1, rs2, imm, .. } => {
                (0, rs1, rs2, imm)
            }
            Decoded::Upper { rd, imm, .. } | Decoded::Jump { rd, imm } => (rd, 0, 0, imm),
            Decoded::VectorMemory { vreg, rs1, imm, .. } => (vreg, rs1, 0, imm),
            Decoded::VectorArith { vd, vs1, vs2, .. } => (vd, vs1, vs2, 0),
        };
        Self {
            pc,
            rd,
            rs1,
            rs2,
            imm,
        }
    }
}
