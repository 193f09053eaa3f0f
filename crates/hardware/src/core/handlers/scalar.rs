//! Scalar Integer Handlers.
//!
//! State transitions for the integer instructions. All arithmetic wraps at
//! 32 bits and writes to `x0` are discarded by the register file.

use crate::common::{INSTRUCTION_SIZE, SimError};
use crate::core::handlers::Operands;
use crate::core::machine::Machine;
use crate::core::units::alu::{Alu, AluOp};

/// Immediate bit selecting SRAI over SRLI (bit 30 of the instruction).
const SRA_IMM_BIT: i32 = 0x400;

/// Comparison performed by a conditional branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Less than, signed.
    Lt,
    /// Greater than or equal, signed.
    Ge,
    /// Less than, unsigned.
    Ltu,
    /// Greater than or equal, unsigned.
    Geu,
}

impl Condition {
    /// Evaluates the comparison on two register values.
    pub const fn holds(self, a: u32, b: u32) -> bool {
        match self {
            Self::Eq => a == b,
            Self::Ne => a != b,
            Self::Lt => (a as i32) < (b as i32),
            Self::Ge => (a as i32) >= (b as i32),
            Self::Ltu => a < b,
            Self::Geu => a >= b,
        }
    }
}

/// `rd = rs1 op rs2`.
pub fn alu_reg(m: &mut Machine, o: Operands, op: AluOp) -> Result<(), SimError> {
    let result = Alu::execute(op, m.regs.read(o.rs1), m.regs.read(o.rs2));
    m.regs.write(o.rd, result);
    Ok(())
}

/// `rd = rs1 op imm`.
pub fn alu_imm(m: &mut Machine, o: Operands, op: AluOp) -> Result<(), SimError> {
    let result = Alu::execute(op, m.regs.read(o.rs1), o.imm as u32);
    m.regs.write(o.rd, result);
    Ok(())
}

/// SRLI and SRAI share one dispatch key; immediate bit 10 selects SRAI.
pub fn shift_right_imm(m: &mut Machine, o: Operands) -> Result<(), SimError> {
    let op = if o.imm & SRA_IMM_BIT == 0 {
        AluOp::Srl
    } else {
        AluOp::Sra
    };
    alu_imm(m, o, op)
}

const fn effective_address(base: u32, imm: i32) -> u64 {
    base.wrapping_add(imm as u32) as u64
}

/// Loads `width` bytes from `rs1 + imm`, sign- or zero-extending into `rd`.
pub fn load(m: &mut Machine, o: Operands, width: usize, signed: bool) -> Result<(), SimError> {
    let addr = effective_address(m.regs.read(o.rs1), o.imm);
    let raw = m.memory.read(addr, width)?;
    let value = match (width, signed) {
        (1, true) => raw as u8 as i8 as i32 as u32,
        (2, true) => raw as u16 as i16 as i32 as u32,
        _ => raw as u32,
    };
    m.regs.write(o.rd, value);
    Ok(())
}

/// Stores the low `width` bytes of `rs2` to `rs1 + imm`.
pub fn store(m: &mut Machine, o: Operands, width: usize) -> Result<(), SimError> {
    let addr = effective_address(m.regs.read(o.rs1), o.imm);
    m.memory.write(addr, width, u64::from(m.regs.read(o.rs2)))
}

/// Redirects to `pc + imm` when the condition holds.
pub fn branch(m: &mut Machine, o: Operands, cond: Condition) -> Result<(), SimError> {
    if cond.holds(m.regs.read(o.rs1), m.regs.read(o.rs2)) {
        m.pc = o.pc.wrapping_add(o.imm as u32);
    }
    Ok(())
}

/// JAL: link the next address and jump relative to this instruction.
pub fn jal(m: &mut Machine, o: Operands) -> Result<(), SimError> {
    m.regs.write(o.rd, o.pc.wrapping_add(INSTRUCTION_SIZE));
    m.pc = o.pc.wrapping_add(o.imm as u32);
    Ok(())
}

/// JALR: jump to `(rs1 + imm) & !1`. `rs1` is read before `rd` is written.
pub fn jalr(m: &mut Machine, o: Operands) -> Result<(), SimError> {
    let target = m.regs.read(o.rs1).wrapping_add(o.imm as u32) & !1;
    m.regs.write(o.rd, o.pc.wrapping_add(INSTRUCTION_SIZE));
    m.pc = target;
    Ok(())
}

/// LUI: `rd = imm << 12`.
pub fn lui(m: &mut Machine, o: Operands) -> Result<(), SimError> {
    m.regs.write(o.rd, (o.imm as u32) << 12);
    Ok(())
}

/// AUIPC: `rd = pc + (imm << 12)`.
pub fn auipc(m: &mut Machine, o: Operands) -> Result<(), SimError> {
    m.regs.write(o.rd, o.pc.wrapping_add((o.imm as u32) << 12));
    Ok(())
}
