//! Instruction Metadata Table.
//!
//! The single source of truth mapping each mnemonic to its encoding fields
//! and operand format. The assembler selects its packing routine from the
//! `format` column, so adding a mnemonic of an existing format is a one-line
//! change here. The disassembler uses the same table in reverse.

use std::fmt;

use crate::isa::instruction::Decoded;
use crate::isa::rv32f;
use crate::isa::rv32i::{funct3 as i_f3, funct7 as i_f7, opcodes as i_op};
use crate::isa::rv32m::{self, funct3 as m_f3};
use crate::isa::rvv::{funct3 as v_f3, funct6 as v_f6, opcodes as v_op};

/// Operand format of an instruction, selecting how it is encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// `rd, rs1, rs2`.
    R,
    /// `rd, rs1, imm` with a 12-bit immediate.
    I,
    /// `rd, rs1, shamt`; `funct7` is folded into the immediate.
    Shift,
    /// `rd, offset(base)` (also `rd, rs1, imm`).
    Load,
    /// `rs2, offset(base)`.
    S,
    /// `rs1, rs2, label|offset`.
    B,
    /// `rd, imm20`.
    U,
    /// `rd, label|offset`.
    J,
    /// `vreg, offset(base)`.
    VMem,
    /// `vd, vs2, vs1`.
    VArith,
    /// `rd, rs1` vector configuration.
    VConfig,
    /// Floating-point arithmetic; recognised but not encodable.
    Fp,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::R => "R",
            Self::I => "I",
            Self::Shift => "shift",
            Self::Load => "load",
            Self::S => "S",
            Self::B => "B",
            Self::U => "U",
            Self::J => "J",
            Self::VMem => "vector memory",
            Self::VArith => "vector arithmetic",
            Self::VConfig => "vector configuration",
            Self::Fp => "floating-point",
        };
        f.write_str(name)
    }
}

/// Function code beyond `funct3` that identifies an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FunctCode {
    /// No further function code.
    None,
    /// A 7-bit function code (R-type, shifts, floating point).
    Funct7(u32),
    /// A 6-bit vector function code.
    Funct6(u32),
}

/// One row of the metadata table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstructionInfo {
    /// Upper-case mnemonic as written in source.
    pub mnemonic: &'static str,
    /// Major opcode.
    pub opcode: u32,
    /// Minor opcode; ignored for U and J formats.
    pub funct3: u32,
    /// Additional function code.
    pub funct: FunctCode,
    /// Operand format.
    pub format: Format,
}

impl InstructionInfo {
    /// Returns the `funct7` value, or zero when the row has none.
    pub const fn funct7(&self) -> u32 {
        match self.funct {
            FunctCode::Funct7(v) => v,
            FunctCode::None | FunctCode::Funct6(_) => 0,
        }
    }

    /// Returns the `funct6` value, or zero when the row has none.
    pub const fn funct6(&self) -> u32 {
        match self.funct {
            FunctCode::Funct6(v) => v,
            FunctCode::None | FunctCode::Funct7(_) => 0,
        }
    }
}

const fn row(mnemonic: &'static str, opcode: u32, funct3: u32, funct: FunctCode, format: Format) -> InstructionInfo {
    InstructionInfo {
        mnemonic,
        opcode,
        funct3,
        funct,
        format,
    }
}

const fn r(mnemonic: &'static str, funct3: u32, funct7: u32) -> InstructionInfo {
    row(mnemonic, i_op::OP_REG, funct3, FunctCode::Funct7(funct7), Format::R)
}

const fn v(mnemonic: &'static str, funct3: u32, funct6: u32) -> InstructionInfo {
    row(mnemonic, v_op::OP_V, funct3, FunctCode::Funct6(funct6), Format::VArith)
}

const fn fp(mnemonic: &'static str, funct7: u32) -> InstructionInfo {
    row(mnemonic, rv32f::OP_FP, rv32f::RM_RNE, FunctCode::Funct7(funct7), Format::Fp)
}

/// Every mnemonic the assembler knows.
pub static INSTRUCTIONS: &[InstructionInfo] = &[
    // Register-register
    r("ADD", i_f3::ADD_SUB, i_f7::DEFAULT),
    r("SUB", i_f3::ADD_SUB, i_f7::SUB),
    r("SLL", i_f3::SLL, i_f7::DEFAULT),
    r("SLT", i_f3::SLT, i_f7::DEFAULT),
    r("SLTU", i_f3::SLTU, i_f7::DEFAULT),
    r("XOR", i_f3::XOR, i_f7::DEFAULT),
    r("SRL", i_f3::SRL_SRA, i_f7::DEFAULT),
    r("SRA", i_f3::SRL_SRA, i_f7::SRA),
    r("OR", i_f3::OR, i_f7::DEFAULT),
    r("AND", i_f3::AND, i_f7::DEFAULT),
    // Multiply / divide
    r("MUL", m_f3::MUL, rv32m::MULDIV),
    r("MULH", m_f3::MULH, rv32m::MULDIV),
    r("MULHSU", m_f3::MULHSU, rv32m::MULDIV),
    r("MULHU", m_f3::MULHU, rv32m::MULDIV),
    r("DIV", m_f3::DIV, rv32m::MULDIV),
    r("DIVU", m_f3::DIVU, rv32m::MULDIV),
    r("REM", m_f3::REM, rv32m::MULDIV),
    r("REMU", m_f3::REMU, rv32m::MULDIV),
    // Register-immediate
    row("ADDI", i_op::OP_IMM, i_f3::ADD_SUB, FunctCode::None, Format::I),
    row("SLTI", i_op::OP_IMM, i_f3::SLT, FunctCode::None, Format::I),
    row("SLTIU", i_op::OP_IMM, i_f3::SLTU, FunctCode::None, Format::I),
    row("XORI", i_op::OP_IMM, i_f3::XOR, FunctCode::None, Format::I),
    row("ORI", i_op::OP_IMM, i_f3::OR, FunctCode::None, Format::I),
    row("ANDI", i_op::OP_IMM, i_f3::AND, FunctCode::None, Format::I),
    row("SLLI", i_op::OP_IMM, i_f3::SLL, FunctCode::Funct7(i_f7::DEFAULT), Format::Shift),
    row("SRLI", i_op::OP_IMM, i_f3::SRL_SRA, FunctCode::Funct7(i_f7::DEFAULT), Format::Shift),
    row("SRAI", i_op::OP_IMM, i_f3::SRL_SRA, FunctCode::Funct7(i_f7::SRA), Format::Shift),
    // Loads and JALR
    row("LB", i_op::OP_LOAD, i_f3::LB, FunctCode::None, Format::Load),
    row("LH", i_op::OP_LOAD, i_f3::LH, FunctCode::None, Format::Load),
    row("LW", i_op::OP_LOAD, i_f3::LW, FunctCode::None, Format::Load),
    row("LBU", i_op::OP_LOAD, i_f3::LBU, FunctCode::None, Format::Load),
    row("LHU", i_op::OP_LOAD, i_f3::LHU, FunctCode::None, Format::Load),
    row("JALR", i_op::OP_JALR, i_f3::JALR, FunctCode::None, Format::Load),
    // Stores
    row("SB", i_op::OP_STORE, i_f3::SB, FunctCode::None, Format::S),
    row("SH", i_op::OP_STORE, i_f3::SH, FunctCode::None, Format::S),
    row("SW", i_op::OP_STORE, i_f3::SW, FunctCode::None, Format::S),
    // Branches
    row("BEQ", i_op::OP_BRANCH, i_f3::BEQ, FunctCode::None, Format::B),
    row("BNE", i_op::OP_BRANCH, i_f3::BNE, FunctCode::None, Format::B),
    row("BLT", i_op::OP_BRANCH, i_f3::BLT, FunctCode::None, Format::B),
    row("BGE", i_op::OP_BRANCH, i_f3::BGE, FunctCode::None, Format::B),
    row("BLTU", i_op::OP_BRANCH, i_f3::BLTU, FunctCode::None, Format::B),
    row("BGEU", i_op::OP_BRANCH, i_f3::BGEU, FunctCode::None, Format::B),
    // Upper immediates and jumps
    row("LUI", i_op::OP_LUI, 0, FunctCode::None, Format::U),
    row("AUIPC", i_op::OP_AUIPC, 0, FunctCode::None, Format::U),
    row("JAL", i_op::OP_JAL, 0, FunctCode::None, Format::J),
    // Vector
    row("LV", v_op::OP_VLOAD, v_f3::VMEM_UNIT, FunctCode::None, Format::VMem),
    row("SV", v_op::OP_VSTORE, v_f3::VMEM_UNIT, FunctCode::None, Format::VMem),
    v("VADD.VV", v_f3::OPIVV, v_f6::VADD),
    v("VSUB.VV", v_f3::OPIVV, v_f6::VSUB),
    v("VAND.VV", v_f3::OPIVV, v_f6::VAND),
    v("VOR.VV", v_f3::OPIVV, v_f6::VOR),
    v("VXOR.VV", v_f3::OPIVV, v_f6::VXOR),
    v("VMUL.VV", v_f3::OPMVV, v_f6::VMUL),
    row("VSETVL", v_op::OP_V, v_f3::OPCFG, FunctCode::None, Format::VConfig),
    // Floating point
    fp("FADD.S", rv32f::FADD_S),
    fp("FSUB.S", rv32f::FSUB_S),
    fp("FMUL.S", rv32f::FMUL_S),
    fp("FDIV.S", rv32f::FDIV_S),
];

/// Looks up a mnemonic, ignoring ASCII case.
pub fn lookup(mnemonic: &str) -> Option<&'static InstructionInfo> {
    INSTRUCTIONS
        .iter()
        .find(|info| info.mnemonic.eq_ignore_ascii_case(mnemonic))
}

/// Finds the table row a decoded instruction was encoded from.
///
/// Returns `None` for words no mnemonic produces.
pub fn identify(decoded: &Decoded) -> Option<&'static InstructionInfo> {
    let opcode = decoded.opcode();
    INSTRUCTIONS
        .iter()
        .filter(|info| info.opcode == opcode)
        .find(|info| matches_row(info, decoded))
}

fn matches_row(info: &InstructionInfo, decoded: &Decoded) -> bool {
    match (info.format, *decoded) {
        (Format::R, Decoded::Register { funct3, funct7, .. }) => {
            info.funct3 == funct3 && info.funct7() == funct7
        }
        (Format::Shift, Decoded::Immediate { funct3, imm, .. }) => {
            info.funct3 == funct3 && info.funct7() == ((imm as u32) >> 5) & 0x7F
        }
        (Format::I | Format::Load, Decoded::Immediate { funct3, .. })
        | (Format::S, Decoded::Store { funct3, .. })
        | (Format::B, Decoded::Branch { funct3, .. })
        | (Format::VMem, Decoded::VectorMemory { funct3, .. }) => info.funct3 == funct3,
        (Format::U, Decoded::Upper { .. }) | (Format::J, Decoded::Jump { .. }) => true,
        (Format::VArith, Decoded::VectorArith { funct3, funct6, .. }) => {
            info.funct3 == funct3 && info.funct6() == funct6
        }
        (Format::VConfig, Decoded::VectorArith { funct3, .. }) => info.funct3 == funct3,
        (Format::Fp, Decoded::Immediate { imm, .. }) => info.funct7() == ((imm as u32) >> 5) & 0x7F,
        _ => false,
    }
}
