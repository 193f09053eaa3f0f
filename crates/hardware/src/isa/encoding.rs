//! Instruction Encoding.
//!
//! Bit packers for every instruction layout, the inverse of `isa::decode`.
//! Callers are expected to have range-checked register indices and
//! immediates; fields are masked to their width here.

use crate::isa::instruction::{Decoded, FUNCT3_MASK, FUNCT6_MASK, FUNCT7_MASK, OPCODE_MASK, REG_MASK};
use crate::isa::rv32i::opcodes;
use crate::isa::rvv::opcodes as v_opcodes;

/// Mask for a 12-bit immediate field.
const IMM12_MASK: u32 = 0xFFF;

/// Mask for the 20-bit U-type immediate field.
const IMM20_MASK: u32 = 0xF_FFFF;

#[inline]
const fn reg(index: usize) -> u32 {
    (index as u32) & REG_MASK
}

/// Packs an R-type instruction.
pub const fn r_type(opcode: u32, rd: usize, funct3: u32, rs1: usize, rs2: usize, funct7: u32) -> u32 {
    ((funct7 & FUNCT7_MASK) << 25)
        | (reg(rs2) << 20)
        | (reg(rs1) << 15)
        | ((funct3 & FUNCT3_MASK) << 12)
        | (reg(rd) << 7)
        | (opcode & OPCODE_MASK)
}

/// Packs an I-type instruction. The immediate is truncated to 12 bits.
pub const fn i_type(opcode: u32, rd: usize, funct3: u32, rs1: usize, imm: i32) -> u32 {
    (((imm as u32) & IMM12_MASK) << 20)
        | (reg(rs1) << 15)
        | ((funct3 & FUNCT3_MASK) << 12)
        | (reg(rd) << 7)
        | (opcode & OPCODE_MASK)
}

/// Packs an S-type instruction.
pub const fn s_type(opcode: u32, funct3: u32, rs1: usize, rs2: usize, imm: i32) -> u32 {
    let imm = (imm as u32) & IMM12_MASK;
    ((imm >> 5) << 25)
        | (reg(rs2) << 20)
        | (reg(rs1) << 15)
        | ((funct3 & FUNCT3_MASK) << 12)
        | ((imm & 0x1F) << 7)
        | (opcode & OPCODE_MASK)
}

/// Packs a B-type instruction. `imm` is the byte offset; bit 0 is dropped.
pub const fn b_type(opcode: u32, funct3: u32, rs1: usize, rs2: usize, imm: i32) -> u32 {
    let imm = imm as u32;
    (((imm >> 12) & 1) << 31)
        | (((imm >> 5) & 0x3F) << 25)
        | (reg(rs2) << 20)
        | (reg(rs1) << 15)
        | ((funct3 & FUNCT3_MASK) << 12)
        | (((imm >> 1) & 0xF) << 8)
        | (((imm >> 11) & 1) << 7)
        | (opcode & OPCODE_MASK)
}

/// Packs a U-type instruction. `imm` is the 20-bit upper field, unshifted.
pub const fn u_type(opcode: u32, rd: usize, imm: i32) -> u32 {
    (((imm as u32) & IMM20_MASK) << 12) | (reg(rd) << 7) | (opcode & OPCODE_MASK)
}

/// Packs a J-type instruction. `imm` is the byte offset; bit 0 is dropped.
pub const fn j_type(opcode: u32, rd: usize, imm: i32) -> u32 {
    let imm = imm as u32;
    (((imm >> 20) & 1) << 31)
        | (((imm >> 1) & 0x3FF) << 21)
        | (((imm >> 11) & 1) << 20)
        | (((imm >> 12) & 0xFF) << 12)
        | (reg(rd) << 7)
        | (opcode & OPCODE_MASK)
}

/// Packs an OP-V instruction.
pub const fn v_type(opcode: u32, vd: usize, funct3: u32, vs1: usize, vs2: usize, funct6: u32, vm: bool) -> u32 {
    ((funct6 & FUNCT6_MASK) << 26)
        | ((vm as u32) << 25)
        | (reg(vs2) << 20)
        | (reg(vs1) << 15)
        | ((funct3 & FUNCT3_MASK) << 12)
        | (reg(vd) << 7)
        | (opcode & OPCODE_MASK)
}

/// Re-encodes a decoded instruction.
///
/// Every bit of a word lands in some decoded field, so
/// `encode(&decode(w)) == w` for all `w`.
pub const fn encode(decoded: &Decoded) -> u32 {
    match *decoded {
        Decoded::Register {
            opcode,
            rd,
            rs1,
            rs2,
            funct3,
            funct7,
        } => r_type(opcode, rd, funct3, rs1, rs2, funct7),
        Decoded::Immediate {
            opcode,
            rd,
            rs1,
            funct3,
            imm,
        } => i_type(opcode, rd, funct3, rs1, imm),
        Decoded::Store {
            rs1,
            rs2,
            funct3,
            imm,
        } => s_type(opcodes::OP_STORE, funct3, rs1, rs2, imm),
        Decoded::Branch {
            rs1,
            rs2,
            funct3,
            imm,
        } => b_type(opcodes::OP_BRANCH, funct3, rs1, rs2, imm),
        Decoded::Upper { opcode, rd, imm } => u_type(opcode, rd, imm),
        Decoded::Jump { rd, imm } => j_type(opcodes::OP_JAL, rd, imm),
        Decoded::VectorMemory {
            opcode,
            vreg,
            rs1,
            funct3,
            imm,
        } => i_type(opcode, vreg, funct3, rs1, imm),
        Decoded::VectorArith {
            vd,
            vs1,
            vs2,
            funct3,
            funct6,
            vm,
        } => v_type(v_opcodes::OP_V, vd, funct3, vs1, vs2, funct6, vm),
    }
}
