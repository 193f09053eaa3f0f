//! Instruction Decoder.
//!
//! This module decodes 32-bit instruction words into the structured `Decoded`
//! form. It extracts opcodes, register indices, and function codes, and
//! sign-extends the immediate of each format (I, S, B, U, J). Vector opcodes
//! are routed to a separate decode path with its own field layout.

use crate::isa::instruction::{Decoded, InstructionBits};
use crate::isa::rv32i::opcodes;
use crate::isa::rvv::opcodes as v_opcodes;

/// Total width of an instruction in bits.
const INSTRUCTION_WIDTH: u32 = 32;

/// Bit shift for extracting the I-Type immediate field (bits 20-31).
///
/// I-Type format: `imm[11:0] | rs1 | funct3 | rd | opcode`
const I_IMM_SHIFT: u32 = 20;

/// Bit mask for the raw 12-bit field at bits 20-31.
const I_IMM_MASK: u32 = 0xFFF;

/// Bit shift for extracting S-Type immediate low field (bits 7-11).
///
/// S-Type format: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`
const S_IMM_LOW_SHIFT: u32 = 7;

/// Bit mask for S-Type immediate low field (5 bits: imm[4:0]).
const S_IMM_LOW_MASK: u32 = 0x1F;

/// Bit shift for extracting S-Type immediate high field (bits 25-31).
const S_IMM_HIGH_SHIFT: u32 = 25;

/// Bit mask for S-Type immediate high field (7 bits: imm[11:5]).
const S_IMM_HIGH_MASK: u32 = 0x7F;

/// Bit shift for combining S-Type immediate fields after extraction.
const S_IMM_COMBINED_SHIFT: u32 = 5;

/// Total number of bits in S-Type immediate (12 bits).
const S_IMM_BITS: u32 = 12;

/// B-Type format: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`
const B_IMM_11_SHIFT: u32 = 7;
const B_IMM_4_1_SHIFT: u32 = 8;
const B_IMM_4_1_MASK: u32 = 0xF;
const B_IMM_10_5_SHIFT: u32 = 25;
const B_IMM_10_5_MASK: u32 = 0x3F;
const B_IMM_12_SHIFT: u32 = 31;

/// Total number of bits in B-Type immediate (13 bits, sign-extended).
const B_IMM_BITS: u32 = 13;

/// Bit shift for extracting the U-Type immediate field (bits 12-31).
///
/// U-Type format: `imm[31:12] | rd | opcode`
const U_IMM_SHIFT: u32 = 12;

/// J-Type format: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`
const J_IMM_19_12_SHIFT: u32 = 12;
const J_IMM_19_12_MASK: u32 = 0xFF;
const J_IMM_11_SHIFT: u32 = 20;
const J_IMM_10_1_SHIFT: u32 = 21;
const J_IMM_10_1_MASK: u32 = 0x3FF;
const J_IMM_20_SHIFT: u32 = 31;

/// Total number of bits in J-Type immediate (21 bits, sign-extended).
const J_IMM_BITS: u32 = 21;

/// Decodes an instruction word into its structured form.
///
/// # Arguments
///
/// * `inst` - The 32-bit instruction encoding to decode
///
/// # Returns
///
/// A `Decoded` value whose variant identifies the instruction class.
pub fn decode(inst: u32) -> Decoded {
    let opcode = inst.opcode();
    if v_opcodes::is_vector(opcode) {
        return decode_vector(inst);
    }

    match opcode {
        opcodes::OP_REG => Decoded::Register {
            opcode,
            rd: inst.rd(),
            rs1: inst.rs1(),
            rs2: inst.rs2(),
            funct3: inst.funct3(),
            funct7: inst.funct7(),
        },
        opcodes::OP_IMM | opcodes::OP_LOAD | opcodes::OP_JALR => Decoded::Immediate {
            opcode,
            rd: inst.rd(),
            rs1: inst.rs1(),
            funct3: inst.funct3(),
            imm: decode_i_type_imm(inst),
        },
        opcodes::OP_STORE => Decoded::Store {
            rs1: inst.rs1(),
            rs2: inst.rs2(),
            funct3: inst.funct3(),
            imm: decode_s_type_imm(inst),
        },
        opcodes::OP_BRANCH => Decoded::Branch {
            rs1: inst.rs1(),
            rs2: inst.rs2(),
            funct3: inst.funct3(),
            imm: decode_b_type_imm(inst),
        },
        opcodes::OP_LUI | opcodes::OP_AUIPC => Decoded::Upper {
            opcode,
            rd: inst.rd(),
            imm: decode_u_type_imm(inst),
        },
        opcodes::OP_JAL => Decoded::Jump {
            rd: inst.rd(),
            imm: decode_j_type_imm(inst),
        },
        _ => Decoded::Immediate {
            opcode,
            rd: inst.rd(),
            rs1: inst.rs1(),
            funct3: inst.funct3(),
            imm: ((inst >> I_IMM_SHIFT) & I_IMM_MASK) as i32,
        },
    }
}

/// Decodes the vector formats.
///
/// Vector loads/stores carry an I-type immediate; OP-V words carry
/// `funct6 | vm | vs2 | vs1 | funct3 | vd`.
fn decode_vector(inst: u32) -> Decoded {
    let opcode = inst.opcode();
    if opcode == v_opcodes::OP_V {
        Decoded::VectorArith {
            vd: inst.rd(),
            vs1: inst.rs1(),
            vs2: inst.rs2(),
            funct3: inst.funct3(),
            funct6: inst.funct6(),
            vm: inst.vm(),
        }
    } else {
        Decoded::VectorMemory {
            opcode,
            vreg: inst.rd(),
            rs1: inst.rs1(),
            funct3: inst.funct3(),
            imm: decode_i_type_imm(inst),
        }
    }
}

/// Decodes the immediate value for I-Type instructions.
///
/// Used for Load, JALR, Immediate Arithmetic, and vector memory instructions.
fn decode_i_type_imm(inst: u32) -> i32 {
    (inst as i32) >> I_IMM_SHIFT
}

/// Decodes the immediate value for S-Type instructions.
fn decode_s_type_imm(inst: u32) -> i32 {
    let low = (inst >> S_IMM_LOW_SHIFT) & S_IMM_LOW_MASK;
    let high = (inst >> S_IMM_HIGH_SHIFT) & S_IMM_HIGH_MASK;
    let combined = (high << S_IMM_COMBINED_SHIFT) | low;
    sign_extend(combined, S_IMM_BITS)
}

/// Decodes the immediate value for B-Type instructions. Bit 0 is always zero.
fn decode_b_type_imm(inst: u32) -> i32 {
    let bit_11 = (inst >> B_IMM_11_SHIFT) & 1;
    let bits_4_1 = (inst >> B_IMM_4_1_SHIFT) & B_IMM_4_1_MASK;
    let bits_10_5 = (inst >> B_IMM_10_5_SHIFT) & B_IMM_10_5_MASK;
    let bit_12 = (inst >> B_IMM_12_SHIFT) & 1;

    let combined = (bit_12 << 12) | (bit_11 << 11) | (bits_10_5 << 5) | (bits_4_1 << 1);
    sign_extend(combined, B_IMM_BITS)
}

/// Decodes the 20-bit field of U-Type instructions (LUI, AUIPC).
///
/// The field is returned unshifted; handlers apply `<< 12`.
fn decode_u_type_imm(inst: u32) -> i32 {
    (inst >> U_IMM_SHIFT) as i32
}

/// Decodes the immediate value for J-Type instructions (JAL).
fn decode_j_type_imm(inst: u32) -> i32 {
    let bits_19_12 = (inst >> J_IMM_19_12_SHIFT) & J_IMM_19_12_MASK;
    let bit_11 = (inst >> J_IMM_11_SHIFT) & 1;
    let bits_10_1 = (inst >> J_IMM_10_1_SHIFT) & J_IMM_10_1_MASK;
    let bit_20 = (inst >> J_IMM_20_SHIFT) & 1;

    let combined = (bit_20 << 20) | (bits_19_12 << 12) | (bit_11 << 11) | (bits_10_1 << 1);
    sign_extend(combined, J_IMM_BITS)
}

/// Sign extends a value of `bits` width to a 32-bit signed integer.
const fn sign_extend(val: u32, bits: u32) -> i32 {
    let shift = INSTRUCTION_WIDTH - bits;
    (val as i32) << shift >> shift
}
