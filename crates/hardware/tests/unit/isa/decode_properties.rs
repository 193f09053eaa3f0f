//! Instruction Decode Properties.
//!
//! Verifies that `decode()` extracts opcode, register fields, function codes,
//! and sign-extended immediates for every format, and that `encode()` is its
//! exact inverse over all 32-bit words.
//!
//! # Coverage Matrix
//!
//! - R-type:  OP_REG (I + M)
//! - I-type:  OP_IMM, OP_LOAD, OP_JALR
//! - S-type:  OP_STORE
//! - B-type:  OP_BRANCH
//! - U-type:  OP_LUI, OP_AUIPC
//! - J-type:  OP_JAL
//! - Vector:  OP_VLOAD, OP_VSTORE, OP_V

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use vecsim_core::isa::decode::decode;
use vecsim_core::isa::encoding::{self, encode};
use vecsim_core::isa::instruction::{Decoded, Funct, InstructionBits, InstructionKey};
use vecsim_core::isa::rv32i::{funct3, funct7, opcodes};
use vecsim_core::isa::rv32m;
use vecsim_core::isa::rvv::{funct3 as v_f3, funct6 as v_f6, opcodes as v_op};

// ──────────────────────────────────────────────────────────
// Known words
// ──────────────────────────────────────────────────────────

#[test]
fn test_decode_addi_x10_x0_10() {
    assert_eq!(
        decode(0x00A0_0513),
        Decoded::Immediate {
            opcode: opcodes::OP_IMM,
            rd: 10,
            rs1: 0,
            funct3: funct3::ADD_SUB,
            imm: 10,
        }
    );
}

#[test]
fn test_decode_add_x2_x1_x1() {
    assert_eq!(
        decode(0x0010_8133),
        Decoded::Register {
            opcode: opcodes::OP_REG,
            rd: 2,
            rs1: 1,
            rs2: 1,
            funct3: funct3::ADD_SUB,
            funct7: funct7::DEFAULT,
        }
    );
}

#[test]
fn test_decode_negative_i_immediate() {
    let word = encoding::i_type(opcodes::OP_IMM, 1, funct3::ADD_SUB, 2, -1);
    assert_eq!(word >> 20, 0xFFF);
    match decode(word) {
        Decoded::Immediate { imm, .. } => assert_eq!(imm, -1),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_decode_mul_keeps_funct7() {
    let word = encoding::r_type(opcodes::OP_REG, 5, rv32m::funct3::MUL, 6, 7, rv32m::MULDIV);
    assert_eq!(
        decode(word).dispatch_key(),
        InstructionKey {
            opcode: opcodes::OP_REG,
            funct3: Some(rv32m::funct3::MUL),
            funct: Funct::Funct7(rv32m::MULDIV),
        }
    );
}

#[test]
fn test_decode_upper_has_no_funct3_in_key() {
    let word = encoding::u_type(opcodes::OP_LUI, 3, 0x12345);
    let decoded = decode(word);
    assert_eq!(
        decoded,
        Decoded::Upper {
            opcode: opcodes::OP_LUI,
            rd: 3,
            imm: 0x12345,
        }
    );
    assert_eq!(decoded.dispatch_key().funct3, None);
    assert_eq!(decoded.dispatch_key().funct, Funct::Ignored);
}

#[test]
fn test_decode_vector_arith_fields() {
    let word = encoding::v_type(v_op::OP_V, 3, v_f3::OPIVV, 1, 2, v_f6::VADD, true);
    assert_eq!(
        decode(word),
        Decoded::VectorArith {
            vd: 3,
            vs1: 1,
            vs2: 2,
            funct3: v_f3::OPIVV,
            funct6: v_f6::VADD,
            vm: true,
        }
    );
    assert_eq!(word.funct6(), v_f6::VADD);
    assert!(word.vm());
}

#[test]
fn test_decode_vector_load_uses_i_immediate() {
    let word = encoding::i_type(v_op::OP_VLOAD, 4, v_f3::VMEM_UNIT, 0, 512);
    assert_eq!(
        decode(word),
        Decoded::VectorMemory {
            opcode: v_op::OP_VLOAD,
            vreg: 4,
            rs1: 0,
            funct3: v_f3::VMEM_UNIT,
            imm: 512,
        }
    );
}

#[test]
fn test_decode_vector_store_opcode() {
    let word = encoding::i_type(v_op::OP_VSTORE, 2, v_f3::VMEM_UNIT, 5, -8);
    match decode(word) {
        Decoded::VectorMemory { opcode, vreg, rs1, imm, .. } => {
            assert_eq!((opcode, vreg, rs1, imm), (v_op::OP_VSTORE, 2, 5, -8));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_unknown_opcode_decodes_as_immediate_with_raw_field() {
    // Opcode 0x7F is not assigned; the upper 12 bits are carried unextended.
    match decode(0xFFFF_FFFF) {
        Decoded::Immediate { opcode, imm, .. } => {
            assert_eq!(opcode, 0x7F);
            assert_eq!(imm, 0xFFF);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_field_extractors() {
    let word = encoding::r_type(opcodes::OP_REG, 13, 0b101, 14, 15, 0b0100000);
    assert_eq!(word.opcode(), opcodes::OP_REG);
    assert_eq!(word.rd(), 13);
    assert_eq!(word.rs1(), 14);
    assert_eq!(word.rs2(), 15);
    assert_eq!(word.funct3(), 0b101);
    assert_eq!(word.funct7(), 0b0100000);
}

// ──────────────────────────────────────────────────────────
// Properties
// ──────────────────────────────────────────────────────────

fn even(range: std::ops::Range<i32>) -> impl Strategy<Value = i32> {
    range.prop_map(|v| v & !1)
}

proptest! {
    #[test]
    fn prop_encode_inverts_decode(word in any::<u32>()) {
        prop_assert_eq!(encode(&decode(word)), word);
    }

    #[test]
    fn prop_r_type_fields(rd in 0usize..32, rs1 in 0usize..32, rs2 in 0usize..32, f3 in 0u32..8, f7 in 0u32..128) {
        let decoded = decode(encoding::r_type(opcodes::OP_REG, rd, f3, rs1, rs2, f7));
        prop_assert_eq!(decoded, Decoded::Register { opcode: opcodes::OP_REG, rd, rs1, rs2, funct3: f3, funct7: f7 });
    }

    #[test]
    fn prop_i_immediate_sign_extends(imm in -2048i32..2048, rd in 0usize..16, rs1 in 0usize..16) {
        match decode(encoding::i_type(opcodes::OP_LOAD, rd, funct3::LW, rs1, imm)) {
            Decoded::Immediate { imm: got, rd: d, rs1: s, .. } => {
                prop_assert_eq!(got, imm);
                prop_assert_eq!((d, s), (rd, rs1));
            }
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }

    #[test]
    fn prop_s_immediate_sign_extends(imm in -2048i32..2048) {
        match decode(encoding::s_type(opcodes::OP_STORE, funct3::SW, 1, 2, imm)) {
            Decoded::Store { imm: got, rs1, rs2, .. } => {
                prop_assert_eq!(got, imm);
                prop_assert_eq!((rs1, rs2), (1, 2));
            }
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }

    #[test]
    fn prop_b_offset_round_trips(imm in even(-4096..4096)) {
        match decode(encoding::b_type(opcodes::OP_BRANCH, funct3::BNE, 3, 4, imm)) {
            Decoded::Branch { imm: got, funct3: f3, .. } => {
                prop_assert_eq!(got, imm);
                prop_assert_eq!(f3, funct3::BNE);
            }
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }

    #[test]
    fn prop_j_offset_round_trips(imm in even(-(1 << 20)..(1 << 20))) {
        match decode(encoding::j_type(opcodes::OP_JAL, 1, imm)) {
            Decoded::Jump { imm: got, rd } => {
                prop_assert_eq!(got, imm);
                prop_assert_eq!(rd, 1);
            }
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }

    #[test]
    fn prop_u_field_round_trips(imm in 0i32..(1 << 20)) {
        match decode(encoding::u_type(opcodes::OP_AUIPC, 7, imm)) {
            Decoded::Upper { imm: got, opcode, .. } => {
                prop_assert_eq!(got, imm);
                prop_assert_eq!(opcode, opcodes::OP_AUIPC);
            }
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }
}
