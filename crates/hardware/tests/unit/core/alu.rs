//! # ALU Tests
//!
//! 32-bit wrapping arithmetic, shift masking, comparisons, and the
//! non-trapping division corner cases of the M extension.

use rstest::rstest;
use vecsim_core::core::units::alu::{Alu, AluOp};

const NEG_ONE: u32 = u32::MAX;
const INT_MIN: u32 = 0x8000_0000;

#[rstest]
#[case::add_wraps(AluOp::Add, NEG_ONE, 1, 0)]
#[case::sub_wraps(AluOp::Sub, 0, 1, NEG_ONE)]
#[case::sll_masks_amount(AluOp::Sll, 1, 33, 2)]
#[case::srl_logical(AluOp::Srl, INT_MIN, 4, 0x0800_0000)]
#[case::sra_arithmetic(AluOp::Sra, INT_MIN, 4, 0xF800_0000)]
#[case::slt_signed(AluOp::Slt, NEG_ONE, 1, 1)]
#[case::sltu_unsigned(AluOp::Sltu, NEG_ONE, 1, 0)]
#[case::xor(AluOp::Xor, 0xF0F0, 0xFF00, 0x0FF0)]
#[case::or(AluOp::Or, 0xF0, 0x0F, 0xFF)]
#[case::and(AluOp::And, 0xF0, 0x3C, 0x30)]
#[case::mul_low(AluOp::Mul, 0x1_0001, 0x1_0001, 0x0002_0001)]
#[case::mulh_signed(AluOp::Mulh, NEG_ONE, NEG_ONE, 0)]
#[case::mulhu(AluOp::Mulhu, NEG_ONE, NEG_ONE, 0xFFFF_FFFE)]
#[case::mulhsu(AluOp::Mulhsu, NEG_ONE, NEG_ONE, NEG_ONE)]
#[case::div_truncates(AluOp::Div, (-7i32) as u32, 2, (-3i32) as u32)]
#[case::div_by_zero(AluOp::Div, 5, 0, NEG_ONE)]
#[case::div_overflow(AluOp::Div, INT_MIN, NEG_ONE, INT_MIN)]
#[case::divu_by_zero(AluOp::Divu, 5, 0, NEG_ONE)]
#[case::rem_sign_follows_dividend(AluOp::Rem, (-7i32) as u32, 2, NEG_ONE)]
#[case::rem_by_zero(AluOp::Rem, 5, 0, 5)]
#[case::rem_overflow(AluOp::Rem, INT_MIN, NEG_ONE, 0)]
#[case::remu_by_zero(AluOp::Remu, 5, 0, 5)]
fn test_alu(#[case] op: AluOp, #[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(Alu::execute(op, a, b), expected, "{op:?}({a:#x}, {b:#x})");
}
