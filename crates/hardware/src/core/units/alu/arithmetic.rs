//! ALU arithmetic operations.
//!
//! Implements 32-bit integer addition, subtraction, multiplication, and
//! division, including the full M-extension multiply/divide family.
//! Division never traps: by zero yields all ones (quotient) or the dividend
//! (remainder), and `i32::MIN / -1` yields `i32::MIN` with remainder 0.

use super::AluOp;

/// Number of bits in a word (used for high-multiply shift).
const WORD_BITS: u32 = 32;

/// Executes an integer arithmetic operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be an arithmetic variant).
/// * `a`  - First operand.
/// * `b`  - Second operand.
///
/// # Returns
///
/// The 32-bit result. Returns `0` for non-arithmetic opcodes.
pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Mul => a.wrapping_mul(b),
        AluOp::Mulh => ((i64::from(a as i32) * i64::from(b as i32)) >> WORD_BITS) as u32,
        AluOp::Mulhsu => ((i64::from(a as i32) * i64::from(b)) >> WORD_BITS) as u32,
        AluOp::Mulhu => ((u64::from(a) * u64::from(b)) >> WORD_BITS) as u32,
        AluOp::Div => {
            if b == 0 {
                u32::MAX
            } else {
                (a as i32).wrapping_div(b as i32) as u32
            }
        }
        AluOp::Divu => a.checked_div(b).unwrap_or(u32::MAX),
        AluOp::Rem => {
            if b == 0 {
                a
            } else {
                (a as i32).wrapping_rem(b as i32) as u32
            }
        }
        AluOp::Remu => a.checked_rem(b).unwrap_or(a),
        _ => 0,
    }
}
