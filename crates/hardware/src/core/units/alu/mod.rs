//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the 32-bit integer ALU shared by the register and
//! immediate instruction handlers. It also implements the Multiply/Divide (M)
//! extension operations.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, Mulh, Mulhsu, Mulhu, Div, Divu, Rem, Remu
//! - [`logic`]:      Or, And, Xor, Slt, Sltu
//! - [`shifts`]:     Sll, Srl, Sra

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical and comparison operations (or, and, xor, slt).
pub mod logic;

/// Shift operations (sll, srl, sra).
pub mod shifts;

/// ALU operation selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// Integer addition.
    #[default]
    Add,
    /// Integer subtraction.
    Sub,
    /// Shift left logical.
    Sll,
    /// Set less than (signed).
    Slt,
    /// Set less than unsigned.
    Sltu,
    /// Bitwise XOR.
    Xor,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
    /// Bitwise OR.
    Or,
    /// Bitwise AND.
    And,
    /// Integer multiply (low bits).
    Mul,
    /// Integer multiply (high bits, signed × signed).
    Mulh,
    /// Integer multiply (high bits, signed × unsigned).
    Mulhsu,
    /// Integer multiply (high bits, unsigned × unsigned).
    Mulhu,
    /// Signed division.
    Div,
    /// Unsigned division.
    Divu,
    /// Signed remainder.
    Rem,
    /// Unsigned remainder.
    Remu,
}

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation on two 32-bit operands.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand (also used as the shift amount)
    ///
    /// # Returns
    ///
    /// The 32-bit result, wrapping on overflow.
    ///
    /// # Examples
    ///
    /// ```
    /// use vecsim_core::core::units::alu::{Alu, AluOp};
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 0xFFFF_FFFF, 1), 0);
    /// assert_eq!(Alu::execute(AluOp::Sll, 0x1, 4), 0x10);
    /// assert_eq!(Alu::execute(AluOp::Slt, -5_i32 as u32, 10), 1);
    /// assert_eq!(Alu::execute(AluOp::Divu, 100, 7), 14);
    /// ```
    pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
        match op {
            AluOp::Add
            | AluOp::Sub
            | AluOp::Mul
            | AluOp::Mulh
            | AluOp::Mulhsu
            | AluOp::Mulhu
            | AluOp::Div
            | AluOp::Divu
            | AluOp::Rem
            | AluOp::Remu => arithmetic::execute(op, a, b),

            AluOp::Or | AluOp::And | AluOp::Xor | AluOp::Slt | AluOp::Sltu => {
                logic::execute(op, a, b)
            }

            AluOp::Sll | AluOp::Srl | AluOp::Sra => shifts::execute(op, a, b),
        }
    }
}
