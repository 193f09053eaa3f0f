//! Instruction Encoder.
//!
//! Turns one tokenized instruction line into a 32-bit word. The operand
//! format comes from the metadata table; each format has one parsing and
//! packing routine here, range-checking every register index and immediate
//! before it is packed.

use crate::asm::source::tokenize;
use crate::asm::symbols::SymbolTable;
use crate::common::{AsmError, NUM_GPRS, NUM_VREGS};
use crate::isa::encoding;
use crate::isa::metadata::{self, Format, InstructionInfo};

/// Signed or unsigned 12-bit immediates; the value is masked to 12 bits.
const IMM12_RANGE: (i64, i64) = (-2048, 4095);
/// Shift amounts.
const SHAMT_RANGE: (i64, i64) = (0, 31);
/// Signed or unsigned 20-bit upper immediates.
const IMM20_RANGE: (i64, i64) = (-524_288, 1_048_575);
/// Branch offsets (13-bit signed, even).
const BRANCH_RANGE: (i64, i64) = (-4096, 4094);
/// Jump offsets (21-bit signed, even).
const JUMP_RANGE: (i64, i64) = (-1_048_576, 1_048_574);

/// Parses an integer literal: decimal, `0x` hex, or `0b` binary, optionally negative.
pub fn parse_int(token: &str) -> Option<i64> {
    let (negative, digits) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    let lower = digits.to_ascii_lowercase();
    let (radix, body) = if let Some(hex) = lower.strip_prefix("0x") {
        (16, hex)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        (2, bin)
    } else {
        (10, lower.as_str())
    };
    // from_str_radix accepts its own sign; only digits may follow the prefix.
    if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let magnitude = i64::from_str_radix(body, radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Parses a register-like token (`x3`, `V7`) with the given prefix, without range checks.
pub fn parse_register_index(token: &str, prefix: char) -> Option<usize> {
    let mut chars = token.chars();
    let first = chars.next()?;
    if !first.eq_ignore_ascii_case(&prefix) {
        return None;
    }
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Where an instruction sits, for error reporting.
struct Site<'a> {
    line: usize,
    addr: u32,
    mnemonic: &'a str,
}

impl Site<'_> {
    fn syntax(&self, reason: impl Into<String>) -> AsmError {
        AsmError::SyntaxError {
            line: self.line,
            reason: format!("{}: {}", self.mnemonic, reason.into()),
        }
    }

    fn out_of_range(&self, operand: &str, reason: impl Into<String>) -> AsmError {
        AsmError::OperandOutOfRange {
            line: self.line,
            mnemonic: self.mnemonic.to_string(),
            operand: operand.to_string(),
            reason: reason.into(),
        }
    }

    fn expect_count(&self, operands: &[&str], count: usize) -> Result<(), AsmError> {
        if operands.len() == count {
            Ok(())
        } else {
            Err(self.syntax(format!(
                "expected {count} operands, found {}",
                operands.len()
            )))
        }
    }

    fn register(&self, token: &str, prefix: char, size: usize) -> Result<usize, AsmError> {
        let index = parse_register_index(token, prefix)
            .ok_or_else(|| self.syntax(format!("expected a {prefix} register, found `{token}`")))?;
        if index >= size {
            return Err(self.out_of_range(token, format!("register index must be below {size}")));
        }
        Ok(index)
    }

    fn xreg(&self, token: &str) -> Result<usize, AsmError> {
        self.register(token, 'x', NUM_GPRS)
    }

    fn vreg(&self, token: &str) -> Result<usize, AsmError> {
        self.register(token, 'v', NUM_VREGS)
    }

    fn immediate(&self, token: &str, (lo, hi): (i64, i64)) -> Result<i32, AsmError> {
        let value =
            parse_int(token).ok_or_else(|| self.syntax(format!("expected an immediate, found `{token}`")))?;
        if value < lo || value > hi {
            return Err(self.out_of_range(token, format!("must be within {lo}..={hi}")));
        }
        Ok(value as i32)
    }

    /// A branch/jump target: a label or a literal byte offset from this instruction.
    fn target(
        &self,
        token: &str,
        symbols: &SymbolTable,
        (lo, hi): (i64, i64),
    ) -> Result<i32, AsmError> {
        let offset = match parse_int(token) {
            Some(offset) => offset,
            None => {
                let dest = symbols.get(token).ok_or_else(|| AsmError::UnresolvedSymbol {
                    line: self.line,
                    symbol: token.to_string(),
                })?;
                i64::from(dest) - i64::from(self.addr)
            }
        };
        if offset % 2 != 0 {
            return Err(self.out_of_range(token, "offset must be even"));
        }
        if offset < lo || offset > hi {
            return Err(self.out_of_range(token, format!("offset {offset} must be within {lo}..={hi}")));
        }
        Ok(offset as i32)
    }

    /// `offset(base)` or `(base)` after the first operand; also `base, imm`.
    fn memory_operand(&self, operands: &[&str]) -> Result<(usize, i32), AsmError> {
        match operands {
            [base] => Ok((self.xreg(base)?, 0)),
            [first, second] if parse_register_index(first, 'x').is_some() => {
                Ok((self.xreg(first)?, self.immediate(second, IMM12_RANGE)?))
            }
            [offset, base] => Ok((self.xreg(base)?, self.immediate(offset, IMM12_RANGE)?)),
            _ => Err(self.syntax("expected `offset(base)`")),
        }
    }
}

/// Encodes one instruction line at `addr`.
///
/// # Arguments
///
/// * `text`    - Instruction text (no label, no comment).
/// * `line`    - 1-based source line, for errors.
/// * `addr`    - Address the instruction will occupy.
/// * `symbols` - Labels bound in pass 1.
///
/// # Returns
///
/// The encoded word or the first error found.
pub fn encode_line(text: &str, line: usize, addr: u32, symbols: &SymbolTable) -> Result<u32, AsmError> {
    let tokens = tokenize(text);
    let Some((&mnemonic, operands)) = tokens.split_first() else {
        return Err(AsmError::SyntaxError {
            line,
            reason: "empty instruction".to_string(),
        });
    };
    let info = metadata::lookup(mnemonic).ok_or_else(|| AsmError::UnknownMnemonic {
        line,
        addr,
        mnemonic: mnemonic.to_ascii_uppercase(),
    })?;
    let site = Site {
        line,
        addr,
        mnemonic: info.mnemonic,
    };
    encode_with(info, &site, operands, symbols)
}

fn encode_with(
    info: &InstructionInfo,
    site: &Site<'_>,
    ops: &[&str],
    symbols: &SymbolTable,
) -> Result<u32, AsmError> {
    let op = info.opcode;
    let f3 = info.funct3;
    match info.format {
        Format::R => {
            site.expect_count(ops, 3)?;
            let (rd, rs1, rs2) = (site.xreg(ops[0])?, site.xreg(ops[1])?, site.xreg(ops[2])?);
            Ok(encoding::r_type(op, rd, f3, rs1, rs2, info.funct7()))
        }
        Format::I => {
            site.expect_count(ops, 3)?;
            let (rd, rs1) = (site.xreg(ops[0])?, site.xreg(ops[1])?);
            let imm = site.immediate(ops[2], IMM12_RANGE)?;
            Ok(encoding::i_type(op, rd, f3, rs1, imm))
        }
        Format::Shift => {
            site.expect_count(ops, 3)?;
            let (rd, rs1) = (site.xreg(ops[0])?, site.xreg(ops[1])?);
            let shamt = site.immediate(ops[2], SHAMT_RANGE)?;
            let imm = ((info.funct7() << 5) as i32) | shamt;
            Ok(encoding::i_type(op, rd, f3, rs1, imm))
        }
        Format::Load => {
            let (first, rest) = ops.split_first().ok_or_else(|| site.syntax("missing operands"))?;
            let rd = site.xreg(first)?;
            let (rs1, imm) = site.memory_operand(rest)?;
            Ok(encoding::i_type(op, rd, f3, rs1, imm))
        }
        Format::S => {
            let (first, rest) = ops.split_first().ok_or_else(|| site.syntax("missing operands"))?;
            let rs2 = site.xreg(first)?;
            let (rs1, imm) = site.memory_operand(rest)?;
            Ok(encoding::s_type(op, f3, rs1, rs2, imm))
        }
        Format::B => {
            site.expect_count(ops, 3)?;
            let (rs1, rs2) = (site.xreg(ops[0])?, site.xreg(ops[1])?);
            let offset = site.target(ops[2], symbols, BRANCH_RANGE)?;
            Ok(encoding::b_type(op, f3, rs1, rs2, offset))
        }
        Format::U => {
            site.expect_count(ops, 2)?;
            let rd = site.xreg(ops[0])?;
            let imm = site.immediate(ops[1], IMM20_RANGE)?;
            Ok(encoding::u_type(op, rd, imm))
        }
        Format::J => {
            site.expect_count(ops, 2)?;
            let rd = site.xreg(ops[0])?;
            let offset = site.target(ops[1], symbols, JUMP_RANGE)?;
            Ok(encoding::j_type(op, rd, offset))
        }
        Format::VMem => {
            let (first, rest) = ops.split_first().ok_or_else(|| site.syntax("missing operands"))?;
            let vreg = site.vreg(first)?;
            let (rs1, imm) = site.memory_operand(rest)?;
            Ok(encoding::i_type(op, vreg, f3, rs1, imm))
        }
        Format::VArith => {
            site.expect_count(ops, 3)?;
            let (vd, vs2, vs1) = (site.vreg(ops[0])?, site.vreg(ops[1])?, site.vreg(ops[2])?);
            Ok(encoding::v_type(op, vd, f3, vs1, vs2, info.funct6(), true))
        }
        Format::VConfig => {
            site.expect_count(ops, 2)?;
            let (rd, rs1) = (site.xreg(ops[0])?, site.xreg(ops[1])?);
            Ok(encoding::v_type(op, rd, f3, rs1, 0, 0, true))
        }
        Format::Fp => Err(AsmError::EncodingNotImplemented {
            line: site.line,
            addr: site.addr,
            mnemonic: info.mnemonic.to_string(),
            format: info.format,
        }),
    }
}
