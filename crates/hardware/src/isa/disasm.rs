//! Instruction Disassembler.
//!
//! Converts a 32-bit instruction encoding into assembler syntax for debug
//! tracing, the CLI listing, and test diagnostics. The mnemonic is found by a
//! reverse lookup through the metadata table, so anything the assembler can
//! emit is rendered here as well.
//!
//! # Usage
//!
//! ```ignore
//! use vecsim_core::isa::disasm::disassemble;
//! let text = disassemble(0x00A00513); // ADDI x10, x0, 10
//! assert_eq!(text, "addi x10, x0, 10");
//! ```

use crate::isa::decode::decode;
use crate::isa::instruction::Decoded;
use crate::isa::metadata::{self, Format};

/// Disassembles a 32-bit instruction into a human-readable string.
///
/// Returns `"unknown"` for encodings no mnemonic produces.
///
/// # Arguments
///
/// * `inst` - The raw 32-bit instruction encoding.
pub fn disassemble(inst: u32) -> String {
    let decoded = decode(inst);
    let Some(info) = metadata::identify(&decoded) else {
        return "unknown".to_string();
    };
    let mn = info.mnemonic.to_ascii_lowercase();

    match (info.format, decoded) {
        (Format::R, Decoded::Register { rd, rs1, rs2, .. }) => {
            format!("{mn} x{rd}, x{rs1}, x{rs2}")
        }
        (Format::I, Decoded::Immediate { rd, rs1, imm, .. }) => {
            format!("{mn} x{rd}, x{rs1}, {imm}")
        }
        (Format::Shift, Decoded::Immediate { rd, rs1, imm, .. }) => {
            format!("{mn} x{rd}, x{rs1}, {}", imm & 0x1F)
        }
        (Format::Load, Decoded::Immediate { rd, rs1, imm, .. }) => {
            format!("{mn} x{rd}, {imm}(x{rs1})")
        }
        (Format::S, Decoded::Store { rs1, rs2, imm, .. }) => {
            format!("{mn} x{rs2}, {imm}(x{rs1})")
        }
        (Format::B, Decoded::Branch { rs1, rs2, imm, .. }) => {
            format!("{mn} x{rs1}, x{rs2}, {imm}")
        }
        (Format::U, Decoded::Upper { rd, imm, .. }) => format!("{mn} x{rd}, {imm:#x}"),
        (Format::J, Decoded::Jump { rd, imm }) => format!("{mn} x{rd}, {imm}"),
        (Format::VMem, Decoded::VectorMemory { vreg, rs1, imm, .. }) => {
            format!("{mn} v{vreg}, {imm}(x{rs1})")
        }
        (Format::VArith, Decoded::VectorArith { vd, vs1, vs2, .. }) => {
            format!("{mn} v{vd}, v{vs2}, v{vs1}")
        }
        (Format::VConfig, Decoded::VectorArith { vd, vs1, .. }) => format!("{mn} x{vd}, x{vs1}"),
        (Format::Fp, Decoded::Immediate { rd, rs1, imm, .. }) => {
            format!("{mn} f{rd}, f{rs1}, f{}", imm & 0x1F)
        }
        _ => "unknown".to_string(),
    }
}
