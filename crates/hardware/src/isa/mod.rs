//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains definitions for opcodes, function codes, the metadata table, and
//! the decode/encode/disassemble logic, organized by extension.
//!
//! # Extensions
//!
//! * `rv32i`: Base Integer Instruction Set, reduced to 16 registers.
//! * `rv32m`: Integer Multiplication and Division.
//! * `rv32f`: Single-Precision Floating-Point encodings (assembler only).
//! * `rvv`: Simplified Vector Extension.

/// Instruction decoding logic for all instruction formats.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Bit packers for every instruction layout.
pub mod encoding;

/// Bit extraction utilities and the structured decoded form.
pub mod instruction;

/// Mnemonic to encoding-field and format table.
pub mod metadata;

/// Single-precision floating-point encodings.
pub mod rv32f;

/// Base integer instruction set.
pub mod rv32i;

/// Integer multiply/divide extension (MUL, DIV, REM instructions).
pub mod rv32m;

/// Simplified vector extension.
pub mod rvv;
