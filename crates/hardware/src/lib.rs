//! Vector ISA simulator library.
//!
//! This crate implements a RISC-V-inspired instruction-set simulator with a
//! simplified vector extension, together with the assembler that feeds it:
//! 1. **ISA:** Opcode tables, the mnemonic metadata table, decoding, encoding, and disassembly.
//! 2. **Assembler:** Two-pass label/data resolution and format-driven encoding.
//! 3. **Core:** Register files, flat memory, the dispatch table, handlers, and the run loop.
//! 4. **Simulation:** Source reading and program/data loading, configuration, and statistics.

/// Two-pass assembler (source lines, symbols, encoder).
pub mod asm;
/// Common constants and error types.
pub mod common;
/// Machine configuration (defaults, hierarchical config structures, validation).
pub mod config;
/// Machine core (register files, memory, dispatch, handlers, execution).
pub mod core;
/// Instruction set (opcodes, metadata, decode, encode, disassembly).
pub mod isa;
/// Source reading and program/data loading.
pub mod sim;
/// Run statistics collection and reporting.
pub mod stats;

/// Assembler output; produce one with `assemble_source`.
pub use crate::asm::{Program, assemble, assemble_source};
/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Main machine type; holds registers, memory, dispatch table, and stats.
pub use crate::core::{Machine, RunStatus};
