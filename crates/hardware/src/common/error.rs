//! Assembly, Simulation, and Configuration Errors.
//!
//! Every fatal condition surfaces to the caller as one of these enums, carrying
//! enough context (source line, address, mnemonic, or the decoded key of the
//! offending word) to diagnose it without re-running with extra logging.

use thiserror::Error;

use crate::isa::instruction::InstructionKey;
use crate::isa::metadata::Format;

/// Errors raised while assembling source text. All of them abort the session.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AsmError {
    /// A label referenced by an instruction or a data value was never bound.
    #[error("line {line}: unresolved symbol `{symbol}`")]
    UnresolvedSymbol {
        /// 1-based source line of the reference.
        line: usize,
        /// The symbol that could not be resolved.
        symbol: String,
    },

    /// Malformed label, data, or instruction line.
    #[error("line {line}: syntax error: {reason}")]
    SyntaxError {
        /// 1-based source line.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// The mnemonic is absent from the instruction metadata table.
    #[error("line {line} (address {addr:#06x}): unknown mnemonic `{mnemonic}`")]
    UnknownMnemonic {
        /// 1-based source line.
        line: usize,
        /// Address the instruction would have occupied.
        addr: u32,
        /// The mnemonic as written (upper-cased).
        mnemonic: String,
    },

    /// The mnemonic is known but its format has no encoder.
    #[error("line {line} (address {addr:#06x}): encoding for `{mnemonic}` ({format} format) is not implemented")]
    EncodingNotImplemented {
        /// 1-based source line.
        line: usize,
        /// Address the instruction would have occupied.
        addr: u32,
        /// The mnemonic.
        mnemonic: String,
        /// Format recorded for the mnemonic in the metadata table.
        format: Format,
    },

    /// A register index or immediate does not fit its field.
    #[error("line {line}: operand `{operand}` of `{mnemonic}` is out of range: {reason}")]
    OperandOutOfRange {
        /// 1-based source line.
        line: usize,
        /// The mnemonic being encoded.
        mnemonic: String,
        /// The offending operand token.
        operand: String,
        /// The accepted range.
        reason: String,
    },

    /// A label was bound twice.
    #[error("line {line}: label `{label}` is already bound to address {previous:#06x}")]
    DuplicateLabel {
        /// 1-based source line of the second binding.
        line: usize,
        /// The label name.
        label: String,
        /// Address of the first binding.
        previous: u32,
    },
}

/// Errors raised while building, loading, or running a machine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    /// No dispatch-table entry matches the decoded word. Halts simulation.
    #[error("unknown instruction {word:#010x} at pc {pc:#06x} ({key})")]
    UnknownInstruction {
        /// Address of the instruction.
        pc: u32,
        /// The raw instruction word.
        word: u32,
        /// The opcode/funct3/funct fields that failed to resolve.
        key: InstructionKey,
    },

    /// A decoded register index lies outside its register file.
    #[error("register {file}{index} at pc {pc:#06x} is outside the {size}-entry register file")]
    RegisterOutOfRange {
        /// Address of the instruction.
        pc: u32,
        /// Register file prefix (`x` or `v`).
        file: char,
        /// The decoded index.
        index: usize,
        /// Size of the register file.
        size: usize,
    },

    /// A fetch, load, or store touched bytes outside memory.
    #[error("{size}-byte access at {addr:#x} is outside memory of {capacity} bytes")]
    MemoryOutOfBounds {
        /// First byte of the access.
        addr: u64,
        /// Access size in bytes.
        size: usize,
        /// Memory capacity in bytes.
        capacity: usize,
    },

    /// The program does not fit in the program region.
    #[error("program of {bytes} bytes exceeds the {limit}-byte program region")]
    ProgramTooLarge {
        /// Program size in bytes.
        bytes: usize,
        /// Size of the program region.
        limit: usize,
    },

    /// A data vector does not fit in memory.
    #[error("data vector `{name}` ({bytes} bytes at {addr:#x}) does not fit in memory of {capacity} bytes")]
    DataOverflow {
        /// Name of the data vector.
        name: String,
        /// Address the vector would start at.
        addr: usize,
        /// Size of the vector in bytes.
        bytes: usize,
        /// Memory capacity in bytes.
        capacity: usize,
    },

    /// Machine or vector configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Two dispatch-table entries resolve to the same concrete key.
    #[error("dispatch entries `{first}` and `{second}` overlap on opcode {opcode:#09b}")]
    DispatchCollision {
        /// Name of the entry already in the table.
        first: &'static str,
        /// Name of the entry being registered.
        second: &'static str,
        /// Shared opcode.
        opcode: u32,
    },
}

/// Invalid machine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Memory must hold at least one instruction.
    #[error("memory size {0} is smaller than one instruction")]
    MemoryTooSmall(usize),

    /// The data base address lies outside memory.
    #[error("data base {data_base:#x} lies outside memory of {size} bytes")]
    DataBaseOutOfRange {
        /// Configured data base.
        data_base: usize,
        /// Configured memory size.
        size: usize,
    },

    /// The program region runs into the data region.
    #[error("program region of {max_program_bytes} bytes overlaps data base {data_base:#x}")]
    ProgramRegionOverlap {
        /// Configured program region size.
        max_program_bytes: usize,
        /// Configured data base.
        data_base: usize,
    },

    /// SEW must be 8, 16, 32, or 64.
    #[error("SEW {0} is not one of 8, 16, 32, 64")]
    InvalidSew(usize),

    /// LMUL must be 1, 2, 4, or 8.
    #[error("LMUL {0} is not one of 1, 2, 4, 8")]
    InvalidLmul(usize),

    /// VLEN must be a non-zero multiple of 64.
    #[error("VLEN {0} is not a non-zero multiple of 64")]
    InvalidVlen(usize),

    /// The configuration document could not be parsed.
    #[error("malformed configuration: {0}")]
    Malformed(String),
}
