//! Instruction field extraction and the structured decoded form.
//!
//! Provides bit extraction for every fixed-position field, the `Decoded` sum
//! type produced by the decoder, and the concrete key the engine resolves
//! against the dispatch table.

use std::fmt;

use crate::isa::rv32i::opcodes;

/// Bit mask for extracting the opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// Bit mask for extracting a 5-bit register field.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for extracting the funct3 field (bits 12-14).
pub const FUNCT3_MASK: u32 = 0x7;
/// Bit mask for extracting the funct7 field (bits 25-31).
pub const FUNCT7_MASK: u32 = 0x7F;
/// Bit mask for extracting the vector funct6 field (bits 26-31).
pub const FUNCT6_MASK: u32 = 0x3F;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 0-6).
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 7-11).
    ///
    /// Also holds `vd` / `vs3` in vector encodings.
    fn rd(&self) -> usize;

    /// Extracts the first source register field (bits 15-19).
    fn rs1(&self) -> usize;

    /// Extracts the second source register field (bits 20-24).
    fn rs2(&self) -> usize;

    /// Extracts the funct3 field (bits 12-14).
    fn funct3(&self) -> u32;

    /// Extracts the funct7 field (bits 25-31).
    fn funct7(&self) -> u32;

    /// Extracts the vector funct6 field (bits 26-31).
    fn funct6(&self) -> u32;

    /// Extracts the vector mask bit (bit 25). `true` means unmasked.
    fn vm(&self) -> bool;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 7) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> 15) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> 20) & REG_MASK) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> 12) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> 25) & FUNCT7_MASK
    }

    #[inline(always)]
    fn funct6(&self) -> u32 {
        (self >> 26) & FUNCT6_MASK
    }

    #[inline(always)]
    fn vm(&self) -> bool {
        (self >> 25) & 1 == 1
    }
}

/// A decoded instruction, one variant per instruction class.
///
/// Each variant carries only the fields its class uses, so the engine can
/// route it without re-inspecting raw bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decoded {
    /// Register-register (R-type) arithmetic.
    Register {
        /// Major opcode.
        opcode: u32,
        /// Destination register.
        rd: usize,
        /// First source register.
        rs1: usize,
        /// Second source register.
        rs2: usize,
        /// Minor opcode.
        funct3: u32,
        /// Function code 7.
        funct7: u32,
    },

    /// Register-immediate arithmetic, loads, and JALR (I-type), plus any
    /// opcode the decoder does not recognise.
    Immediate {
        /// Major opcode.
        opcode: u32,
        /// Destination register.
        rd: usize,
        /// Base / source register.
        rs1: usize,
        /// Minor opcode.
        funct3: u32,
        /// Sign-extended 12-bit immediate.
        imm: i32,
    },

    /// Stores (S-type).
    Store {
        /// Base register.
        rs1: usize,
        /// Source register holding the value.
        rs2: usize,
        /// Access width selector.
        funct3: u32,
        /// Sign-extended 12-bit offset.
        imm: i32,
    },

    /// Conditional branches (B-type).
    Branch {
        /// First compared register.
        rs1: usize,
        /// Second compared register.
        rs2: usize,
        /// Comparison selector.
        funct3: u32,
        /// Sign-extended 13-bit byte offset (always even).
        imm: i32,
    },

    /// LUI and AUIPC (U-type).
    Upper {
        /// Major opcode.
        opcode: u32,
        /// Destination register.
        rd: usize,
        /// The 20-bit upper-immediate field, `word[31:12]`.
        imm: i32,
    },

    /// JAL (J-type).
    Jump {
        /// Link register.
        rd: usize,
        /// Sign-extended 21-bit byte offset (always even).
        imm: i32,
    },

    /// Vector loads and stores.
    VectorMemory {
        /// Major opcode (vector load or vector store).
        opcode: u32,
        /// Vector register loaded or stored.
        vreg: usize,
        /// Scalar base register.
        rs1: usize,
        /// Memory access selector.
        funct3: u32,
        /// Sign-extended 12-bit offset.
        imm: i32,
    },

    /// Vector arithmetic and vector configuration (OP-V).
    VectorArith {
        /// Destination (vector register, or scalar `rd` for configuration).
        vd: usize,
        /// First source (vector register, or scalar `rs1` for configuration).
        vs1: usize,
        /// Second source vector register.
        vs2: usize,
        /// Operand category.
        funct3: u32,
        /// Function code 6.
        funct6: u32,
        /// Mask bit; `true` means unmasked.
        vm: bool,
    },
}

impl Decoded {
    /// Returns the major opcode this instruction was decoded from.
    pub const fn opcode(&self) -> u32 {
        match *self {
            Self::Register { opcode, .. }
            | Self::Immediate { opcode, .. }
            | Self::Upper { opcode, .. }
            | Self::VectorMemory { opcode, .. } => opcode,
            Self::Store { .. } => opcodes::OP_STORE,
            Self::Branch { .. } => opcodes::OP_BRANCH,
            Self::Jump { .. } => opcodes::OP_JAL,
            Self::VectorArith { .. } => crate::isa::rvv::opcodes::OP_V,
        }
    }

    /// Builds the concrete dispatch key for this instruction.
    ///
    /// Only register-register instructions expose `funct7` and only vector
    /// arithmetic exposes `funct6`; U/J instructions have no `funct3`.
    pub const fn dispatch_key(&self) -> InstructionKey {
        let opcode = self.opcode();
        let (funct3, funct) = match *self {
            Self::Register { funct3, funct7, .. } => (Some(funct3), Funct::Funct7(funct7)),
            Self::Immediate { funct3, .. }
            | Self::Store { funct3, .. }
            | Self::Branch { funct3, .. }
            | Self::VectorMemory { funct3, .. } => (Some(funct3), Funct::Ignored),
            Self::Upper { .. } | Self::Jump { .. } => (None, Funct::Ignored),
            Self::VectorArith { funct3, funct6, .. } => (Some(funct3), Funct::Funct6(funct6)),
        };
        InstructionKey {
            opcode,
            funct3,
            funct,
        }
    }
}

/// The function-code field a concrete instruction exposes to dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Funct {
    /// `funct7` of a register-register instruction.
    Funct7(u32),
    /// `funct6` of a vector arithmetic instruction.
    Funct6(u32),
    /// The class does not dispatch on a function code.
    Ignored,
}

/// The concrete (opcode, funct3, funct) triple of one decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InstructionKey {
    /// Major opcode.
    pub opcode: u32,
    /// Minor opcode, absent for U/J instructions.
    pub funct3: Option<u32>,
    /// Function code used for dispatch.
    pub funct: Funct,
}

impl fmt::Display for InstructionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "opcode={:#09b}", self.opcode)?;
        if let Some(funct3) = self.funct3 {
            write!(f, " funct3={funct3:#05b}")?;
        }
        match self.funct {
            Funct::Funct7(v) => write!(f, " funct7={v:#09b}"),
            Funct::Funct6(v) => write!(f, " funct6={v:#08b}"),
            Funct::Ignored => Ok(()),
        }
    }
}
