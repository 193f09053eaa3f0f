//! Instruction Dispatch Table.
//!
//! Maps `(opcode, funct3, funct)` keys to named handlers. This module provides:
//! 1. **Keys:** Exact-or-wildcard selectors for `funct3` and for the `funct7` /
//!    `funct6` field, so shared encodings (SRLI/SRAI, JAL, VSETVL) need one entry.
//! 2. **Validation:** Registration rejects any entry that overlaps an existing
//!    one, so at most one entry matches a concrete instruction.
//! 3. **Lookup:** Deterministic, exact `funct3` before wildcard, then exact
//!    `funct` before wildcard.
//! 4. **Standard Table:** The entries for every instruction the machine executes.

use std::collections::HashMap;

use crate::common::SimError;
use crate::core::handlers::{Handler, scalar, vector};
use crate::core::handlers::scalar::Condition;
use crate::core::handlers::vector::VectorOp;
use crate::core::units::alu::AluOp;
use crate::isa::instruction::{Funct, InstructionKey};
use crate::isa::rv32i::{funct3 as i_f3, funct7 as i_f7, opcodes as i_op};
use crate::isa::rv32m::{self, funct3 as m_f3};
use crate::isa::rvv::{funct3 as v_f3, funct6 as v_f6, opcodes as v_op};
use crate::stats::InstructionClass;

/// Exact-or-wildcard match on `funct3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Matches only this value.
    Exact(u32),
    /// Matches any value, including an absent field.
    Any,
}

impl Selector {
    const fn matches(self, value: Option<u32>) -> bool {
        match (self, value) {
            (Self::Any, _) => true,
            (Self::Exact(want), Some(got)) => want == got,
            (Self::Exact(_), None) => false,
        }
    }

    const fn overlaps(self, other: Self) -> bool {
        match (self, other) {
            (Self::Exact(a), Self::Exact(b)) => a == b,
            _ => true,
        }
    }

    const fn is_exact(self) -> bool {
        matches!(self, Self::Exact(_))
    }
}

/// Exact-or-wildcard match on the function code beyond `funct3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FunctSelector {
    /// Matches register-register instructions with this `funct7`.
    Funct7(u32),
    /// Matches vector arithmetic instructions with this `funct6`.
    Funct6(u32),
    /// Matches any function code.
    Any,
}

impl FunctSelector {
    const fn matches(self, funct: Funct) -> bool {
        match (self, funct) {
            (Self::Any, _) => true,
            (Self::Funct7(want), Funct::Funct7(got)) | (Self::Funct6(want), Funct::Funct6(got)) => {
                want == got
            }
            _ => false,
        }
    }

    const fn overlaps(self, other: Self) -> bool {
        match (self, other) {
            (Self::Any, _) | (_, Self::Any) => true,
            (Self::Funct7(a), Self::Funct7(b)) | (Self::Funct6(a), Self::Funct6(b)) => a == b,
            _ => false,
        }
    }

    const fn is_exact(self) -> bool {
        !matches!(self, Self::Any)
    }
}

/// A dispatch-table key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DispatchKey {
    /// Major opcode; always exact.
    pub opcode: u32,
    /// `funct3` selector.
    pub funct3: Selector,
    /// `funct7` / `funct6` selector.
    pub funct: FunctSelector,
}

impl DispatchKey {
    /// Returns true if this key matches the concrete key of an instruction.
    pub const fn matches(&self, key: &InstructionKey) -> bool {
        self.opcode == key.opcode && self.funct3.matches(key.funct3) && self.funct.matches(key.funct)
    }

    /// Returns true if some concrete instruction would match both keys.
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.opcode == other.opcode
            && self.funct3.overlaps(other.funct3)
            && self.funct.overlaps(other.funct)
    }

    const fn specificity(&self) -> (bool, bool) {
        (self.funct3.is_exact(), self.funct.is_exact())
    }
}

/// One registered instruction.
#[derive(Clone, Copy, Debug)]
pub struct DispatchEntry {
    /// Key the entry matches.
    pub key: DispatchKey,
    /// Instruction name, for diagnostics.
    pub name: &'static str,
    /// Class recorded in the run statistics.
    pub class: InstructionClass,
    /// State transition to apply.
    pub handler: Handler,
}

/// Dispatch table, bucketed by opcode.
#[derive(Clone, Debug, Default)]
pub struct DispatchTable {
    buckets: HashMap<u32, Vec<DispatchEntry>>,
}

impl DispatchTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry.
    ///
    /// # Returns
    ///
    /// `SimError::DispatchCollision` if the entry overlaps one already present.
    pub fn register(&mut self, entry: DispatchEntry) -> Result<(), SimError> {
        let bucket = self.buckets.entry(entry.key.opcode).or_default();
        if let Some(existing) = bucket.iter().find(|e| e.key.overlaps(&entry.key)) {
            return Err(SimError::DispatchCollision {
                first: existing.name,
                second: entry.name,
                opcode: entry.key.opcode,
            });
        }
        bucket.push(entry);
        Ok(())
    }

    /// Finds the entry for a concrete instruction key.
    ///
    /// Among matching entries, exact `funct3` wins over wildcard, then exact
    /// `funct` over wildcard.
    pub fn lookup(&self, key: &InstructionKey) -> Option<&DispatchEntry> {
        self.buckets
            .get(&key.opcode)?
            .iter()
            .filter(|e| e.key.matches(key))
            .max_by_key(|e| e.key.specificity())
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Returns true if no entry is registered.
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    /// Builds the table of every instruction the machine executes.
    pub fn standard() -> Result<Self, SimError> {
        let mut table = Self::new();
        for entry in standard_entries() {
            table.register(entry)?;
        }
        Ok(table)
    }
}

const fn entry(
    name: &'static str,
    opcode: u32,
    funct3: Selector,
    funct: FunctSelector,
    class: InstructionClass,
    handler: Handler,
) -> DispatchEntry {
    DispatchEntry {
        key: DispatchKey {
            opcode,
            funct3,
            funct,
        },
        name,
        class,
        handler,
    }
}

const fn reg(name: &'static str, funct3: u32, funct7: u32, handler: Handler) -> DispatchEntry {
    entry(
        name,
        i_op::OP_REG,
        Selector::Exact(funct3),
        FunctSelector::Funct7(funct7),
        InstructionClass::Alu,
        handler,
    )
}

const fn on_funct3(
    name: &'static str,
    opcode: u32,
    funct3: u32,
    class: InstructionClass,
    handler: Handler,
) -> DispatchEntry {
    entry(name, opcode, Selector::Exact(funct3), FunctSelector::Any, class, handler)
}

const fn varith(name: &'static str, funct3: u32, funct6: u32, handler: Handler) -> DispatchEntry {
    entry(
        name,
        v_op::OP_V,
        Selector::Exact(funct3),
        FunctSelector::Funct6(funct6),
        InstructionClass::VectorArith,
        handler,
    )
}

fn standard_entries() -> Vec<DispatchEntry> {
    use InstructionClass::{Alu, Branch, Jump, Load, Store, Upper, VectorConfig, VectorMemory};

    vec![
        // Register-register
        reg("add", i_f3::ADD_SUB, i_f7::DEFAULT, |m, o| scalar::alu_reg(m, o, AluOp::Add)),
        reg("sub", i_f3::ADD_SUB, i_f7::SUB, |m, o| scalar::alu_reg(m, o, AluOp::Sub)),
        reg("sll", i_f3::SLL, i_f7::DEFAULT, |m, o| scalar::alu_reg(m, o, AluOp::Sll)),
        reg("slt", i_f3::SLT, i_f7::DEFAULT, |m, o| scalar::alu_reg(m, o, AluOp::Slt)),
        reg("sltu", i_f3::SLTU, i_f7::DEFAULT, |m, o| scalar::alu_reg(m, o, AluOp::Sltu)),
        reg("xor", i_f3::XOR, i_f7::DEFAULT, |m, o| scalar::alu_reg(m, o, AluOp::Xor)),
        reg("srl", i_f3::SRL_SRA, i_f7::DEFAULT, |m, o| scalar::alu_reg(m, o, AluOp::Srl)),
        reg("sra", i_f3::SRL_SRA, i_f7::SRA, |m, o| scalar::alu_reg(m, o, AluOp::Sra)),
        reg("or", i_f3::OR, i_f7::DEFAULT, |m, o| scalar::alu_reg(m, o, AluOp::Or)),
        reg("and", i_f3::AND, i_f7::DEFAULT, |m, o| scalar::alu_reg(m, o, AluOp::And)),
        reg("mul", m_f3::MUL, rv32m::MULDIV, |m, o| scalar::alu_reg(m, o, AluOp::Mul)),
        reg("mulh", m_f3::MULH, rv32m::MULDIV, |m, o| scalar::alu_reg(m, o, AluOp::Mulh)),
        reg("mulhsu", m_f3::MULHSU, rv32m::MULDIV, |m, o| scalar::alu_reg(m, o, AluOp::Mulhsu)),
        reg("mulhu", m_f3::MULHU, rv32m::MULDIV, |m, o| scalar::alu_reg(m, o, AluOp::Mulhu)),
        reg("div", m_f3::DIV, rv32m::MULDIV, |m, o| scalar::alu_reg(m, o, AluOp::Div)),
        reg("divu", m_f3::DIVU, rv32m::MULDIV, |m, o| scalar::alu_reg(m, o, AluOp::Divu)),
        reg("rem", m_f3::REM, rv32m::MULDIV, |m, o| scalar::alu_reg(m, o, AluOp::Rem)),
        reg("remu", m_f3::REMU, rv32m::MULDIV, |m, o| scalar::alu_reg(m, o, AluOp::Remu)),
        // Register-immediate
        on_funct3("addi", i_op::OP_IMM, i_f3::ADD_SUB, Alu, |m, o| scalar::alu_imm(m, o, AluOp::Add)),
        on_funct3("slti", i_op::OP_IMM, i_f3::SLT, Alu, |m, o| scalar::alu_imm(m, o, AluOp::Slt)),
        on_funct3("sltiu", i_op::OP_IMM, i_f3::SLTU, Alu, |m, o| scalar::alu_imm(m, o, AluOp::Sltu)),
        on_funct3("xori", i_op::OP_IMM, i_f3::XOR, Alu, |m, o| scalar::alu_imm(m, o, AluOp::Xor)),
        on_funct3("ori", i_op::OP_IMM, i_f3::OR, Alu, |m, o| scalar::alu_imm(m, o, AluOp::Or)),
        on_funct3("andi", i_op::OP_IMM, i_f3::AND, Alu, |m, o| scalar::alu_imm(m, o, AluOp::And)),
        on_funct3("slli", i_op::OP_IMM, i_f3::SLL, Alu, |m, o| scalar::alu_imm(m, o, AluOp::Sll)),
        on_funct3("srli/srai", i_op::OP_IMM, i_f3::SRL_SRA, Alu, scalar::shift_right_imm),
        // Loads
        on_funct3("lb", i_op::OP_LOAD, i_f3::LB, Load, |m, o| scalar::load(m, o, 1, true)),
        on_funct3("lh", i_op::OP_LOAD, i_f3::LH, Load, |m, o| scalar::load(m, o, 2, true)),
        on_funct3("lw", i_op::OP_LOAD, i_f3::LW, Load, |m, o| scalar::load(m, o, 4, true)),
        on_funct3("lbu", i_op::OP_LOAD, i_f3::LBU, Load, |m, o| scalar::load(m, o, 1, false)),
        on_funct3("lhu", i_op::OP_LOAD, i_f3::LHU, Load, |m, o| scalar::load(m, o, 2, false)),
        // Stores
        on_funct3("sb", i_op::OP_STORE, i_f3::SB, Store, |m, o| scalar::store(m, o, 1)),
        on_funct3("sh", i_op::OP_STORE, i_f3::SH, Store, |m, o| scalar::store(m, o, 2)),
        on_funct3("sw", i_op::OP_STORE, i_f3::SW, Store, |m, o| scalar::store(m, o, 4)),
        // Branches
        on_funct3("beq", i_op::OP_BRANCH, i_f3::BEQ, Branch, |m, o| scalar::branch(m, o, Condition::Eq)),
        on_funct3("bne", i_op::OP_BRANCH, i_f3::BNE, Branch, |m, o| scalar::branch(m, o, Condition::Ne)),
        on_funct3("blt", i_op::OP_BRANCH, i_f3::BLT, Branch, |m, o| scalar::branch(m, o, Condition::Lt)),
        on_funct3("bge", i_op::OP_BRANCH, i_f3::BGE, Branch, |m, o| scalar::branch(m, o, Condition::Ge)),
        on_funct3("bltu", i_op::OP_BRANCH, i_f3::BLTU, Branch, |m, o| scalar::branch(m, o, Condition::Ltu)),
        on_funct3("bgeu", i_op::OP_BRANCH, i_f3::BGEU, Branch, |m, o| scalar::branch(m, o, Condition::Geu)),
        // Jumps and upper immediates
        on_funct3("jalr", i_op::OP_JALR, i_f3::JALR, Jump, scalar::jalr),
        entry("jal", i_op::OP_JAL, Selector::Any, FunctSelector::Any, Jump, scalar::jal),
        entry("lui", i_op::OP_LUI, Selector::Any, FunctSelector::Any, Upper, scalar::lui),
        entry("auipc", i_op::OP_AUIPC, Selector::Any, FunctSelector::Any, Upper, scalar::auipc),
        // Vector
        on_funct3("lv", v_op::OP_VLOAD, v_f3::VMEM_UNIT, VectorMemory, vector::load),
        on_funct3("sv", v_op::OP_VSTORE, v_f3::VMEM_UNIT, VectorMemory, vector::store),
        varith("vadd.vv", v_f3::OPIVV, v_f6::VADD, |m, o| vector::arith(m, o, VectorOp::Add)),
        varith("vsub.vv", v_f3::OPIVV, v_f6::VSUB, |m, o| vector::arith(m, o, VectorOp::Sub)),
        varith("vand.vv", v_f3::OPIVV, v_f6::VAND, |m, o| vector::arith(m, o, VectorOp::And)),
        varith("vor.vv", v_f3::OPIVV, v_f6::VOR, |m, o| vector::arith(m, o, VectorOp::Or)),
        varith("vxor.vv", v_f3::OPIVV, v_f6::VXOR, |m, o| vector::arith(m, o, VectorOp::Xor)),
        varith("vmul.vv", v_f3::OPMVV, v_f6::VMUL, |m, o| vector::arith(m, o, VectorOp::Mul)),
        on_funct3("vsetvl", v_op::OP_V, v_f3::OPCFG, VectorConfig, vector::setvl),
    ]
}
