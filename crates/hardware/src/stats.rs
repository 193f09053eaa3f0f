//! Run statistics collection and reporting.
//!
//! This module tracks what a run executed. It provides:
//! 1. **Step count:** Total instructions executed.
//! 2. **Instruction mix:** Counts by class (ALU, load, store, branch, jump, vector).
//! 3. **Branch outcome:** Taken and not-taken conditional branches.

use std::fmt::Write as _;

/// Broad class of an instruction, recorded per executed step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstructionClass {
    /// Register-register or register-immediate arithmetic.
    Alu,
    /// Scalar load.
    Load,
    /// Scalar store.
    Store,
    /// Conditional branch.
    Branch,
    /// JAL or JALR.
    Jump,
    /// LUI or AUIPC.
    Upper,
    /// Vector load or store.
    VectorMemory,
    /// Lane-wise vector arithmetic.
    VectorArith,
    /// Vector configuration.
    VectorConfig,
}

/// Counters for one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Instructions executed.
    pub steps: u64,
    /// ALU instructions executed.
    pub alu: u64,
    /// Scalar loads executed.
    pub load: u64,
    /// Scalar stores executed.
    pub store: u64,
    /// Conditional branches that redirected the PC.
    pub branch_taken: u64,
    /// Conditional branches that fell through.
    pub branch_not_taken: u64,
    /// Unconditional jumps executed.
    pub jump: u64,
    /// Upper-immediate instructions executed.
    pub upper: u64,
    /// Vector loads and stores executed.
    pub vector_memory: u64,
    /// Vector arithmetic instructions executed.
    pub vector_arith: u64,
    /// Vector configuration instructions executed.
    pub vector_config: u64,
}

impl RunStats {
    /// Records one executed instruction.
    ///
    /// # Arguments
    ///
    /// * `class` - Class of the instruction.
    /// * `taken` - For branches, whether the branch redirected the PC.
    pub const fn record(&mut self, class: InstructionClass, taken: bool) {
        self.steps += 1;
        match class {
            InstructionClass::Alu => self.alu += 1,
            InstructionClass::Load => self.load += 1,
            InstructionClass::Store => self.store += 1,
            InstructionClass::Branch if taken => self.branch_taken += 1,
            InstructionClass::Branch => self.branch_not_taken += 1,
            InstructionClass::Jump => self.jump += 1,
            InstructionClass::Upper => self.upper += 1,
            InstructionClass::VectorMemory => self.vector_memory += 1,
            InstructionClass::VectorArith => self.vector_arith += 1,
            InstructionClass::VectorConfig => self.vector_config += 1,
        }
    }

    /// Renders the counters as an aligned report.
    pub fn summary(&self) -> String {
        let total = self.steps.max(1) as f64;
        let pct = |n: u64| (n as f64 / total) * 100.0;
        let mut out = String::new();
        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(out, "RUN STATISTICS");
        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(out, "steps                    {}", self.steps);
        let _ = writeln!(out, "----------------------------------------------------------");
        let _ = writeln!(out, "INSTRUCTION MIX");
        let rows = [
            ("op.alu", self.alu),
            ("op.load", self.load),
            ("op.store", self.store),
            ("op.branch", self.branch_taken + self.branch_not_taken),
            ("op.jump", self.jump),
            ("op.upper", self.upper),
            ("op.vector_mem", self.vector_memory),
            ("op.vector_arith", self.vector_arith),
            ("op.vector_config", self.vector_config),
        ];
        for (name, count) in rows {
            let _ = writeln!(out, "  {name:<22} {count} ({:.2}%)", pct(count));
        }
        let _ = writeln!(out, "----------------------------------------------------------");
        let _ = writeln!(out, "BRANCHES");
        let _ = writeln!(out, "  br.taken               {}", self.branch_taken);
        let _ = writeln!(out, "  br.not_taken           {}", self.branch_not_taken);
        out
    }
}
