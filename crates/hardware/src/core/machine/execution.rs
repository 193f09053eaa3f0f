//! Main Execution Loop.
//!
//! This module implements the execution cycle of the machine. It performs the following:
//! 1. **Fetch:** Reads the word at `pc` and advances `pc` by one instruction.
//! 2. **Decode and Validate:** Decodes the word, resolves its dispatch entry, and
//!    rejects register indices outside the register files.
//! 3. **Execute:** Invokes the handler with the instruction's own address.
//! 4. **Observability:** Records run statistics and traces each step.

use tracing::{debug, info, trace, warn};

use super::Machine;
use crate::common::{INSTRUCTION_SIZE, NUM_GPRS, NUM_VREGS, SimError};
use crate::core::handlers::Operands;
use crate::isa::decode::decode;
use crate::isa::disasm::disassemble;
use crate::isa::instruction::Decoded;
use crate::isa::rvv::funct3 as v_f3;

/// How a run ended when no fatal error occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// The PC reached the end of the program.
    Completed {
        /// Instructions executed.
        steps: u64,
    },
    /// The step ceiling was reached first. The machine state is left intact.
    StepLimitExceeded {
        /// Instructions executed.
        steps: u64,
    },
}

impl RunStatus {
    /// Instructions executed during the run.
    pub const fn steps(&self) -> u64 {
        match *self {
            Self::Completed { steps } | Self::StepLimitExceeded { steps } => steps,
        }
    }
}

impl Machine {
    /// Executes one instruction.
    ///
    /// # Returns
    ///
    /// `Ok(())` after the handler ran, or the fatal error that stopped it.
    pub fn step(&mut self) -> Result<(), SimError> {
        let pc = self.pc;
        let word = self.memory.read_u32(pc)?;
        self.pc = pc.wrapping_add(INSTRUCTION_SIZE);

        let decoded = decode(word);
        let key = decoded.dispatch_key();
        let entry = *self
            .dispatch
            .lookup(&key)
            .ok_or_else(|| SimError::UnknownInstruction { pc, word, key })?;
        check_registers(pc, &decoded)?;

        trace!(pc, word, name = entry.name, "step");
        if self.trace {
            debug!("{pc:#06x}: {word:#010x}  {}", disassemble(word));
        }

        (entry.handler)(self, Operands::from_decoded(pc, &decoded))?;

        let taken = self.pc != pc.wrapping_add(INSTRUCTION_SIZE);
        self.stats.record(entry.class, taken);
        Ok(())
    }

    /// Runs until the PC leaves the program or the step ceiling is hit.
    ///
    /// # Returns
    ///
    /// The run status, or the first fatal error. Statistics cover the
    /// steps executed so far in either case.
    pub fn run(&mut self) -> Result<RunStatus, SimError> {
        let mut steps = 0u64;
        while self.pc < self.program_end {
            if steps >= self.step_limit {
                warn!(steps, pc = self.pc, "step limit reached");
                return Ok(RunStatus::StepLimitExceeded { steps });
            }
            self.step()?;
            steps += 1;
        }
        info!(steps, "program completed");
        Ok(RunStatus::Completed { steps })
    }
}

fn check(pc: u32, file: char, index: usize, size: usize) -> Result<(), SimError> {
    if index < size {
        Ok(())
    } else {
        Err(SimError::RegisterOutOfRange {
            pc,
            file,
            index,
            size,
        })
    }
}

fn check_registers(pc: u32, decoded: &Decoded) -> Result<(), SimError> {
    let x = |index| check(pc, 'x', index, NUM_GPRS);
    let v = |index| check(pc, 'v', index, NUM_VREGS);
    match *decoded {
        Decoded::Register { rd, rs1, rs2, .. } => {
            x(rd)?;
            x(rs1)?;
            x(rs2)
        }
        Decoded::Immediate { rd, rs1, .. } => {
            x(rd)?;
            x(rs1)
        }
        Decoded::Store { rs1, rs2, .. } | Decoded::Branch { rs1, rs2, .. } => {
            x(rs1)?;
            x(rs2)
        }
        Decoded::Upper { rd, .. } | Decoded::Jump { rd, .. } => x(rd),
        Decoded::VectorMemory { vreg, rs1, .. } => {
            v(vreg)?;
            x(rs1)
        }
        Decoded::VectorArith {
            vd, vs1, funct3, ..
        } if funct3 == v_f3::OPCFG => {
            x(vd)?;
            x(vs1)
        }
        Decoded::VectorArith { vd, vs1, vs2, .. } => {
            v(vd)?;
            v(vs1)?;
            v(vs2)
        }
    }
}
