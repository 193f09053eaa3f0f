//! Machine Definition and Initialization.
//!
//! This module defines the `Machine` structure, the container for the entire
//! architectural state. It coordinates the following:
//! 1. **State Management:** Integer, float, and vector register files plus the PC.
//! 2. **Memory:** One flat memory shared by the program image and data vectors.
//! 3. **Dispatch:** The validated dispatch table used by the run loop.
//! 4. **Loading:** Placing an assembled program and its data vectors in memory.

/// Fetch/decode/dispatch loop.
pub mod execution;

use tracing::debug;

use crate::asm::Program;
use crate::common::SimError;
use crate::config::Config;
use crate::core::arch::fpr::Fpr;
use crate::core::arch::gpr::Gpr;
use crate::core::arch::vpr::VectorRegisterFile;
use crate::core::dispatch::DispatchTable;
use crate::core::memory::Memory;
use crate::sim::loader::{self, DataPlacement};
use crate::stats::RunStats;

pub use self::execution::RunStatus;

/// Complete architectural state of one simulation session.
///
/// A machine is exclusively owned by whoever drives its run loop; nothing is
/// shared between machines.
#[derive(Debug)]
pub struct Machine {
    /// General-purpose registers.
    pub regs: Gpr,
    /// Reserved floating-point registers.
    pub fregs: Fpr,
    /// Vector registers and their configuration.
    pub vregs: VectorRegisterFile,
    /// Flat memory.
    pub memory: Memory,
    /// Program counter (byte address of the next fetch).
    pub pc: u32,
    /// Counters for the current run.
    pub stats: RunStats,

    program_end: u32,
    step_limit: u64,
    trace: bool,
    dispatch: DispatchTable,
    config: Config,
}

impl Machine {
    /// Builds a zeroed machine from a configuration.
    ///
    /// # Returns
    ///
    /// The machine, or `InvalidConfig` / `DispatchCollision` if the
    /// configuration or the dispatch table is inconsistent.
    pub fn new(config: &Config) -> Result<Self, SimError> {
        config.validate()?;
        let vregs =
            VectorRegisterFile::new(config.vector.vlen, config.vector.sew, config.vector.lmul)?;
        let dispatch = DispatchTable::standard()?;
        debug!(
            memory = config.memory.size,
            vlen = config.vector.vlen,
            sew = config.vector.sew,
            entries = dispatch.len(),
            "machine initialised"
        );
        Ok(Self {
            regs: Gpr::new(),
            fregs: Fpr::new(),
            vregs,
            memory: Memory::new(config.memory.size),
            pc: 0,
            stats: RunStats::default(),
            program_end: 0,
            step_limit: config.general.step_limit,
            trace: config.general.trace_instructions,
            dispatch,
            config: config.clone(),
        })
    }

    /// Byte length of the loaded program; the run loop stops when `pc` reaches it.
    pub const fn program_end(&self) -> u32 {
        self.program_end
    }

    /// Maximum number of steps `run` executes.
    pub const fn step_limit(&self) -> u64 {
        self.step_limit
    }

    /// Overrides the step ceiling.
    pub const fn set_step_limit(&mut self, limit: u64) {
        self.step_limit = limit;
    }

    /// Enables or disables per-instruction debug logging.
    pub const fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    /// Writes program words at address 0 and resets the PC.
    ///
    /// # Returns
    ///
    /// `ProgramTooLarge` if the image exceeds the program region.
    pub fn load_program(&mut self, words: &[u32]) -> Result<(), SimError> {
        let end = loader::load_program(
            &mut self.memory,
            words,
            self.config.memory.max_program_bytes,
        )?;
        self.program_end = end as u32;
        self.pc = 0;
        Ok(())
    }

    /// Loads an assembled program and its data vectors.
    ///
    /// # Returns
    ///
    /// Where each data vector was placed, in declaration order.
    pub fn load(&mut self, program: &Program) -> Result<Vec<DataPlacement>, SimError> {
        self.load_program(&program.words)?;
        loader::load_data(&mut self.memory, self.config.memory.data_base, &program.data)
    }

    /// Renders the PC, the integer register file, and the reserved float file.
    pub fn dump_registers(&self) -> String {
        format!(
            "pc ={:#010x}\n{}{}",
            self.pc,
            self.regs.dump(),
            self.fregs.dump()
        )
    }

    /// Renders every vector register holding a non-zero lane, with the vector configuration.
    pub fn dump_vectors(&self) -> String {
        format!(
            "vlen={} sew={} lmul={} vl={}\n{}",
            self.vregs.vlen(),
            self.vregs.sew(),
            self.vregs.lmul(),
            self.vregs.vl(),
            self.vregs.dump_nonzero()
        )
    }
}
