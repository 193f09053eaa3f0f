//! # Test Harness
//!
//! `TestContext` wraps a freshly built `Machine`. Tests load either assembly
//! source or raw words, run, and then assert on registers, vector lanes, and
//! memory through the accessors here.

use tracing_subscriber::EnvFilter;
use vecsim_core::common::SimError;
use vecsim_core::config::Config;
use vecsim_core::{Machine, RunStatus, assemble_source};

/// Routes `tracing` output through the libtest writer. Set `RUST_LOG` to see it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// A machine under test.
#[derive(Debug)]
pub struct TestContext {
    /// The machine; fields are public so tests can poke state directly.
    pub machine: Machine,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// A machine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// A machine with a custom configuration.
    pub fn with_config(config: &Config) -> Self {
        init_tracing();
        let machine = Machine::new(config).expect("test configuration is valid");
        Self { machine }
    }

    /// Assembles `source` and loads its words and data vectors.
    pub fn load_source(mut self, source: &str) -> Self {
        let program = assemble_source(source).expect("test program assembles");
        let _ = self.machine.load(&program).expect("test program loads");
        self
    }

    /// Loads raw instruction words at address 0.
    pub fn load_words(mut self, words: &[u32]) -> Self {
        self.machine.load_program(words).expect("test words load");
        self
    }

    /// Runs to completion or error.
    pub fn run(&mut self) -> Result<RunStatus, SimError> {
        self.machine.run()
    }

    /// Runs and requires normal completion; returns the step count.
    pub fn run_to_completion(&mut self) -> u64 {
        match self.machine.run() {
            Ok(RunStatus::Completed { steps }) => steps,
            other => panic!("expected completion, got {other:?}"),
        }
    }

    /// Sets an integer register.
    pub fn set_reg(&mut self, idx: usize, value: u32) {
        self.machine.regs.write(idx, value);
    }

    /// Reads an integer register.
    pub fn reg(&self, idx: usize) -> u32 {
        self.machine.regs.read(idx)
    }

    /// Reads an integer register as signed.
    pub fn reg_i32(&self, idx: usize) -> i32 {
        self.machine.regs.read(idx) as i32
    }

    /// Reads lane `lane` of vector register `vreg`.
    pub fn lane(&self, vreg: usize, lane: usize) -> u64 {
        self.machine.vregs.read_lane(vreg, lane)
    }

    /// Reads `size` bytes of memory at `addr`.
    pub fn mem(&self, addr: u64, size: usize) -> u64 {
        self.machine.memory.read(addr, size).expect("address in range")
    }
}

/// Assembles, loads, and runs `source` on a default machine.
pub fn run_source(source: &str) -> TestContext {
    let mut ctx = TestContext::new().load_source(source);
    let _ = ctx.run_to_completion();
    ctx
}
