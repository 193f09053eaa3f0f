//! # Execution Engine Tests
//!
//! Run-loop termination, fatal errors and their precedence, the step
//! ceiling, machine construction, loading limits, statistics, and dumps.

use pretty_assertions::assert_eq;
use vecsim_core::common::{ConfigError, SimError};
use vecsim_core::config::Config;
use vecsim_core::isa::decode::decode;
use vecsim_core::isa::encoding;
use vecsim_core::isa::rv32i::{funct3, opcodes};
use vecsim_core::isa::rvv::{funct3 as v_f3, funct6 as v_f6, opcodes as v_op};
use vecsim_core::{Machine, RunStatus, assemble_source};

use crate::common::harness::{TestContext, run_source};

const NOP: u32 = encoding::i_type(opcodes::OP_IMM, 0, funct3::ADD_SUB, 0, 0);

// ─── Termination ────────────────────────────────────────────

#[test]
fn test_empty_program_completes_immediately() {
    let mut ctx = TestContext::new().load_words(&[]);
    assert_eq!(ctx.run(), Ok(RunStatus::Completed { steps: 0 }));
}

#[test]
fn test_run_ends_when_pc_leaves_program() {
    let mut ctx = TestContext::new().load_source("ADDI x1, x0, 2000\nJALR x0, 0(x1)\nADDI x2, x0, 1");
    assert_eq!(ctx.run(), Ok(RunStatus::Completed { steps: 2 }));
    assert_eq!(ctx.reg(2), 0);
    assert_eq!(ctx.machine.pc, 2000);
}

#[test]
fn test_step_limit_stops_infinite_loop() {
    let mut ctx = TestContext::new().load_source("loop: JAL x0, loop");
    ctx.machine.set_step_limit(10);
    assert_eq!(ctx.run(), Ok(RunStatus::StepLimitExceeded { steps: 10 }));
    assert_eq!(ctx.machine.stats.jump, 10);
    assert_eq!(ctx.machine.pc, 0);
}

#[test]
fn test_default_step_limit() {
    let mut ctx = TestContext::new().load_source("loop: JAL x0, loop");
    assert_eq!(ctx.machine.step_limit(), 1024);
    let status = ctx.run().expect("no fatal error");
    assert_eq!(status, RunStatus::StepLimitExceeded { steps: 1024 });
    assert_eq!(status.steps(), 1024);
}

#[test]
fn test_step_limit_equal_to_program_length_completes() {
    let mut config = Config::default();
    config.general.step_limit = 3;
    let mut ctx = TestContext::with_config(&config).load_words(&[NOP, NOP, NOP]);
    assert_eq!(ctx.run(), Ok(RunStatus::Completed { steps: 3 }));

    let mut short = TestContext::with_config(&config).load_words(&[NOP, NOP, NOP, NOP]);
    assert_eq!(short.run(), Ok(RunStatus::StepLimitExceeded { steps: 3 }));
}

// ─── Fatal errors ───────────────────────────────────────────

#[test]
fn test_unknown_instruction_halts_with_context() {
    let word = 0xFFFF_FFFF;
    let mut ctx = TestContext::new().load_words(&[NOP, word]);
    assert_eq!(
        ctx.run(),
        Err(SimError::UnknownInstruction {
            pc: 4,
            word,
            key: decode(word).dispatch_key(),
        })
    );
    assert_eq!(ctx.machine.stats.steps, 1);
}

#[test]
fn test_zero_word_is_unknown() {
    let mut ctx = TestContext::new().load_words(&[0]);
    assert!(matches!(
        ctx.run(),
        Err(SimError::UnknownInstruction { pc: 0, word: 0, .. })
    ));
}

#[test]
fn test_scalar_register_out_of_range() {
    let word = encoding::r_type(opcodes::OP_REG, 20, funct3::ADD_SUB, 1, 2, 0);
    let mut ctx = TestContext::new().load_words(&[word]);
    assert_eq!(
        ctx.run(),
        Err(SimError::RegisterOutOfRange {
            pc: 0,
            file: 'x',
            index: 20,
            size: 16,
        })
    );
}

#[test]
fn test_vector_register_out_of_range() {
    let word = encoding::v_type(v_op::OP_V, 3, v_f3::OPIVV, 1, 31, v_f6::VADD, true);
    let mut ctx = TestContext::new().load_words(&[word]);
    assert_eq!(
        ctx.run(),
        Err(SimError::RegisterOutOfRange {
            pc: 0,
            file: 'v',
            index: 31,
            size: 16,
        })
    );
}

#[test]
fn test_unknown_instruction_is_reported_before_register_range() {
    let word = encoding::r_type(opcodes::OP_REG, 20, funct3::ADD_SUB, 1, 2, 0x7F);
    let mut ctx = TestContext::new().load_words(&[word]);
    assert!(matches!(
        ctx.run(),
        Err(SimError::UnknownInstruction { .. })
    ));
}

#[test]
fn test_store_out_of_bounds() {
    let mut ctx = TestContext::new().load_source("ADDI x1, x0, 1022\nSW x1, 0(x1)");
    assert_eq!(
        ctx.run(),
        Err(SimError::MemoryOutOfBounds {
            addr: 1022,
            size: 4,
            capacity: 1024,
        })
    );
    assert_eq!(ctx.machine.stats.steps, 1);
}

#[test]
fn test_error_display_names_the_instruction() {
    let err = SimError::UnknownInstruction {
        pc: 8,
        word: 0xFFFF_FFFF,
        key: decode(0xFFFF_FFFF).dispatch_key(),
    };
    let text = err.to_string();
    assert!(text.contains("0xffffffff"), "{text}");
    assert!(text.contains("opcode=0b1111111"), "{text}");
}

// ─── Construction and loading ───────────────────────────────

#[test]
fn test_machine_rejects_invalid_configuration() {
    let mut config = Config::default();
    config.memory.size = 2;
    assert!(matches!(
        Machine::new(&config),
        Err(SimError::InvalidConfig(ConfigError::MemoryTooSmall(2)))
    ));

    let mut config = Config::default();
    config.vector.sew = 7;
    assert!(matches!(
        Machine::new(&config),
        Err(SimError::InvalidConfig(ConfigError::InvalidSew(7)))
    ));
}

#[test]
fn test_program_region_limit() {
    let mut machine = Machine::new(&Config::default()).expect("default config");
    machine.load_program(&[NOP; 128]).expect("128 words fit");
    assert_eq!(machine.program_end(), 512);
    assert_eq!(
        machine.load_program(&[NOP; 129]),
        Err(SimError::ProgramTooLarge {
            bytes: 516,
            limit: 512,
        })
    );
}

#[test]
fn test_data_region_limit() {
    let fits = format!("data: big, {}", vec!["1"; 64].join(", "));
    let program = assemble_source(&fits).expect("assembles");
    let mut machine = Machine::new(&Config::default()).expect("default config");
    let placements = machine.load(&program).expect("64 values fill the data region");
    assert_eq!(placements[0].addr, 512);
    assert_eq!(placements[0].len, 64);

    let overflow = format!("{fits}\ndata: extra, 1");
    let program = assemble_source(&overflow).expect("assembles");
    assert_eq!(
        machine.load(&program),
        Err(SimError::DataOverflow {
            name: "extra".to_string(),
            addr: 1024,
            bytes: 8,
            capacity: 1024,
        })
    );
}

#[test]
fn test_reload_resets_pc() {
    let mut ctx = TestContext::new().load_words(&[NOP, NOP]);
    let _ = ctx.run_to_completion();
    assert_eq!(ctx.machine.pc, 8);
    ctx.machine.load_program(&[NOP]).expect("fits");
    assert_eq!(ctx.machine.pc, 0);
    assert_eq!(ctx.machine.program_end(), 4);
}

// ─── Statistics, tracing, and dumps ─────────────────────────

const SCENARIO: &str = "ADDI x10, x0, 5\n\
                        ADDI x11, x0, 6\n\
                        ADD x12, x10, x11\n\
                        SW x11, 0(x0)\n\
                        LW x1, 0(x0)\n";

#[test]
fn test_statistics_count_each_class() {
    let ctx = run_source(SCENARIO);
    let stats = &ctx.machine.stats;
    assert_eq!(stats.steps, 5);
    assert_eq!(stats.alu, 3);
    assert_eq!(stats.store, 1);
    assert_eq!(stats.load, 1);
    assert_eq!(stats.branch_taken + stats.branch_not_taken, 0);
    assert!(stats.summary().contains("steps                    5"));
}

#[test]
fn test_tracing_does_not_change_results() {
    let plain = run_source(SCENARIO);
    let mut traced = TestContext::new().load_source(SCENARIO);
    traced.machine.set_trace(true);
    let _ = traced.run_to_completion();
    assert_eq!(plain.machine.regs, traced.machine.regs);
    assert_eq!(plain.machine.stats, traced.machine.stats);
}

#[test]
fn test_runs_are_deterministic() {
    let a = run_source(SCENARIO);
    let b = run_source(SCENARIO);
    assert_eq!(a.machine.regs.snapshot(), b.machine.regs.snapshot());
    assert_eq!(a.machine.memory, b.machine.memory);
}

#[test]
fn test_register_dump() {
    let ctx = run_source(SCENARIO);
    let dump = ctx.machine.dump_registers();
    assert!(dump.starts_with("pc =0x00000014"), "{dump}");
    assert!(dump.contains("x12=0x0000000b"), "{dump}");
    assert!(dump.contains("x1 =0x00000006"), "{dump}");
    assert!(dump.contains("f14=0"), "{dump}");
    assert_eq!(dump.lines().count(), 1 + 8 + 8);
}

#[test]
fn test_vector_dump() {
    let ctx = run_source("data: a, 3\nLV v2, 512(x0)");
    let dump = ctx.machine.dump_vectors();
    assert!(dump.starts_with("vlen=512 sew=64 lmul=1 vl=8"), "{dump}");
    assert!(dump.contains("v2"), "{dump}");
    assert_eq!(dump.lines().count(), 2);
}
