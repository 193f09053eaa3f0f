//! # Run Statistics Tests
//!
//! Ensures `RunStats` counts each instruction class and branch outcome, and
//! that the summary reports them.

use pretty_assertions::assert_eq;
use vecsim_core::stats::{InstructionClass, RunStats};

#[test]
fn test_record_counts_classes() {
    let mut stats = RunStats::default();
    for class in [
        InstructionClass::Alu,
        InstructionClass::Alu,
        InstructionClass::Load,
        InstructionClass::Store,
        InstructionClass::Jump,
        InstructionClass::Upper,
        InstructionClass::VectorMemory,
        InstructionClass::VectorArith,
        InstructionClass::VectorConfig,
    ] {
        stats.record(class, false);
    }
    assert_eq!(
        stats,
        RunStats {
            steps: 9,
            alu: 2,
            load: 1,
            store: 1,
            branch_taken: 0,
            branch_not_taken: 0,
            jump: 1,
            upper: 1,
            vector_memory: 1,
            vector_arith: 1,
            vector_config: 1,
        }
    );
}

#[test]
fn test_branch_outcomes() {
    let mut stats = RunStats::default();
    stats.record(InstructionClass::Branch, true);
    stats.record(InstructionClass::Branch, true);
    stats.record(InstructionClass::Branch, false);
    assert_eq!(stats.branch_taken, 2);
    assert_eq!(stats.branch_not_taken, 1);
    assert_eq!(stats.steps, 3);
}

#[test]
fn test_taken_flag_is_ignored_for_non_branches() {
    let mut stats = RunStats::default();
    stats.record(InstructionClass::Jump, true);
    assert_eq!(stats.jump, 1);
    assert_eq!(stats.branch_taken, 0);
}

#[test]
fn test_summary_of_empty_run() {
    let summary = RunStats::default().summary();
    assert!(summary.contains("RUN STATISTICS"));
    assert!(summary.contains("op.alu                 0 (0.00%)"), "{summary}");
}

#[test]
fn test_summary_percentages() {
    let mut stats = RunStats::default();
    stats.record(InstructionClass::Alu, false);
    stats.record(InstructionClass::Alu, false);
    stats.record(InstructionClass::Alu, false);
    stats.record(InstructionClass::Branch, true);
    let summary = stats.summary();
    assert!(summary.contains("op.alu                 3 (75.00%)"), "{summary}");
    assert!(summary.contains("op.branch              1 (25.00%)"), "{summary}");
    assert!(summary.contains("br.taken               1"), "{summary}");
}
