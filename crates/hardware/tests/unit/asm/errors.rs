//! # Assembly Error Tests
//!
//! Every error variant, with the line number (and address where one exists)
//! it reports.

use pretty_assertions::assert_eq;
use rstest::rstest;
use vecsim_core::assemble_source;
use vecsim_core::common::AsmError;
use vecsim_core::isa::metadata::Format;

fn error(source: &str) -> AsmError {
    assemble_source(source).expect_err("source must be rejected")
}

#[test]
fn test_unknown_mnemonic_reports_line_and_address() {
    assert_eq!(
        error("ADDI x1, x0, 1\n# comment\nbogus x1, x2"),
        AsmError::UnknownMnemonic {
            line: 3,
            addr: 4,
            mnemonic: "BOGUS".to_string(),
        }
    );
}

#[test]
fn test_float_mnemonic_is_not_encodable() {
    assert_eq!(
        error("ADDI x1, x0, 1\nFADD.S f1, f2, f3"),
        AsmError::EncodingNotImplemented {
            line: 2,
            addr: 4,
            mnemonic: "FADD.S".to_string(),
            format: Format::Fp,
        }
    );
}

#[test]
fn test_unresolved_branch_target() {
    assert_eq!(
        error("BEQ x0, x0, nowhere"),
        AsmError::UnresolvedSymbol {
            line: 1,
            symbol: "nowhere".to_string(),
        }
    );
}

#[test]
fn test_unresolved_data_value() {
    assert_eq!(
        error("ADDI x1, x0, 1\ndata: v, 1, missing"),
        AsmError::UnresolvedSymbol {
            line: 2,
            symbol: "missing".to_string(),
        }
    );
}

#[test]
fn test_duplicate_label() {
    assert_eq!(
        error("a: ADDI x1, x0, 1\nADDI x1, x1, 1\na:"),
        AsmError::DuplicateLabel {
            line: 3,
            label: "a".to_string(),
            previous: 0,
        }
    );
}

#[rstest]
#[case::gpr_index("ADDI x16, x0, 1", "x16")]
#[case::gpr_index_source("ADD x1, x2, x99", "x99")]
#[case::vreg_index("VADD.VV v16, v1, v2", "v16")]
#[case::imm12_high("ADDI x1, x0, 4096", "4096")]
#[case::imm12_low("ADDI x1, x0, -2049", "-2049")]
#[case::shamt("SLLI x1, x1, 32", "32")]
#[case::negative_shamt("SRLI x1, x1, -1", "-1")]
#[case::upper("LUI x1, 0x100000", "0x100000")]
#[case::odd_branch("BEQ x0, x0, 3", "3")]
#[case::far_branch("BNE x0, x0, 4096", "4096")]
#[case::odd_jump("JAL x1, 7", "7")]
#[case::load_offset("LW x1, 5000(x2)", "5000")]
fn test_operand_out_of_range(#[case] source: &str, #[case] operand: &str) {
    match error(source) {
        AsmError::OperandOutOfRange {
            line, operand: got, ..
        } => {
            assert_eq!(line, 1);
            assert_eq!(got, operand);
        }
        other => panic!("expected OperandOutOfRange, got {other:?}"),
    }
}

#[rstest]
#[case::missing_operand("ADD x1, x2")]
#[case::extra_operand("ADD x1, x2, x3, x4")]
#[case::bad_immediate("ADDI x1, x0, abc")]
#[case::vector_where_scalar("ADD x1, v2, x3")]
#[case::scalar_where_vector("VADD.VV x1, v2, v3")]
#[case::missing_memory_operand("LW x1")]
#[case::bad_label("1st: ADDI x1, x0, 1")]
#[case::nameless_data("data:")]
fn test_syntax_errors(#[case] source: &str) {
    assert!(
        matches!(error(source), AsmError::SyntaxError { line: 1, .. }),
        "{source}"
    );
}

#[test]
fn test_first_error_wins_and_nothing_is_emitted() {
    let result = assemble_source("ADDI x1, x0, 1\nADD x1, x2\nbogus");
    assert!(matches!(result, Err(AsmError::SyntaxError { line: 2, .. })));
}

#[test]
fn test_error_messages_carry_the_line() {
    let message = error("\n\nFOO x1").to_string();
    assert!(message.starts_with("line 3"), "{message}");
    assert!(message.contains("FOO"), "{message}");
}

#[test]
fn test_data_names_are_not_immediates() {
    assert_eq!(
        error("data: a, 1, 2\nADDI x1, x0, 4\nADDI x3, x0, a"),
        AsmError::SyntaxError {
            line: 3,
            reason: "ADDI: expected an immediate, found `a`".to_string(),
        }
    );
}
