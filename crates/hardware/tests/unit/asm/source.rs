//! # Source Line Tests

use pretty_assertions::assert_eq;
use rstest::rstest;
use vecsim_core::asm::source::{self, LineKind, SourceLine, classify, is_valid_label, tokenize};
use vecsim_core::common::AsmError;

fn line(number: usize, text: &str) -> SourceLine {
    SourceLine {
        number,
        text: text.to_string(),
    }
}

#[test]
fn test_lines_drop_comments_and_blanks_but_keep_numbers() {
    let text = "# header\nADDI x1, x0, 1   # one\n\n   \nloop:\n";
    assert_eq!(
        source::lines(text),
        vec![line(2, "ADDI x1, x0, 1"), line(5, "loop:")]
    );
}

#[test]
fn test_lines_of_empty_source() {
    assert!(source::lines("").is_empty());
    assert!(source::lines("# only a comment\n\n").is_empty());
}

#[rstest]
#[case("LW x1, 8(x2)", &["LW", "x1", "8", "x2"])]
#[case("ADD   x1,x2 ,  x3", &["ADD", "x1", "x2", "x3"])]
#[case("LW x1, (x2)", &["LW", "x1", "x2"])]
#[case("data: vec, 1, -2", &["data:", "vec", "1", "-2"])]
fn test_tokenize(#[case] text: &str, #[case] expected: &[&str]) {
    assert_eq!(tokenize(text), expected);
}

#[rstest]
#[case("loop", true)]
#[case("_start", true)]
#[case("loop_2.end", true)]
#[case("2loop", false)]
#[case("", false)]
#[case("a-b", false)]
fn test_label_names(#[case] name: &str, #[case] valid: bool) {
    assert_eq!(is_valid_label(name), valid);
}

#[test]
fn test_classify_label_alone() {
    let l = line(1, "loop:");
    assert_eq!(
        classify(&l).expect("valid"),
        LineKind::Label {
            name: "loop",
            rest: None
        }
    );
}

#[test]
fn test_classify_label_with_instruction() {
    let l = line(1, "loop: ADDI x1, x1, -1");
    assert_eq!(
        classify(&l).expect("valid"),
        LineKind::Label {
            name: "loop",
            rest: Some("ADDI x1, x1, -1")
        }
    );
}

#[rstest]
#[case("data: vec, 1, 2")]
#[case("DATA: vec, 1, 2")]
fn test_classify_data(#[case] text: &str) {
    let l = line(1, text);
    assert_eq!(classify(&l).expect("valid"), LineKind::Data("vec, 1, 2"));
}

#[test]
fn test_classify_instruction() {
    let l = line(1, "ADD x1, x2, x3");
    assert_eq!(
        classify(&l).expect("valid"),
        LineKind::Instruction("ADD x1, x2, x3")
    );
}

#[test]
fn test_classify_rejects_bad_label() {
    let l = line(7, "9lives:");
    assert!(matches!(
        classify(&l),
        Err(AsmError::SyntaxError { line: 7, .. })
    ));
}
