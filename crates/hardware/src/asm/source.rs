//! Source Line Handling.
//!
//! Splits assembly text into numbered lines, strips comments, tokenizes
//! operands, and classifies each line as a label, a data declaration, or an
//! instruction.

use crate::common::AsmError;

/// Introduces a comment that runs to the end of the line.
const COMMENT_CHAR: char = '#';

/// Keyword introducing a data declaration (`data: name, v1, v2, ...`).
const DATA_KEYWORD: &str = "data";

/// A non-empty source line with its 1-based line number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number in the original text.
    pub number: usize,
    /// Line text with comments and surrounding whitespace removed.
    pub text: String,
}

/// What a source line declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `name:` optionally followed by an instruction on the same line.
    Label {
        /// The label name.
        name: &'a str,
        /// Instruction text after the colon, if any.
        rest: Option<&'a str>,
    },
    /// `data: ...`; carries the text after the colon.
    Data(&'a str),
    /// Anything else.
    Instruction(&'a str),
}

/// Strips comments and blank lines, keeping original line numbers.
pub fn lines(source: &str) -> Vec<SourceLine> {
    source
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let text = raw.split(COMMENT_CHAR).next().unwrap_or("").trim();
            (!text.is_empty()).then(|| SourceLine {
                number: idx + 1,
                text: text.to_string(),
            })
        })
        .collect()
}

/// Splits on commas, parentheses, and whitespace, dropping empty tokens.
///
/// `LW x1, 8(x2)` yields `["LW", "x1", "8", "x2"]`.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| c == ',' || c == '(' || c == ')' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .collect()
}

/// Returns true if `name` can be used as a label.
pub fn is_valid_label(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Classifies a line.
///
/// A colon ends a label only when everything before it is a single word;
/// `data` as that word starts a data declaration.
pub fn classify(line: &SourceLine) -> Result<LineKind<'_>, AsmError> {
    let Some((head, tail)) = line.text.split_once(':') else {
        return Ok(LineKind::Instruction(&line.text));
    };
    let head = head.trim();
    if head.contains(char::is_whitespace) {
        return Ok(LineKind::Instruction(&line.text));
    }
    if head.eq_ignore_ascii_case(DATA_KEYWORD) {
        return Ok(LineKind::Data(tail.trim()));
    }
    if !is_valid_label(head) {
        return Err(AsmError::SyntaxError {
            line: line.number,
            reason: format!("invalid label name `{head}`"),
        });
    }
    let rest = tail.trim();
    Ok(LineKind::Label {
        name: head,
        rest: (!rest.is_empty()).then_some(rest),
    })
}
