//! Two-Pass Assembler.
//!
//! Turns mnemonic source text into program words and initial data. It provides:
//! 1. **Pass 1:** Binds labels to instruction addresses and collects data declarations.
//! 2. **Data Resolution:** Evaluates data values once every label is known.
//! 3. **Pass 2:** Encodes each instruction through the metadata-driven encoder,
//!    re-deriving every address and checking it against pass 1.
//!
//! All errors are fatal and carry the 1-based source line; nothing is emitted
//! on failure.

/// Format-driven instruction encoder.
pub mod encode;

/// Line splitting, tokenizing, and classification.
pub mod source;

/// Symbol table and pass 1.
pub mod symbols;

use tracing::debug;

use crate::common::{AsmError, INSTRUCTION_SIZE};

use self::encode::{encode_line, parse_int, parse_register_index};
use self::source::{LineKind, SourceLine, classify, tokenize};
use self::symbols::{PendingData, SymbolTable, first_pass};

/// A named vector of values to place in memory before the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataVector {
    /// Name from the `data:` line.
    pub name: String,
    /// Values in declaration order.
    pub values: Vec<i64>,
}

/// Output of a successful assembly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    /// Encoded instructions; word `i` sits at address `4 * i`.
    pub words: Vec<u32>,
    /// Data vectors in declaration order.
    pub data: Vec<DataVector>,
    /// Label bindings.
    pub symbols: SymbolTable,
}

/// Assembles source text, skipping blank lines and `#` comments.
///
/// # Examples
///
/// ```
/// use vecsim_core::asm::assemble_source;
///
/// let program = assemble_source("ADDI x1, x0, 5\nADD x2, x1, x1\n").unwrap();
/// assert_eq!(program.words, vec![0x0050_0093, 0x0010_8133]);
/// ```
pub fn assemble_source(text: &str) -> Result<Program, AsmError> {
    assemble_lines(&source::lines(text))
}

/// Assembles pre-split lines; line numbers are positions within `lines`.
pub fn assemble<S: AsRef<str>>(lines: &[S]) -> Result<Program, AsmError> {
    let joined = lines.iter().map(AsRef::as_ref).collect::<Vec<_>>().join("\n");
    assemble_source(&joined)
}

/// Assembles numbered, comment-free lines.
pub fn assemble_lines(lines: &[SourceLine]) -> Result<Program, AsmError> {
    let pass = first_pass(lines)?;
    let data = pass
        .data
        .iter()
        .map(|pending| resolve_data(pending, &pass.symbols))
        .collect::<Result<Vec<_>, _>>()?;

    let mut words = Vec::with_capacity(pass.addresses.len());
    let mut addr = 0u32;
    for line in lines {
        let text = match classify(line)? {
            LineKind::Instruction(text) | LineKind::Label { rest: Some(text), .. } => text,
            LineKind::Label { rest: None, .. } | LineKind::Data(_) => continue,
        };
        if pass.addresses.get(words.len()) != Some(&addr) {
            return Err(AsmError::SyntaxError {
                line: line.number,
                reason: format!("address {addr:#06x} disagrees with the first pass"),
            });
        }
        words.push(encode_line(text, line.number, addr, &pass.symbols)?);
        addr += INSTRUCTION_SIZE;
    }

    debug!(
        words = words.len(),
        labels = pass.symbols.len(),
        data = data.len(),
        "assembly complete"
    );
    Ok(Program {
        words,
        data,
        symbols: pass.symbols,
    })
}

fn resolve_data(pending: &PendingData<'_>, symbols: &SymbolTable) -> Result<DataVector, AsmError> {
    let tokens = tokenize(pending.body);
    let Some((&name, values)) = tokens.split_first() else {
        return Err(AsmError::SyntaxError {
            line: pending.line,
            reason: "data declaration is missing a name".to_string(),
        });
    };
    let values = values
        .iter()
        .map(|&tok| data_value(tok, pending.line, symbols))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(name, len = values.len(), "data vector declared");
    Ok(DataVector {
        name: name.to_string(),
        values,
    })
}

/// A data value: integer literal, register-like token (its index), or label address.
fn data_value(token: &str, line: usize, symbols: &SymbolTable) -> Result<i64, AsmError> {
    if let Some(value) = parse_int(token) {
        return Ok(value);
    }
    if let Some(index) =
        parse_register_index(token, 'x').or_else(|| parse_register_index(token, 'v'))
    {
        return Ok(index as i64);
    }
    symbols
        .get(token)
        .map(i64::from)
        .ok_or_else(|| AsmError::UnresolvedSymbol {
            line,
            symbol: token.to_string(),
        })
}
