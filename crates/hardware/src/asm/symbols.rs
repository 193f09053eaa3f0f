//! Symbol Table and First Pass.
//!
//! Pass 1 walks the source with an address counter starting at 0, binding
//! each label to the address of the next instruction and collecting data
//! declarations for resolution once every label is known.

use std::collections::HashMap;

use tracing::debug;

use crate::asm::source::{LineKind, SourceLine, classify};
use crate::common::{AsmError, INSTRUCTION_SIZE};

/// Label to absolute instruction address. Read-only after pass 1.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolTable {
    labels: HashMap<String, u32>,
}

impl SymbolTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `addr`.
    ///
    /// # Returns
    ///
    /// `DuplicateLabel` if `name` is already bound.
    pub fn define(&mut self, name: &str, addr: u32, line: usize) -> Result<(), AsmError> {
        if let Some(&previous) = self.labels.get(name) {
            return Err(AsmError::DuplicateLabel {
                line,
                label: name.to_string(),
                previous,
            });
        }
        let _ = self.labels.insert(name.to_string(), addr);
        Ok(())
    }

    /// Address bound to `name`.
    pub fn get(&self, name: &str) -> Option<u32> {
        self.labels.get(name).copied()
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if no label is bound.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterates over `(label, address)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.labels.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

/// A data declaration awaiting value resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingData<'a> {
    /// 1-based source line.
    pub line: usize,
    /// Text after `data:`.
    pub body: &'a str,
}

/// Result of pass 1.
#[derive(Clone, Debug, Default)]
pub struct FirstPass<'a> {
    /// Every label binding.
    pub symbols: SymbolTable,
    /// Address of each instruction, in source order.
    pub addresses: Vec<u32>,
    /// Data declarations in source order.
    pub data: Vec<PendingData<'a>>,
}

/// Runs pass 1 over `lines`.
pub fn first_pass(lines: &[SourceLine]) -> Result<FirstPass<'_>, AsmError> {
    let mut pass = FirstPass::default();
    let mut addr = 0u32;
    for line in lines {
        match classify(line)? {
            LineKind::Label { name, rest } => {
                pass.symbols.define(name, addr, line.number)?;
                debug!(label = name, addr, "label bound");
                if rest.is_some() {
                    pass.addresses.push(addr);
                    addr += INSTRUCTION_SIZE;
                }
            }
            LineKind::Data(body) => {
                debug!(line = line.number, "data declaration");
                pass.data.push(PendingData {
                    line: line.number,
                    body,
                });
            }
            LineKind::Instruction(_) => {
                pass.addresses.push(addr);
                addr += INSTRUCTION_SIZE;
            }
        }
    }
    Ok(pass)
}
