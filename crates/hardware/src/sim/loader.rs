//! Program and Data Loader.
//!
//! This module places assembled output into machine memory. It performs:
//! 1. **Source reading:** Reads assembly source text from disk.
//! 2. **Program loading:** Writes instruction words little-endian from address 0,
//!    bounded by the program region.
//! 3. **Data loading:** Writes named data vectors consecutively from the data
//!    base, each value as an 8-byte little-endian word.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::asm::DataVector;
use crate::common::constants::DATA_VALUE_BYTES;
use crate::common::SimError;
use crate::core::memory::Memory;

/// Where a data vector was placed in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataPlacement {
    /// Name from the `data:` line.
    pub name: String,
    /// Address of the first value.
    pub addr: usize,
    /// Number of values.
    pub len: usize,
}

/// Reads an assembly source file.
///
/// # Arguments
///
/// * `path` - Path to the source file.
///
/// # Returns
///
/// The file contents as text.
pub fn read_source(path: impl AsRef<Path>) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Writes `words` into memory from address 0.
///
/// # Returns
///
/// The byte length of the program, or `ProgramTooLarge` if it exceeds `limit`.
pub fn load_program(memory: &mut Memory, words: &[u32], limit: usize) -> Result<usize, SimError> {
    let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
    if bytes.len() > limit {
        return Err(SimError::ProgramTooLarge {
            bytes: bytes.len(),
            limit,
        });
    }
    memory.load(0, &bytes)?;
    debug!(words = words.len(), bytes = bytes.len(), "program loaded");
    Ok(bytes.len())
}

/// Writes each data vector consecutively from `base`.
///
/// # Returns
///
/// The placement of every vector in declaration order, or `DataOverflow`
/// for the first vector that does not fit.
pub fn load_data(
    memory: &mut Memory,
    base: usize,
    data: &[DataVector],
) -> Result<Vec<DataPlacement>, SimError> {
    let mut placements = Vec::with_capacity(data.len());
    let mut addr = base;
    for vector in data {
        let bytes: Vec<u8> = vector.values.iter().flat_map(|v| v.to_le_bytes()).collect();
        let end = addr.checked_add(bytes.len());
        if end.is_none_or(|end| end > memory.len()) {
            return Err(SimError::DataOverflow {
                name: vector.name.clone(),
                addr,
                bytes: bytes.len(),
                capacity: memory.len(),
            });
        }
        memory.load(addr, &bytes)?;
        debug!(name = %vector.name, addr, len = vector.values.len(), "data vector loaded");
        placements.push(DataPlacement {
            name: vector.name.clone(),
            addr,
            len: vector.values.len(),
        });
        addr += vector.values.len() * DATA_VALUE_BYTES;
    }
    Ok(placements)
}
