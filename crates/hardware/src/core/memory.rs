//! Flat Byte-Addressed Memory.
//!
//! A single little-endian byte array shared by the program image and the data
//! vectors. Every access is bounds-checked and fails with
//! `SimError::MemoryOutOfBounds` instead of wrapping or panicking.

use std::fmt::Write as _;
use std::ops::Range;

use crate::common::SimError;

/// Bytes per row of a hex dump.
const DUMP_ROW_BYTES: usize = 16;

/// Flat memory with a capacity fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    bytes: Vec<u8>,
}

impl Memory {
    /// Creates a zero-filled memory of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    /// Returns the capacity in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the memory has no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn range(&self, addr: u64, size: usize) -> Result<Range<usize>, SimError> {
        let out_of_bounds = || SimError::MemoryOutOfBounds {
            addr,
            size,
            capacity: self.bytes.len(),
        };
        let start = usize::try_from(addr).map_err(|_| out_of_bounds())?;
        let end = start.checked_add(size).ok_or_else(out_of_bounds)?;
        if end > self.bytes.len() {
            return Err(out_of_bounds());
        }
        Ok(start..end)
    }

    /// Reads `size` bytes (1 to 8) at `addr` as a little-endian value.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address of the first byte.
    /// * `size` - Number of bytes to read.
    ///
    /// # Returns
    ///
    /// The zero-extended value, or `MemoryOutOfBounds` if any byte lies outside memory.
    pub fn read(&self, addr: u64, size: usize) -> Result<u64, SimError> {
        let range = self.range(addr, size)?;
        Ok(self.bytes[range]
            .iter()
            .rev()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
    }

    /// Writes the low `size` bytes (1 to 8) of `value` at `addr`, little-endian.
    pub fn write(&mut self, addr: u64, size: usize, value: u64) -> Result<(), SimError> {
        let le = value.to_le_bytes();
        let range = self.range(addr, size.min(le.len()))?;
        self.bytes[range.clone()].copy_from_slice(&le[..range.len()]);
        Ok(())
    }

    /// Fetches an instruction word.
    pub fn read_u32(&self, addr: u32) -> Result<u32, SimError> {
        self.read(u64::from(addr), 4).map(|v| v as u32)
    }

    /// Copies `data` into memory starting at `addr`.
    pub fn load(&mut self, addr: usize, data: &[u8]) -> Result<(), SimError> {
        let range = self.range(addr as u64, data.len())?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }

    /// Returns the bytes in `range`, or `MemoryOutOfBounds`.
    pub fn slice(&self, range: Range<usize>) -> Result<&[u8], SimError> {
        let checked = self.range(range.start as u64, range.end.saturating_sub(range.start))?;
        Ok(&self.bytes[checked])
    }

    /// Renders a hex dump of `range`, 16 bytes per row.
    ///
    /// The range is clipped to the memory capacity.
    pub fn dump(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.bytes.len());
        let start = range.start.min(end);
        let mut out = String::new();
        for (row, chunk) in self.bytes[start..end].chunks(DUMP_ROW_BYTES).enumerate() {
            let _ = write!(out, "{:#06x}:", start + row * DUMP_ROW_BYTES);
            for b in chunk {
                let _ = write!(out, " {b:02x}");
            }
            out.push('\n');
        }
        out
    }
}
