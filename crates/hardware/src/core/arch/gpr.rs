//! General-Purpose Register File.
//!
//! This module implements the integer register file of the machine.
//! It performs the following:
//! 1. **Storage:** Maintains 16 32-bit integer registers (`x0`-`x15`).
//! 2. **Invariant Enforcement:** Ensures that register `x0` is hardwired to zero.
//! 3. **Debugging:** Renders the complete register state for dumps.

use std::fmt::Write as _;

use crate::common::NUM_GPRS;

/// General-Purpose Register file.
///
/// Register `x0` is hardwired to zero and cannot be modified. Indices outside
/// the file read as zero and ignore writes; the engine rejects such indices
/// before any handler runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u32; NUM_GPRS],
}

impl Gpr {
    /// Creates a new general-purpose register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-15).
    ///
    /// # Returns
    ///
    /// The 32-bit value stored in the specified register. Register `x0` always returns 0.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 {
            0
        } else {
            self.regs.get(idx).copied().unwrap_or(0)
        }
    }

    /// Writes a value to a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-15).
    /// * `val` - The 32-bit value to write.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0
            && let Some(slot) = self.regs.get_mut(idx)
        {
            *slot = val;
        }
    }

    /// Returns a copy of every register, `x0` first.
    pub const fn snapshot(&self) -> [u32; NUM_GPRS] {
        self.regs
    }

    /// Renders all registers in pairs with hexadecimal formatting.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for i in (0..NUM_GPRS).step_by(2) {
            let _ = writeln!(
                out,
                "x{:<2}={:#010x} x{:<2}={:#010x}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1]
            );
        }
        out
    }
}
