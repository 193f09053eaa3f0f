//! Floating-Point Register File.
//!
//! Reserved architectural state: no instruction reads or writes it, but it is
//! part of the machine and shows up in the register dump.

use std::fmt::Write as _;

use crate::common::NUM_FPRS;

/// Floating-Point Register file of 16 double-precision registers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fpr {
    fregs: [f64; NUM_FPRS],
}

impl Fpr {
    /// Creates a new floating-point register file with all registers set to `0.0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders all registers in pairs.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for i in (0..NUM_FPRS).step_by(2) {
            let _ = writeln!(
                out,
                "f{:<2}={:<12} f{:<2}={:<12}",
                i,
                self.fregs[i],
                i + 1,
                self.fregs[i + 1]
            );
        }
        out
    }
}
