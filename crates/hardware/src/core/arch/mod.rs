//! Architectural register files.
//!
//! This module contains the register state of the machine:
//! 1. **GPRs:** General-Purpose Register file implementation.
//! 2. **FPRs:** Reserved Floating-Point Register file.
//! 3. **VPRs:** Vector Register file with its SEW/LMUL/VL configuration.

/// Reserved floating-point register file.
pub mod fpr;

/// General-Purpose Register file implementation.
pub mod gpr;

/// Vector register file implementation.
pub mod vpr;
