//! Execution units and functional components.
//!
//! Holds the integer ALU shared by the scalar handlers.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;
