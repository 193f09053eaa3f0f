//! # Machine Core Tests

/// ALU operation semantics.
pub mod alu;



/// Run loop: ordering, errors, step limit, statistics, dumps.
pub mod engine;
