//! Simulation utilities and program loading.
//!
//! Provides utilities for reading source files and placing an assembled
//! program and its data vectors into machine memory.

pub mod loader;
