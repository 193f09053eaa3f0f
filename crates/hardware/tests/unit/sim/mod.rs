//! # Simulation Utility Tests
