//! Configuration system for the vector ISA simulator.
//!
//! This module defines the configuration structures used to parameterize a
//! machine. It provides:
//! 1. **Defaults:** Baseline machine constants (memory layout, vector geometry, step ceiling).
//! 2. **Structures:** Hierarchical config for general, memory, and vector settings.
//! 3. **Validation:** Consistency checks reported as `ConfigError`.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or taken from
//! `Config::default()`. Every field may be omitted.

use serde::Deserialize;

use crate::common::{ConfigError, INSTRUCTION_SIZE};

/// Default configuration constants for the simulator.
mod defaults {
    /// Maximum number of instructions a single run may execute.
    pub const STEP_LIMIT: u64 = 1024;

    /// Total size of the flat memory in bytes.
    pub const MEMORY_SIZE: usize = 1024;

    /// Address where bulk-loaded data vectors start.
    ///
    /// Everything below it is the program region.
    pub const DATA_BASE: usize = 512;

    /// Largest program image accepted, in bytes.
    pub const MAX_PROGRAM_BYTES: usize = 512;

    /// Bits per vector register.
    pub const VLEN: usize = 512;

    /// Selected element width in bits.
    pub const SEW: usize = 64;

    /// Vector register grouping factor.
    pub const LMUL: usize = 1;
}

/// Root configuration structure for a machine.
///
/// # Examples
///
/// ```
/// use vecsim_core::config::Config;
///
/// let json = r#"{
///     "general": { "step_limit": 64 },
///     "vector": { "sew": 32 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.step_limit, 64);
/// assert_eq!(config.vector.sew, 32);
/// assert_eq!(config.memory.size, 1024);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory size and layout
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Vector register geometry
    #[serde(default)]
    pub vector: VectorConfig,
}

impl Config {
    /// Parses a JSON configuration document and validates it.
    ///
    /// # Arguments
    ///
    /// * `json` - The configuration document. Missing fields take their defaults.
    ///
    /// # Returns
    ///
    /// The validated configuration, or `ConfigError::Malformed` for unparsable
    /// input and the specific error for inconsistent values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the memory layout.
    ///
    /// Vector geometry is checked when the vector register file is built.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        let mem = &self.memory;
        if mem.size < INSTRUCTION_SIZE as usize {
            return Err(ConfigError::MemoryTooSmall(mem.size));
        }
        if mem.data_base > mem.size {
            return Err(ConfigError::DataBaseOutOfRange {
                data_base: mem.data_base,
                size: mem.size,
            });
        }
        if mem.max_program_bytes > mem.data_base {
            return Err(ConfigError::ProgramRegionOverlap {
                max_program_bytes: mem.max_program_bytes,
                data_base: mem.data_base,
            });
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Log every executed instruction with its disassembly at `debug` level.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Steps after which a run stops with `StepLimitExceeded`.
    #[serde(default = "GeneralConfig::default_step_limit")]
    pub step_limit: u64,
}

impl GeneralConfig {
    fn default_step_limit() -> u64 {
        defaults::STEP_LIMIT
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            step_limit: defaults::STEP_LIMIT,
        }
    }
}

/// Flat memory size and region layout.
///
/// The program occupies `[0, max_program_bytes)` and data vectors are placed
/// from `data_base` upwards; the two regions must not overlap.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryConfig {
    /// Memory size in bytes
    #[serde(default = "MemoryConfig::default_size")]
    pub size: usize,

    /// First address of the data region
    #[serde(default = "MemoryConfig::default_data_base")]
    pub data_base: usize,

    /// Size of the program region in bytes
    #[serde(default = "MemoryConfig::default_max_program_bytes")]
    pub max_program_bytes: usize,
}

impl MemoryConfig {
    fn default_size() -> usize {
        defaults::MEMORY_SIZE
    }

    fn default_data_base() -> usize {
        defaults::DATA_BASE
    }

    fn default_max_program_bytes() -> usize {
        defaults::MAX_PROGRAM_BYTES
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size: defaults::MEMORY_SIZE,
            data_base: defaults::DATA_BASE,
            max_program_bytes: defaults::MAX_PROGRAM_BYTES,
        }
    }
}

/// Vector register geometry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VectorConfig {
    /// Bits per vector register (non-zero multiple of 64)
    #[serde(default = "VectorConfig::default_vlen")]
    pub vlen: usize,

    /// Initial element width in bits (8, 16, 32, 64)
    #[serde(default = "VectorConfig::default_sew")]
    pub sew: usize,

    /// Register grouping factor (1, 2, 4, 8); recorded only
    #[serde(default = "VectorConfig::default_lmul")]
    pub lmul: usize,
}

impl VectorConfig {
    fn default_vlen() -> usize {
        defaults::VLEN
    }

    fn default_sew() -> usize {
        defaults::SEW
    }

    fn default_lmul() -> usize {
        defaults::LMUL
    }
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            vlen: defaults::VLEN,
            sew: defaults::SEW,
            lmul: defaults::LMUL,
        }
    }
}
