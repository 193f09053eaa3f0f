//! # Configuration Tests
//!
//! Defaults, JSON deserialization with partial documents, and validation.

use pretty_assertions::assert_eq;
use rstest::rstest;
use vecsim_core::common::ConfigError;
use vecsim_core::config::{Config, GeneralConfig, MemoryConfig, VectorConfig};

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.general.trace_instructions);
    assert_eq!(config.general.step_limit, 1024);
    assert_eq!(config.memory.size, 1024);
    assert_eq!(config.memory.data_base, 512);
    assert_eq!(config.memory.max_program_bytes, 512);
    assert_eq!(config.vector.vlen, 512);
    assert_eq!(config.vector.sew, 64);
    assert_eq!(config.vector.lmul, 1);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_section_defaults_match_root_default() {
    let config = Config::default();
    assert_eq!(config.general, GeneralConfig::default());
    assert_eq!(config.memory, MemoryConfig::default());
    assert_eq!(config.vector, VectorConfig::default());
}

#[test]
fn test_empty_document_is_default() {
    assert_eq!(Config::from_json("{}"), Ok(Config::default()));
}

#[test]
fn test_partial_document_overrides_only_given_fields() {
    let json = r#"{
        "general": { "trace_instructions": true },
        "memory": { "size": 4096, "data_base": 2048 },
        "vector": { "vlen": 256, "lmul": 2 }
    }"#;
    let config = Config::from_json(json).expect("valid document");
    assert!(config.general.trace_instructions);
    assert_eq!(config.general.step_limit, 1024);
    assert_eq!(config.memory.size, 4096);
    assert_eq!(config.memory.data_base, 2048);
    assert_eq!(config.memory.max_program_bytes, 512);
    assert_eq!(config.vector.vlen, 256);
    assert_eq!(config.vector.sew, 64);
    assert_eq!(config.vector.lmul, 2);
}

#[rstest]
#[case::not_json("not json")]
#[case::wrong_type(r#"{ "general": { "step_limit": "many" } }"#)]
#[case::negative_size(r#"{ "memory": { "size": -1 } }"#)]
fn test_malformed_documents(#[case] json: &str) {
    assert!(matches!(
        Config::from_json(json),
        Err(ConfigError::Malformed(_))
    ));
}

#[rstest]
#[case::tiny_memory(
    r#"{ "memory": { "size": 2, "data_base": 0, "max_program_bytes": 0 } }"#,
    ConfigError::MemoryTooSmall(2)
)]
#[case::data_base_outside(
    r#"{ "memory": { "data_base": 2048 } }"#,
    ConfigError::DataBaseOutOfRange { data_base: 2048, size: 1024 }
)]
#[case::program_overlaps_data(
    r#"{ "memory": { "max_program_bytes": 600 } }"#,
    ConfigError::ProgramRegionOverlap { max_program_bytes: 600, data_base: 512 }
)]
fn test_inconsistent_layouts(#[case] json: &str, #[case] expected: ConfigError) {
    assert_eq!(Config::from_json(json), Err(expected));
}

#[test]
fn test_vector_geometry_is_checked_by_the_machine() {
    let config = Config::from_json(r#"{ "vector": { "sew": 12 } }"#).expect("layout is valid");
    assert!(matches!(
        vecsim_core::Machine::new(&config),
        Err(vecsim_core::common::SimError::InvalidConfig(ConfigError::InvalidSew(12)))
    ));
}

#[test]
fn test_config_error_messages() {
    assert_eq!(
        ConfigError::InvalidSew(12).to_string(),
        "SEW 12 is not one of 8, 16, 32, 64"
    );
    assert!(ConfigError::Malformed("eof".into()).to_string().contains("eof"));
}
