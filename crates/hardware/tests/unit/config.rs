use std::io::Write;

use pmpsim_core::common::ConfigError;
use pmpsim_core::config::Config;
use pmpsim_core::core::units::pmp::{PermissionEntry, PermissionTable, Permissions};
use pretty_assertions::assert_eq;

use crate::common::harness::reference_entries;

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.general.start_pc, 0);
    assert_eq!(config.general.max_cycles, 1000);
    assert!(!config.general.trace_instructions);
    assert_eq!(config.memory.imem_size, 4096);
    assert_eq!(config.memory.dmem_size, 4096);
    assert_eq!(config.pmp.entries, reference_entries());
    config.validate().unwrap();
}

#[test]
fn empty_object_is_default() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
}

#[test]
fn partial_sections_fill_in_defaults() {
    let config = Config::from_json(r#"{ "general": { "start_pc": 64 }, "memory": { "dmem_size": 256 } }"#)
        .unwrap();
    assert_eq!(config.general.start_pc, 0x40);
    assert_eq!(config.general.max_cycles, 1000);
    assert_eq!(config.memory.imem_size, 4096);
    assert_eq!(config.memory.dmem_size, 256);
}

#[test]
fn pmp_entries_from_json() {
    let config = Config::from_json(
        r#"{
            "pmp": { "entries": [
                { "start": 0, "end": 255, "read": true, "execute": true },
                { "start": 256, "end": 511, "read": true, "write": true, "enabled": false },
                { "start": 0, "end": 4294967295 }
            ] }
        }"#,
    )
    .unwrap();

    let table = config.pmp.table().unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(table.entries()[0].permissions, Permissions::RX);
    assert!(!table.entries()[1].enabled);
    assert!(table.entries()[2].is_catch_all());
}

#[test]
fn misspelled_entry_key_is_rejected() {
    let err = Config::from_json(
        r#"{
            "pmp": { "entries": [
                { "start": 0, "end": 255, "read": true, "enable": false },
                { "start": 0, "end": 4294967295 }
            ] }
        }"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn entry_serializes_with_inline_permission_bits() {
    let entry = PermissionEntry::new(0x40, 0x7F, Permissions::RX).disabled();
    assert_eq!(
        serde_json::to_value(entry).unwrap(),
        serde_json::json!({
            "start": 64, "end": 127,
            "read": true, "write": false, "execute": true,
            "enabled": false
        })
    );
}

#[test]
fn zero_sized_memory_rejected() {
    let err = Config::from_json(r#"{ "memory": { "imem_size": 0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroSizedMemory { name: "imem" }));
}

#[test]
fn table_errors_surface_through_config() {
    let err = Config::from_json(r#"{ "pmp": { "entries": [] } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyTable));

    let err = Config::from_json(
        r#"{ "pmp": { "entries": [ { "start": 0, "end": 4294967295, "write": true } ] } }"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::PermissiveCatchAll { index: 0 }));
}

#[test]
fn malformed_json_is_parse_error() {
    assert!(matches!(
        Config::from_json("{ general: }"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn from_file_reads_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "general": {{ "trace_instructions": true }} }}"#).unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert!(config.general.trace_instructions);
}

#[test]
fn from_file_missing_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_file(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn default_serializes_to_loadable_json() {
    let text = serde_json::to_string_pretty(&Config::default()).unwrap();
    let back = Config::from_json(&text).unwrap();
    assert_eq!(back.pmp.table().unwrap(), PermissionTable::reference());
}
