// crates/hashdb-core/tests/record_codec.rs
// ============================================================================
// Module: File Record Codec Tests
// Description: Validate the JSON value schema for stored records.
// Purpose: Ensure every field identifier is present and decoding is lenient.
// Dependencies: hashdb-core, serde_json
// ============================================================================

//! ## Overview
//! Confirms the stored value carries all fourteen identifiers, that empty
//! provenance survives a round trip, and that decode failures surface as
//! [`RecordError::Decode`].

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use hashdb_core::DigestSet;
use hashdb_core::FileRecord;
use hashdb_core::RecordError;
use serde_json::Value;

const FIELD_IDS: [&str; 14] = [
    "sha256",
    "sha1",
    "md5",
    "crc32",
    "file_name",
    "file_size",
    "package_id",
    "package_name",
    "package_version",
    "language",
    "application_type",
    "os_name",
    "os_version",
    "manufacturer_name",
];

fn sample_record() -> FileRecord {
    FileRecord {
        sha256: "A".repeat(64),
        sha1: "B".repeat(40),
        md5: "C".repeat(32),
        crc32: "DDDDDDDD".to_string(),
        file_name: "a.bin".to_string(),
        file_size: 1234,
        package_id: 7,
        package_name: "p".to_string(),
        package_version: "1".to_string(),
        ..FileRecord::default()
    }
}

#[test]
fn encoded_value_carries_every_identifier() {
    let bytes = sample_record().encode().unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), FIELD_IDS.len());
    for id in FIELD_IDS {
        assert!(object.contains_key(id), "missing field {id}");
    }
    assert_eq!(object["file_size"], Value::from(1234));
    assert_eq!(object["language"], Value::from(""));
}

#[test]
fn round_trip_preserves_empty_provenance() {
    let record = sample_record();
    let decoded = FileRecord::decode(&record.encode().unwrap()).unwrap();
    assert_eq!(decoded, record);
    assert!(decoded.os_name.is_empty());
}

#[test]
fn legacy_values_decode_with_defaults() {
    let decoded =
        FileRecord::decode(br#"{"file_name":"old.dll","file_size":9,"package_id":3}"#).unwrap();
    assert_eq!(decoded.file_name, "old.dll");
    assert_eq!(decoded.package_id, 3);
    assert!(decoded.sha256.is_empty());
}

#[test]
fn garbage_value_is_a_decode_error() {
    assert!(matches!(FileRecord::decode(b"not json"), Err(RecordError::Decode(_))));
}

#[test]
fn with_digests_fills_only_digests() {
    let digests = sample_record().digests().unwrap();
    let placeholder = FileRecord::with_digests(&digests);
    assert_eq!(placeholder.sha256, "A".repeat(64));
    assert_eq!(placeholder.crc32, "DDDDDDDD");
    assert!(placeholder.file_name.is_empty());
    assert_eq!(placeholder.file_size, 0);
    assert_eq!(placeholder.key().unwrap(), sample_record().key().unwrap());
    let reparsed = DigestSet::parse(
        &placeholder.sha256,
        &placeholder.sha1,
        &placeholder.md5,
        &placeholder.crc32,
    )
    .unwrap();
    assert_eq!(reparsed, digests);
}
