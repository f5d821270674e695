//! Integration tests for the export layer
//!
//! Tests file writing across scenarios:
//! - Output directory creation
//! - Timestamped filename scheme
//! - CSV/JSON selection via options
//! - Error reporting when the destination is not writable

use chrono::{TimeZone, Utc};
use sensorlog::{
    export_records, records_to_csv, Activity, BatteryState, ExportOptions, Record,
};
use std::fs;
use tempfile::TempDir;

fn make_record(latitude: f64) -> Record {
    Record {
        timestamp: Utc.with_ymd_and_hms(2025, 2, 19, 14, 30, 0).unwrap(),
        latitude,
        longitude: 2.3515,
        altitude: 35.0,
        speed: 1.2,
        acceleration_x: Some(0.01),
        acceleration_y: Some(0.02),
        acceleration_z: Some(0.98),
        humidity: Some(45.0),
        temperature: Some(19.5),
        network: "4G - Orange".to_string(),
        battery_level: Some(0.8),
        battery_state: BatteryState::Unplugged,
        activity: Activity::Walking,
    }
}

#[test]
fn test_export_creates_output_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let nonexistent_dir = temp_dir.path().join("nonexistent").join("output");

    let options = ExportOptions {
        csv: true,
        json: false,
        output_dir: Some(nonexistent_dir.clone()),
    };
    let report = export_records(&[make_record(48.8565)], &options)
        .expect("export should succeed and create directories");

    assert!(nonexistent_dir.exists(), "Output directory should be created");
    let csv_path = report.csv_path.expect("CSV path should be reported");
    assert!(csv_path.exists(), "CSV file should exist");
    assert!(csv_path
        .file_name()
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("sensor_data_"));
}

#[test]
fn test_export_writes_selected_formats() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let options = ExportOptions {
        csv: true,
        json: true,
        output_dir: Some(temp_dir.path().to_path_buf()),
    };
    let records = vec![make_record(48.8565), make_record(48.8566)];
    let report = export_records(&records, &options).expect("export should succeed");

    assert_eq!(report.record_count, 2);

    let csv_path = report.csv_path.expect("CSV requested");
    let csv_content = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert_eq!(csv_content.lines().count(), 3, "header plus one row per record");
    assert!(csv_content.starts_with("Timestamp,Latitude,Longitude"));

    let json_path = report.json_path.expect("JSON requested");
    let json_content = fs::read_to_string(&json_path).expect("Failed to read JSON");
    let decoded: Vec<Record> = serde_json::from_str(&json_content).expect("JSON should decode");
    assert_eq!(decoded, records);
}

#[test]
fn test_export_filenames_embed_millisecond_stamp() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let options = ExportOptions {
        csv: true,
        json: false,
        output_dir: Some(temp_dir.path().to_path_buf()),
    };
    let report = export_records(&[make_record(48.8565)], &options).expect("export should succeed");

    let name = report
        .csv_path
        .expect("CSV requested")
        .file_stem()
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let stamp: i64 = name
        .strip_prefix("sensor_data_")
        .expect("filename should start with sensor_data_")
        .parse()
        .expect("stamp should be numeric");
    // Millisecond precision keeps back-to-back exports from colliding
    assert!(stamp > 1_000_000_000_000, "expected a unix-ms stamp, got {stamp}");
}

#[test]
fn test_export_nothing_selected_writes_no_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let options = ExportOptions {
        csv: false,
        json: false,
        output_dir: Some(temp_dir.path().to_path_buf()),
    };
    let report = export_records(&[make_record(48.8565)], &options).expect("export should succeed");

    assert!(report.csv_path.is_none());
    assert!(report.json_path.is_none());
    assert_eq!(
        fs::read_dir(temp_dir.path()).unwrap().count(),
        0,
        "no files should be written"
    );
}

#[test]
fn test_export_empty_buffer_yields_header_only_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let options = ExportOptions {
        csv: true,
        json: false,
        output_dir: Some(temp_dir.path().to_path_buf()),
    };
    let report = export_records(&[], &options).expect("export should succeed");

    let csv_path = report.csv_path.expect("CSV requested");
    let content = fs::read_to_string(csv_path).expect("Failed to read CSV");
    assert_eq!(content, records_to_csv(&[]).unwrap());
    assert_eq!(content.lines().count(), 1);
}

#[test]
fn test_export_failure_surfaces_as_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    // A destination whose parent is a plain file can never be created
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, b"not a directory").unwrap();

    let options = ExportOptions {
        csv: true,
        json: false,
        output_dir: Some(blocker.join("sub")),
    };
    let result = export_records(&[make_record(48.8565)], &options);
    assert!(result.is_err(), "unwritable destination must fail the export");
}
