//! Export functionality for collected records
//!
//! The renderers are pure: they turn a record slice into CSV or JSON text and
//! perform no I/O. File writing is a thin layer on top, driven by
//! [`ExportOptions`] and reporting written paths through [`ExportReport`].

use std::fs;
use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};

use crate::error::{CollectorError, Result};
use crate::types::Record;

/// Column order of the CSV export, fixed by the consuming tooling
pub const CSV_HEADER: [&str; 14] = [
    "Timestamp",
    "Latitude",
    "Longitude",
    "Altitude",
    "Speed",
    "AccelerationX",
    "AccelerationY",
    "AccelerationZ",
    "Humidity",
    "Temperature",
    "Network",
    "BatteryLevel",
    "BatteryState",
    "Activity",
];

/// Render records as CSV text: header row plus one row per record in buffer
/// (chronological) order
///
/// Absent numeric fields render as `0`, an absent battery level as `-1`, and
/// text fields are written verbatim without quoting. The text fields must not
/// contain commas; the format carries no escaping.
pub fn records_to_csv(records: &[Record]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record(&csv_row(record))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| CollectorError::Export(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| CollectorError::Export(err.to_string()))
}

fn csv_row(record: &Record) -> [String; 14] {
    let opt = |value: Option<f64>| value.map_or_else(|| "0".to_string(), |v| v.to_string());
    [
        record
            .timestamp
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        record.latitude.to_string(),
        record.longitude.to_string(),
        record.altitude.to_string(),
        record.speed.to_string(),
        opt(record.acceleration_x),
        opt(record.acceleration_y),
        opt(record.acceleration_z),
        opt(record.humidity),
        opt(record.temperature),
        record.network.clone(),
        record
            .battery_level
            .map_or_else(|| "-1".to_string(), |v| v.to_string()),
        record.battery_state.to_string(),
        record.activity.to_string(),
    ]
}

/// Render records as a JSON array
///
/// Optional fields are absent when unset; decoding the output reproduces the
/// records field-for-field.
pub fn records_to_json(records: &[Record]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Which formats to write and where
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub csv: bool,
    pub json: bool,
    /// Destination directory; the system temp directory when unset
    pub output_dir: Option<PathBuf>,
}

/// Results of an export operation with output paths
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub csv_path: Option<PathBuf>,
    pub json_path: Option<PathBuf>,
    pub record_count: usize,
}

/// Write the selected formats to disk
///
/// Filenames embed the collection timestamp in milliseconds
/// (`sensor_data_<unix-ms>`) so repeated exports do not collide. The output
/// directory is created if missing. Any I/O failure surfaces as
/// [`CollectorError::Export`]; no file is reported that was not written.
pub fn export_records(records: &[Record], options: &ExportOptions) -> Result<ExportReport> {
    let dir = options
        .output_dir
        .clone()
        .unwrap_or_else(std::env::temp_dir);
    fs::create_dir_all(&dir).map_err(|err| {
        CollectorError::Export(format!("cannot create {}: {err}", dir.display()))
    })?;

    let stamp = Utc::now().timestamp_millis();
    let mut report = ExportReport {
        csv_path: None,
        json_path: None,
        record_count: records.len(),
    };

    if options.csv {
        let path = dir.join(format!("sensor_data_{stamp}.csv"));
        let text = records_to_csv(records)?;
        fs::write(&path, text).map_err(|err| {
            CollectorError::Export(format!("cannot write {}: {err}", path.display()))
        })?;
        tracing::info!(path = %path.display(), records = records.len(), "CSV export written");
        report.csv_path = Some(path);
    }

    if options.json {
        let path = dir.join(format!("sensor_data_{stamp}.json"));
        let text = records_to_json(records)?;
        fs::write(&path, text).map_err(|err| {
            CollectorError::Export(format!("cannot write {}: {err}", path.display()))
        })?;
        tracing::info!(path = %path.display(), records = records.len(), "JSON export written");
        report.json_path = Some(path);
    }

    Ok(report)
}
