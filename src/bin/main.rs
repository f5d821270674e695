//! CLI binary for the sensor collection pipeline
//!
//! Runs a simulated collection session: starts the sampler against simulated
//! sensor sources, collects for the requested duration, then exports the
//! buffered records per the selected flags.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Arg, Command};
use sensorlog::{
    export_records, simulated_providers, ExportOptions, Notifier, RecordBuffer, Sampler, Zone,
    ZoneTracker,
};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("sensorlog")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Collect multi-sensor records at a fixed rate, detect zone crossings, export CSV/JSON.")
        .arg(
            Arg::new("interval-ms")
                .long("interval-ms")
                .help("Sampling period in milliseconds (default 10, i.e. ~100 Hz)")
                .value_name("MS")
                .default_value("10"),
        )
        .arg(
            Arg::new("duration-secs")
                .long("duration-secs")
                .help("How long to collect before stopping")
                .value_name("SECS")
                .default_value("10"),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .help("Export the session to a CSV file (sensor_data_<timestamp>.csv)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Export the session to a JSON file (sensor_data_<timestamp>.json)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for export files (default: system temp directory)")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("push-url")
                .long("push-url")
                .help("Endpoint for best-effort status/record pushes (e.g. http://host:5001/api/push_data)")
                .value_name("URL"),
        )
        .arg(
            Arg::new("zone")
                .long("zone")
                .help("Geofence as two corner points: lat1,lon1,lat2,lon2 (any corner order)")
                .value_name("COORDS"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let level = if matches.get_flag("debug") {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    let interval_ms: u64 = matches
        .get_one::<String>("interval-ms")
        .expect("has default")
        .parse()
        .context("--interval-ms must be an integer")?;
    if interval_ms == 0 {
        bail!("--interval-ms must be at least 1");
    }
    let duration_secs: u64 = matches
        .get_one::<String>("duration-secs")
        .expect("has default")
        .parse()
        .context("--duration-secs must be an integer")?;

    let zone = match matches.get_one::<String>("zone") {
        Some(spec) => parse_zone(spec)?,
        None => Zone::default(),
    };
    let tracker = Arc::new(Mutex::new(ZoneTracker::new(zone)));

    let notifier = matches
        .get_one::<String>("push-url")
        .map(|url| Notifier::spawn(url.clone()));

    let buffer = RecordBuffer::new();
    let providers = simulated_providers((
        (zone.min_lat + zone.max_lat) / 2.0,
        (zone.min_lon + zone.max_lon) / 2.0,
    ));

    let mut sampler = Sampler::new(providers, Arc::clone(&tracker), buffer.clone(), notifier);
    sampler.start(Duration::from_millis(interval_ms)).await;
    tokio::time::sleep(Duration::from_secs(duration_secs)).await;
    sampler.stop().await;

    let records = buffer.snapshot();
    let passages = tracker
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .passage_count();
    tracing::info!(records = records.len(), passages, "collection session finished");

    let options = ExportOptions {
        csv: matches.get_flag("csv"),
        json: matches.get_flag("json"),
        output_dir: matches.get_one::<String>("output-dir").map(PathBuf::from),
    };
    if options.csv || options.json {
        let report = export_records(&records, &options).context("export failed")?;
        if let Some(path) = &report.csv_path {
            println!("CSV:  {}", path.display());
        }
        if let Some(path) = &report.json_path {
            println!("JSON: {}", path.display());
        }
    }

    Ok(())
}

/// Parse "lat1,lon1,lat2,lon2" into a normalized zone
fn parse_zone(spec: &str) -> Result<Zone> {
    let parts: Vec<f64> = spec
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .context("--zone expects four comma-separated numbers")?;
    if parts.len() != 4 {
        bail!("--zone expects lat1,lon1,lat2,lon2, got {} values", parts.len());
    }
    Ok(Zone::from_corners((parts[0], parts[1]), (parts[2], parts[3]))?)
}
