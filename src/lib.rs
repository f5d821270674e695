//! Periodic multi-sensor collection pipeline
//!
//! This library snapshots the current state of several independently-updating
//! sensor sources at a fixed sampling rate, assembles one timestamped record
//! per tick, buffers the session in memory, detects geofence entries, and
//! serializes the buffered history to CSV or JSON on demand.
//!
//! # Quick Start
//!
//! Run a short simulated session and export it:
//! ```rust,no_run
//! use std::sync::{Arc, Mutex};
//! use std::time::Duration;
//! use sensorlog::{
//!     export_records, simulated_providers, ExportOptions, RecordBuffer, Sampler, ZoneTracker,
//! };
//!
//! # #[tokio::main] async fn main() {
//! let buffer = RecordBuffer::new();
//! let tracker = Arc::new(Mutex::new(ZoneTracker::default()));
//! let providers = simulated_providers((48.8566, 2.3522));
//!
//! let mut sampler = Sampler::new(providers, tracker, buffer.clone(), None);
//! sampler.start(Duration::from_millis(10)).await;
//! tokio::time::sleep(Duration::from_secs(5)).await;
//! sampler.stop().await;
//!
//! let options = ExportOptions { csv: true, ..ExportOptions::default() };
//! let report = export_records(&buffer.snapshot(), &options).unwrap();
//! println!("wrote {:?}", report.csv_path);
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`provider`] - one trait per sensor kind plus the [`Reading`] cell that
//!   background update sources publish into
//! - [`sampler`] - the periodic driver; one tick reads every cached value,
//!   evaluates the zone and appends one [`Record`]
//! - [`types`] - the [`Record`] model and the [`Zone`]/[`ZoneTracker`]
//!   geofence state machine
//! - [`buffer`] - the append-only session buffer with snapshot reads
//! - [`export`] - pure CSV/JSON renderers and the file-writing layer
//! - [`notify`] - fire-and-forget HTTP push of status and record events
//! - [`sim`] - simulated providers for running without hardware

pub mod buffer;
pub mod error;
pub mod export;
pub mod notify;
pub mod provider;
pub mod sampler;
pub mod sim;
pub mod types;

pub use buffer::*;
pub use error::*;
pub use export::*;
pub use notify::*;
pub use provider::*;
pub use sampler::*;
pub use sim::simulated_providers;
pub use types::*;
