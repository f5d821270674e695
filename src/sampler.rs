//! Periodic collection driver
//!
//! One tokio task ticks at the configured interval; each tick reads the
//! cached value of every provider, evaluates the geofence, assembles one
//! immutable [`Record`], appends it to the buffer and enqueues it for push.
//! No step in the tick blocks on I/O and no step retries: a provider with no
//! cached value simply yields absent fields for that tick.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::buffer::RecordBuffer;
use crate::notify::Notifier;
use crate::provider::ProviderSet;
use crate::types::{BatteryState, Record, ZoneTracker};

/// The periodic driver producing one record per tick
///
/// Single-writer discipline: the sampler's tick is the only thing that
/// appends to the buffer, so records land in strict chronological order.
pub struct Sampler {
    providers: ProviderSet,
    tracker: Arc<Mutex<ZoneTracker>>,
    buffer: RecordBuffer,
    notifier: Option<Notifier>,
    running: Option<(watch::Sender<bool>, JoinHandle<()>)>,
}

impl Sampler {
    pub fn new(
        providers: ProviderSet,
        tracker: Arc<Mutex<ZoneTracker>>,
        buffer: RecordBuffer,
        notifier: Option<Notifier>,
    ) -> Self {
        Self {
            providers,
            tracker,
            buffer,
            notifier,
            running: None,
        }
    }

    /// Begin periodic collection at `interval`
    ///
    /// Starting while already running restarts cleanly: the previous loop is
    /// stopped before the new one begins.
    pub async fn start(&mut self, interval: Duration) {
        if self.running.is_some() {
            self.stop().await;
        }
        self.providers.start_all();
        if let Some(notifier) = &self.notifier {
            notifier.push_status("Start collecting data");
        }

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let providers = self.providers.clone();
        let tracker = Arc::clone(&self.tracker);
        let buffer = self.buffer.clone();
        let notifier = self.notifier.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        collect_once(&providers, &tracker, &buffer, notifier.as_ref());
                    }
                    _ = shutdown_rx.changed() => break,
                }
            }
        });

        tracing::info!(interval_ms = interval.as_millis() as u64, "sampler started");
        self.running = Some((shutdown_tx, handle));
    }

    /// Halt collection
    ///
    /// When this returns, no further tick fires and no further record is
    /// appended. A push already handed to the notifier may still complete.
    pub async fn stop(&mut self) {
        let Some((shutdown_tx, handle)) = self.running.take() else {
            return;
        };
        let _ = shutdown_tx.send(true);
        let _ = handle.await;
        self.providers.stop_all();
        if let Some(notifier) = &self.notifier {
            notifier.push_status("Stop collecting data");
        }
        tracing::info!(records = self.buffer.len(), "sampler stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn buffer(&self) -> &RecordBuffer {
        &self.buffer
    }
}

/// One sampling tick: read every cached value, evaluate the zone, append
fn collect_once(
    providers: &ProviderSet,
    tracker: &Mutex<ZoneTracker>,
    buffer: &RecordBuffer,
    notifier: Option<&Notifier>,
) {
    let fix = providers.location.current_fix();
    // With no fix the zone is evaluated against (0,0); degenerate but
    // defined, see the zone tracker docs.
    let (latitude, longitude, altitude, speed) = match fix {
        Some(f) => (f.latitude, f.longitude, f.altitude, f.speed.max(0.0)),
        None => (0.0, 0.0, 0.0, 0.0),
    };

    {
        let mut tracker = tracker.lock().unwrap_or_else(|e| e.into_inner());
        let evaluation = tracker.evaluate(latitude, longitude);
        if evaluation.just_entered {
            tracing::debug!(
                passage = tracker.passage_count(),
                latitude,
                longitude,
                "entered zone"
            );
        }
    }

    let acceleration = providers.motion.current_acceleration();
    let environment = providers.environment.current_reading();
    let battery = providers.battery.current_battery();

    let record = Record {
        timestamp: Utc::now(),
        latitude,
        longitude,
        altitude,
        speed,
        acceleration_x: acceleration.map(|a| a.x),
        acceleration_y: acceleration.map(|a| a.y),
        acceleration_z: acceleration.map(|a| a.z),
        humidity: environment.map(|e| e.humidity),
        temperature: environment.map(|e| e.temperature),
        network: providers
            .network
            .current_network()
            .unwrap_or_else(|| "Unknown".to_string()),
        battery_level: battery.map(|b| b.level),
        battery_state: battery.map(|b| b.state).unwrap_or(BatteryState::Unknown),
        activity: providers.activity.current_activity(),
    };

    buffer.append(record.clone());
    if let Some(notifier) = notifier {
        notifier.push_record(&record);
    }
}
