//! Simulated sensor sources
//!
//! Stand-ins for platform sensors so the pipeline can run and be tested
//! anywhere. The environment sensor mirrors the reference simulation
//! (humidity 30-70 %, temperature 15-25 °C, refreshed every 2 s); the location
//! source is a random walk around a configurable origin.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;

use crate::provider::{
    Acceleration, ActivityProvider, BatteryProvider, BatteryReading, EnvironmentProvider,
    EnvironmentReading, LocationFix, LocationProvider, MotionProvider, NetworkProvider, Provider,
    ProviderSet, Reading,
};
use crate::types::Activity;

fn take_task(slot: &Mutex<Option<JoinHandle<()>>>) -> Option<JoinHandle<()>> {
    slot.lock().unwrap_or_else(|e| e.into_inner()).take()
}

fn store_task(slot: &Mutex<Option<JoinHandle<()>>>, handle: JoinHandle<()>) {
    *slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(handle);
}

/// Simulated humidity/temperature sensor backed by a background task
pub struct SimEnvironmentSensor {
    reading: Reading<EnvironmentReading>,
    period: Duration,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl SimEnvironmentSensor {
    pub fn new() -> Self {
        Self::with_period(Duration::from_secs(2))
    }

    pub fn with_period(period: Duration) -> Self {
        Self {
            reading: Reading::new(),
            period,
            task: Mutex::new(None),
        }
    }
}

impl Default for SimEnvironmentSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for SimEnvironmentSensor {
    fn start(&self) {
        self.stop();
        let reading = self.reading.clone();
        let period = self.period;
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let value = {
                    let mut rng = rand::rng();
                    EnvironmentReading {
                        humidity: rng.random_range(30.0..=70.0),
                        temperature: rng.random_range(15.0..=25.0),
                    }
                };
                reading.publish(value);
            }
        });
        store_task(&self.task, handle);
    }

    fn stop(&self) {
        if let Some(handle) = take_task(&self.task) {
            handle.abort();
        }
    }
}

impl EnvironmentProvider for SimEnvironmentSensor {
    fn current_reading(&self) -> Option<EnvironmentReading> {
        self.reading.get()
    }
}

/// Simulated GPS: a random walk around an origin point
pub struct SimLocationSource {
    reading: Reading<LocationFix>,
    origin: (f64, f64),
    period: Duration,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl SimLocationSource {
    pub fn new(origin: (f64, f64), period: Duration) -> Self {
        Self {
            reading: Reading::new(),
            origin,
            period,
            task: Mutex::new(None),
        }
    }
}

impl Provider for SimLocationSource {
    fn start(&self) {
        self.stop();
        let reading = self.reading.clone();
        let (mut lat, mut lon) = self.origin;
        let period = self.period;
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let fix = {
                    let mut rng = rand::rng();
                    lat += rng.random_range(-0.0001..=0.0001);
                    lon += rng.random_range(-0.0001..=0.0001);
                    LocationFix {
                        latitude: lat,
                        longitude: lon,
                        altitude: rng.random_range(30.0..=40.0),
                        speed: rng.random_range(0.0..=2.0),
                    }
                };
                reading.publish(fix);
            }
        });
        store_task(&self.task, handle);
    }

    fn stop(&self) {
        if let Some(handle) = take_task(&self.task) {
            handle.abort();
        }
    }
}

impl LocationProvider for SimLocationSource {
    fn current_fix(&self) -> Option<LocationFix> {
        self.reading.get()
    }
}

/// Location source whose fixes are published by the caller
///
/// Handy for driving a scripted path through a zone in tests and demos.
#[derive(Default)]
pub struct ManualLocation {
    reading: Reading<LocationFix>,
}

impl ManualLocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared cell to publish fixes into
    pub fn handle(&self) -> Reading<LocationFix> {
        self.reading.clone()
    }
}

impl Provider for ManualLocation {}

impl LocationProvider for ManualLocation {
    fn current_fix(&self) -> Option<LocationFix> {
        self.reading.get()
    }
}

/// Motion source whose readings are published by the caller
#[derive(Default)]
pub struct ManualMotion {
    reading: Reading<Acceleration>,
}

impl ManualMotion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> Reading<Acceleration> {
        self.reading.clone()
    }
}

impl Provider for ManualMotion {}

impl MotionProvider for ManualMotion {
    fn current_acceleration(&self) -> Option<Acceleration> {
        self.reading.get()
    }
}

/// Constant network description
pub struct FixedNetwork(pub String);

impl Provider for FixedNetwork {}

impl NetworkProvider for FixedNetwork {
    fn current_network(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Constant battery reading
pub struct FixedBattery(pub BatteryReading);

impl Provider for FixedBattery {}

impl BatteryProvider for FixedBattery {
    fn current_battery(&self) -> Option<BatteryReading> {
        Some(self.0)
    }
}

/// Constant activity classification
pub struct FixedActivity(pub Activity);

impl Provider for FixedActivity {}

impl ActivityProvider for FixedActivity {
    fn current_activity(&self) -> Activity {
        self.0
    }
}

/// A fully simulated provider set for running the pipeline without hardware
pub fn simulated_providers(origin: (f64, f64)) -> ProviderSet {
    use crate::types::BatteryState;

    ProviderSet {
        location: Arc::new(SimLocationSource::new(origin, Duration::from_millis(200))),
        motion: Arc::new(ManualMotion::new()),
        environment: Arc::new(SimEnvironmentSensor::new()),
        network: Arc::new(FixedNetwork("Wi-Fi - Simulated".to_string())),
        battery: Arc::new(FixedBattery(BatteryReading {
            level: 1.0,
            state: BatteryState::Full,
        })),
        activity: Arc::new(FixedActivity(Activity::Stationary)),
    }
}
