//! Sensor source abstraction
//!
//! Each sensor kind is a small trait exposing the last cached reading plus
//! start/stop lifecycle hooks. Concrete providers own their own update source
//! (a background task, a platform subscription, a simulation) and publish into
//! a [`Reading`] cell; the sampler only ever reads the cell and never blocks
//! waiting for a sensor. "No value yet" is an ordinary state, not an error.

use std::sync::{Arc, Mutex};

use crate::types::{Activity, BatteryState};

/// Latest-value cell shared between a background update source and the sampler
///
/// Values are published and read whole under a lock, so a reader always sees
/// the most recent complete value, never a torn one.
#[derive(Debug)]
pub struct Reading<T> {
    inner: Arc<Mutex<Option<T>>>,
}

impl<T: Clone> Reading<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(None)),
        }
    }

    pub fn publish(&self, value: T) {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = Some(value);
    }

    pub fn get(&self) -> Option<T> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn clear(&self) {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl<T> Clone for Reading<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> Default for Reading<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// One GPS fix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    /// Degrees
    pub latitude: f64,
    /// Degrees
    pub longitude: f64,
    /// Meters
    pub altitude: f64,
    /// Meters per second; raw sensor output, may be negative
    pub speed: f64,
}

/// One accelerometer reading, m/s² per axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Acceleration {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Ambient humidity and temperature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentReading {
    /// Percent
    pub humidity: f64,
    /// Degrees Celsius
    pub temperature: f64,
}

/// Battery level and charging state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryReading {
    /// 0.0..=1.0
    pub level: f32,
    pub state: BatteryState,
}

/// Lifecycle shared by every sensor kind
///
/// `start` may spawn background work and must be called from within a tokio
/// runtime; both hooks default to no-ops for sources with nothing to manage.
pub trait Provider: Send + Sync {
    fn start(&self) {}
    fn stop(&self) {}
}

pub trait LocationProvider: Provider {
    fn current_fix(&self) -> Option<LocationFix>;
}

pub trait MotionProvider: Provider {
    fn current_acceleration(&self) -> Option<Acceleration>;
}

pub trait EnvironmentProvider: Provider {
    fn current_reading(&self) -> Option<EnvironmentReading>;
}

pub trait NetworkProvider: Provider {
    /// Human-readable connectivity description, e.g. "Wi-Fi - Orange"
    fn current_network(&self) -> Option<String>;
}

pub trait BatteryProvider: Provider {
    fn current_battery(&self) -> Option<BatteryReading>;
}

pub trait ActivityProvider: Provider {
    fn current_activity(&self) -> Activity;
}

/// The full set of sensor sources feeding one sampler
#[derive(Clone)]
pub struct ProviderSet {
    pub location: Arc<dyn LocationProvider>,
    pub motion: Arc<dyn MotionProvider>,
    pub environment: Arc<dyn EnvironmentProvider>,
    pub network: Arc<dyn NetworkProvider>,
    pub battery: Arc<dyn BatteryProvider>,
    pub activity: Arc<dyn ActivityProvider>,
}

impl ProviderSet {
    pub fn start_all(&self) {
        self.location.start();
        self.motion.start();
        self.environment.start();
        self.network.start();
        self.battery.start();
        self.activity.start();
    }

    pub fn stop_all(&self) {
        self.location.stop();
        self.motion.stop();
        self.environment.stop();
        self.network.stop();
        self.battery.stop();
        self.activity.stop();
    }
}

impl Default for ProviderSet {
    /// A set where no sensor ever reports a value, exercising the documented
    /// default field behavior
    fn default() -> Self {
        let null = Arc::new(NullProvider);
        Self {
            location: null.clone(),
            motion: null.clone(),
            environment: null.clone(),
            network: null.clone(),
            battery: null.clone(),
            activity: null,
        }
    }
}

/// A provider with no data source; every read reports "no value"
pub struct NullProvider;

impl Provider for NullProvider {}

impl LocationProvider for NullProvider {
    fn current_fix(&self) -> Option<LocationFix> {
        None
    }
}

impl MotionProvider for NullProvider {
    fn current_acceleration(&self) -> Option<Acceleration> {
        None
    }
}

impl EnvironmentProvider for NullProvider {
    fn current_reading(&self) -> Option<EnvironmentReading> {
        None
    }
}

impl NetworkProvider for NullProvider {
    fn current_network(&self) -> Option<String> {
        None
    }
}

impl BatteryProvider for NullProvider {
    fn current_battery(&self) -> Option<BatteryReading> {
        None
    }
}

impl ActivityProvider for NullProvider {
    fn current_activity(&self) -> Activity {
        Activity::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_publish_and_get() {
        let cell: Reading<EnvironmentReading> = Reading::new();
        assert!(cell.get().is_none());

        cell.publish(EnvironmentReading {
            humidity: 45.0,
            temperature: 20.0,
        });
        let value = cell.get().unwrap();
        assert_eq!(value.humidity, 45.0);

        // A clone shares the same cell
        let other = cell.clone();
        other.publish(EnvironmentReading {
            humidity: 50.0,
            temperature: 21.0,
        });
        assert_eq!(cell.get().unwrap().humidity, 50.0);

        cell.clear();
        assert!(other.get().is_none());
    }

    #[test]
    fn test_null_providers_report_no_value() {
        let set = ProviderSet::default();
        assert!(set.location.current_fix().is_none());
        assert!(set.motion.current_acceleration().is_none());
        assert!(set.environment.current_reading().is_none());
        assert!(set.network.current_network().is_none());
        assert!(set.battery.current_battery().is_none());
        assert_eq!(set.activity.current_activity(), Activity::Unknown);
    }
}
