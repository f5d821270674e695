//! In-memory record storage for one collection session
//!
//! The buffer is append-only and unbounded: a session is expected to be
//! started, stopped, exported and cleared by the operator, not to run as an
//! open-ended stream. The sampler tick is the only writer; exports read
//! concurrently through `snapshot`.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::types::Record;

/// Cheap-to-clone handle to the shared record sequence
#[derive(Debug, Clone, Default)]
pub struct RecordBuffer {
    inner: Arc<Mutex<Vec<Record>>>,
}

impl RecordBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Record>> {
        // A panic while holding the lock cannot leave a record half-written,
        // so a poisoned buffer is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Append one record; O(1) amortized, always succeeds
    pub fn append(&self, record: Record) {
        self.lock().push(record);
    }

    /// A consistent copy of the buffer, safe to iterate while appends continue
    pub fn snapshot(&self) -> Vec<Record> {
        self.lock().clone()
    }

    /// Empty the buffer; atomic with respect to in-flight appends
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Activity, BatteryState};
    use chrono::Utc;

    fn record(latitude: f64) -> Record {
        Record {
            timestamp: Utc::now(),
            latitude,
            longitude: 0.0,
            altitude: 0.0,
            speed: 0.0,
            acceleration_x: None,
            acceleration_y: None,
            acceleration_z: None,
            humidity: None,
            temperature: None,
            network: "Unknown".to_string(),
            battery_level: None,
            battery_state: BatteryState::Unknown,
            activity: Activity::Unknown,
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let buffer = RecordBuffer::new();
        for i in 0..5 {
            buffer.append(record(i as f64));
        }
        let records = buffer.snapshot();
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].latitude, 0.0);
        assert_eq!(records[4].latitude, 4.0);
    }

    #[test]
    fn test_snapshot_is_isolated() {
        let buffer = RecordBuffer::new();
        buffer.append(record(1.0));
        let snapshot = buffer.snapshot();
        buffer.append(record(2.0));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_clear() {
        let buffer = RecordBuffer::new();
        buffer.append(record(1.0));
        buffer.append(record(2.0));
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.snapshot().len(), 0);
    }
}
