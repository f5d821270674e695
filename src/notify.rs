//! Best-effort push of collection events to a remote endpoint
//!
//! Events are handed to a background task through an unbounded channel, so a
//! slow or unreachable endpoint can never stall the sampling loop. Delivery
//! failures and timeouts are logged and dropped: the push is a side effect,
//! not part of the collection contract.

use std::time::Duration;

use serde_json::json;
use tokio::sync::mpsc;

use crate::types::Record;

/// Per-request deadline; a stalled endpoint resolves as a logged failure
/// instead of blocking the push queue
const PUSH_TIMEOUT: Duration = Duration::from_secs(10);

enum PushEvent {
    Status(String),
    Record(String),
}

/// Handle to the background push task
///
/// Cloning shares the queue. When the last handle is dropped the task drains
/// the queue and exits; a push already in flight when the sampler stops is
/// allowed to complete.
#[derive(Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<PushEvent>,
}

impl Notifier {
    /// Spawn the push task targeting `endpoint`; must be called from within a
    /// tokio runtime
    pub fn spawn(endpoint: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(push_loop(endpoint.into(), rx));
        Self { tx }
    }

    /// Enqueue a status message, e.g. "Start collecting data"
    pub fn push_status(&self, status: &str) {
        self.send(PushEvent::Status(status.to_string()));
    }

    /// Enqueue one record for delivery
    pub fn push_record(&self, record: &Record) {
        match serde_json::to_string(record) {
            Ok(body) => self.send(PushEvent::Record(body)),
            Err(err) => tracing::warn!(%err, "failed to serialize record for push"),
        }
    }

    fn send(&self, event: PushEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("push task gone, dropping event");
        }
    }
}

/// The JSON body for one push event
///
/// Record events carry the record JSON as a string under `"data"`, the wire
/// shape the existing push consumer expects.
fn event_body(event: &PushEvent) -> serde_json::Value {
    match event {
        PushEvent::Status(status) => json!({ "status": status }),
        PushEvent::Record(data) => json!({ "status": "record", "data": data }),
    }
}

fn push_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(PUSH_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

async fn push_loop(endpoint: String, mut rx: mpsc::UnboundedReceiver<PushEvent>) {
    let client = push_client();
    while let Some(event) = rx.recv().await {
        match client.post(&endpoint).json(&event_body(&event)).send().await {
            Ok(response) => {
                tracing::debug!(status = %response.status(), "push delivered");
            }
            Err(err) => {
                tracing::warn!(%err, "push failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Activity, BatteryState};
    use chrono::{TimeZone, Utc};

    fn sample_record() -> Record {
        Record {
            timestamp: Utc.with_ymd_and_hms(2025, 2, 19, 14, 30, 0).unwrap(),
            latitude: 48.8565,
            longitude: 2.3515,
            altitude: 35.0,
            speed: 1.2,
            acceleration_x: Some(0.01),
            acceleration_y: None,
            acceleration_z: None,
            humidity: Some(45.0),
            temperature: None,
            network: "4G - Orange".to_string(),
            battery_level: Some(0.8),
            battery_state: BatteryState::Unplugged,
            activity: Activity::Walking,
        }
    }

    #[test]
    fn test_status_event_body_shape() {
        let body = event_body(&PushEvent::Status("Start collecting data".to_string()));
        assert_eq!(body["status"], "Start collecting data");
        assert!(body.get("data").is_none());
    }

    #[test]
    fn test_record_event_body_carries_record_as_json_string() {
        let record = sample_record();
        let data = serde_json::to_string(&record).unwrap();
        let body = event_body(&PushEvent::Record(data));

        assert_eq!(body["status"], "record");
        let data = body["data"]
            .as_str()
            .expect("data must be a JSON string, not a nested object");
        let decoded: Record = serde_json::from_str(data).unwrap();
        assert_eq!(decoded, record);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_never_blocks_pushes() {
        // Nothing listens on this port; every delivery attempt fails fast
        let notifier = Notifier::spawn("http://127.0.0.1:1/api/push_data");
        for _ in 0..50 {
            notifier.push_record(&sample_record());
        }
        notifier.push_status("Stop collecting data");

        // The push task keeps consuming despite the failures: the queue is
        // still open and accepting events
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(notifier.tx.send(PushEvent::Status("ping".to_string())).is_ok());
    }
}
