use serde::{Deserialize, Serialize};

use crate::error::{CollectorError, Result};

/// A normalized lat/lon bounding rectangle used for geofence entry detection
///
/// Invariant: `min_lat <= max_lat` and `min_lon <= max_lon`, regardless of the
/// order the corner points were given in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Zone {
    /// Build a zone from two arbitrary corner points, normalizing min/max
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Result<Self> {
        for &v in &[a.0, a.1, b.0, b.1] {
            if !v.is_finite() {
                return Err(CollectorError::InvalidZone(format!(
                    "non-finite coordinate: {v}"
                )));
            }
        }
        Ok(Self {
            min_lat: a.0.min(b.0),
            max_lat: a.0.max(b.0),
            min_lon: a.1.min(b.1),
            max_lon: a.1.max(b.1),
        })
    }

    /// Inclusive bounding-box containment test
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}

impl Default for Zone {
    /// A small rectangle in central Paris, matching the collector's
    /// out-of-the-box configuration
    fn default() -> Self {
        Self {
            min_lat: 48.8560,
            max_lat: 48.8570,
            min_lon: 2.3500,
            max_lon: 2.3530,
        }
    }
}

/// Result of evaluating one coordinate against the tracked zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneEvaluation {
    pub is_inside: bool,
    /// True only on the outside-to-inside transition between two consecutive
    /// evaluations (rising edge)
    pub just_entered: bool,
}

/// Tracks zone membership across consecutive samples and counts entries
///
/// `evaluate` must be called exactly once per sample; calling it from other
/// contexts (display refresh, retries) would double-count or miss transitions
/// at sample boundaries.
#[derive(Debug, Clone)]
pub struct ZoneTracker {
    zone: Zone,
    was_inside: bool,
    passage_count: u32,
}

impl ZoneTracker {
    pub fn new(zone: Zone) -> Self {
        Self {
            zone,
            was_inside: false,
            passage_count: 0,
        }
    }

    /// Update membership state and report whether this sample is a new entry
    pub fn evaluate(&mut self, lat: f64, lon: f64) -> ZoneEvaluation {
        let is_inside = self.zone.contains(lat, lon);
        let just_entered = is_inside && !self.was_inside;
        if just_entered {
            self.passage_count += 1;
        }
        self.was_inside = is_inside;
        ZoneEvaluation {
            is_inside,
            just_entered,
        }
    }

    /// Replace the tracked rectangle
    ///
    /// Membership state and the passage counter deliberately survive the
    /// replacement, preserving historical crossing counts.
    pub fn set_zone(&mut self, zone: Zone) {
        self.zone = zone;
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn is_inside(&self) -> bool {
        self.was_inside
    }

    pub fn passage_count(&self) -> u32 {
        self.passage_count
    }
}

impl Default for ZoneTracker {
    fn default() -> Self {
        Self::new(Zone::default())
    }
}
