//! Measurement model for one complete poll of the device.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single named field's current value and unit, as reported by the
/// device's data feed.
///
/// The field name is not stored here; it is the key of the owning
/// [`MeasurementSet`]. Values stay textual until a consumer classifies the
/// field (see [`crate::sensor::SensorKind`]) and decides how to interpret
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    /// Current value, trimmed. Fault channels report `"0"` when idle.
    pub value: String,
    /// Unit string, trimmed. Empty for generic text fields.
    pub unit: String,
}

impl Measurement {
    /// Create a measurement from already-trimmed parts.
    pub fn new(value: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            unit: unit.into(),
        }
    }
}

/// One complete poll of the device: field name to measurement.
///
/// A set is only ever replaced wholesale. On a failed cycle the previous set
/// stays published untouched; partial merges never happen.
pub type MeasurementSet = HashMap<String, Measurement>;

/// A published poll result with the time it was fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Parsed measurements from the cycle that produced this snapshot.
    pub measurements: MeasurementSet,
    /// When the cycle completed.
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    /// Wrap a freshly parsed set with the current time.
    pub fn new(measurements: MeasurementSet) -> Self {
        Self {
            measurements,
            fetched_at: Utc::now(),
        }
    }

    /// Look up a field by name.
    pub fn get(&self, field: &str) -> Option<&Measurement> {
        self.measurements.get(field)
    }

    /// Number of fields in this snapshot.
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    /// Whether the snapshot holds no fields. Should not occur in practice:
    /// the parser rejects empty results before a snapshot is built.
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_lookup() {
        let mut set = MeasurementSet::new();
        set.insert("Aussentemp".to_string(), Measurement::new("21.4", "°C"));
        let snap = Snapshot::new(set);

        assert_eq!(snap.len(), 1);
        assert!(!snap.is_empty());
        assert_eq!(snap.get("Aussentemp").unwrap().unit, "°C");
        assert!(snap.get("Kessel").is_none());
    }

    #[test]
    fn test_measurement_serde_roundtrip() {
        let m = Measurement::new("1523", "h");
        let json = serde_json::to_string(&m).unwrap();
        let back: Measurement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
