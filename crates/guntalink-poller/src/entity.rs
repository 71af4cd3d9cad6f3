//! Projection of snapshots onto typed sensor entities.

use guntalink_core::{SensorKind, SensorValue, Snapshot};
use serde::Serialize;

/// A typed sensor derived from one measurement field.
///
/// The kind is classified once, from the unit seen when the entity is
/// created. If the device later reports a different unit for the same field
/// the original classification wins; the raw unit stays visible on the
/// measurement itself.
#[derive(Debug, Clone, Serialize)]
pub struct SensorEntity {
    /// Stable identifier, `<device name>_<field name>`.
    pub entity_id: String,
    /// Field name this entity reads from the snapshot.
    pub field: String,
    /// Classified sensor kind.
    pub kind: SensorKind,
    /// Unit string at creation time.
    pub unit: String,
}

impl SensorEntity {
    /// Create an entity for `field` as seen in `snapshot`.
    pub fn new(device_name: &str, field: &str, unit: &str) -> Self {
        Self {
            entity_id: format!("{}_{}", device_name, field),
            field: field.to_string(),
            kind: SensorKind::from_unit(unit),
            unit: unit.to_string(),
        }
    }

    /// Current state of this entity in `snapshot`.
    ///
    /// `None` when the field is absent from the snapshot or a numeric kind
    /// fails to parse its value.
    pub fn state(&self, snapshot: &Snapshot) -> Option<SensorValue> {
        let measurement = snapshot.get(&self.field)?;
        self.kind.interpret(&measurement.value)
    }
}

/// Build one entity per field in `snapshot`, sorted by field name so the
/// projection is stable across runs.
pub fn project_entities(snapshot: &Snapshot, device_name: &str) -> Vec<SensorEntity> {
    let mut entities: Vec<SensorEntity> = snapshot
        .measurements
        .iter()
        .map(|(field, m)| SensorEntity::new(device_name, field, &m.unit))
        .collect();
    entities.sort_by(|a, b| a.field.cmp(&b.field));
    entities
}

#[cfg(test)]
mod tests {
    use super::*;
    use guntalink_core::{Measurement, MeasurementSet};

    fn snapshot(fields: &[(&str, &str, &str)]) -> Snapshot {
        let mut set = MeasurementSet::new();
        for (name, value, unit) in fields {
            set.insert(name.to_string(), Measurement::new(*value, *unit));
        }
        Snapshot::new(set)
    }

    #[test]
    fn test_projection_kinds() {
        let snap = snapshot(&[
            ("Aussentemp", "21.4", "°C"),
            ("Leistung", "63", "%"),
            ("Betriebsstunden", "1523", "h"),
            ("Laufzeit", "12", "d"),
            ("Betrieb", "HEIZEN", ""),
        ]);
        let entities = project_entities(&snap, "Gunter");

        assert_eq!(entities.len(), 5);
        let by_field = |f: &str| entities.iter().find(|e| e.field == f).unwrap();
        assert_eq!(by_field("Aussentemp").kind, SensorKind::Temperature);
        assert_eq!(by_field("Leistung").kind, SensorKind::Percentage);
        assert_eq!(by_field("Betriebsstunden").kind, SensorKind::Hours);
        assert_eq!(by_field("Laufzeit").kind, SensorKind::Days);
        assert_eq!(by_field("Betrieb").kind, SensorKind::Text);
        assert_eq!(by_field("Aussentemp").entity_id, "Gunter_Aussentemp");
    }

    #[test]
    fn test_projection_sorted_and_stable() {
        let snap = snapshot(&[("b", "1", "h"), ("a", "2", "h"), ("c", "3", "h")]);
        let entities = project_entities(&snap, "x");
        let fields: Vec<&str> = entities
            .iter()
            .map(|e| e.field.as_str())
            .collect::<Vec<_>>();
        assert_eq!(fields, ["a", "b", "c"]);
    }

    #[test]
    fn test_state_reads_current_snapshot() {
        let first = snapshot(&[("Aussentemp", "21.4", "°C")]);
        let entity = &project_entities(&first, "Gunter")[0];
        assert_eq!(entity.state(&first), Some(SensorValue::Numeric(21.4)));

        let second = snapshot(&[("Aussentemp", "19.0", "°C")]);
        assert_eq!(entity.state(&second), Some(SensorValue::Numeric(19.0)));
    }

    #[test]
    fn test_state_none_for_missing_field() {
        let first = snapshot(&[("Aussentemp", "21.4", "°C")]);
        let entity = &project_entities(&first, "Gunter")[0];
        let gone = snapshot(&[("Leistung", "63", "%")]);
        assert_eq!(entity.state(&gone), None);
    }

    #[test]
    fn test_state_none_for_unparseable_numeric() {
        let snap = snapshot(&[("Aussentemp", "---", "°C")]);
        let entity = &project_entities(&snap, "Gunter")[0];
        assert_eq!(entity.state(&snap), None);
    }

    #[test]
    fn test_kind_frozen_on_unit_change() {
        // Classification happens once; a later unit change is ignored.
        let first = snapshot(&[("Aussentemp", "21.4", "°C")]);
        let entity = &project_entities(&first, "Gunter")[0];
        let changed = snapshot(&[("Aussentemp", "21.4", "F")]);
        assert_eq!(entity.kind, SensorKind::Temperature);
        assert_eq!(entity.state(&changed), Some(SensorValue::Numeric(21.4)));
    }
}
