//! Sensor classification by unit string.
//!
//! The device describes each field with a free-form unit. The set of units
//! that get typed treatment is small and closed, so classification is an
//! enum plus one function rather than anything extensible.

use serde::{Deserialize, Serialize};

/// Kind of sensor a field projects to, derived from its unit string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    /// Unit "°C"; value parsed as f64.
    Temperature,
    /// Unit "%"; value parsed as f64.
    Percentage,
    /// Unit "h"; running-hours counter, value parsed as f64.
    Hours,
    /// Unit "d"; running-days counter, value parsed as f64.
    Days,
    /// Any other unit, including empty; value passed through as text.
    Text,
}

impl SensorKind {
    /// Classify a unit string.
    pub fn from_unit(unit: &str) -> Self {
        match unit {
            "°C" => SensorKind::Temperature,
            "%" => SensorKind::Percentage,
            "h" => SensorKind::Hours,
            "d" => SensorKind::Days,
            _ => SensorKind::Text,
        }
    }

    /// Whether this kind carries a numeric value.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, SensorKind::Text)
    }

    /// Interpret a raw value for this kind.
    ///
    /// Numeric kinds return `None` when the value does not parse as a float;
    /// `Text` never fails.
    pub fn interpret(&self, raw: &str) -> Option<SensorValue> {
        if self.is_numeric() {
            raw.trim().parse::<f64>().ok().map(SensorValue::Numeric)
        } else {
            Some(SensorValue::Text(raw.to_string()))
        }
    }
}

/// A classified sensor reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorValue {
    Numeric(f64),
    Text(String),
}

impl SensorValue {
    /// Numeric value, if this is one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SensorValue::Numeric(n) => Some(*n),
            SensorValue::Text(_) => None,
        }
    }
}

impl std::fmt::Display for SensorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorValue::Numeric(n) => write!(f, "{}", n),
            SensorValue::Text(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(SensorKind::from_unit("°C"), SensorKind::Temperature);
        assert_eq!(SensorKind::from_unit("%"), SensorKind::Percentage);
        assert_eq!(SensorKind::from_unit("h"), SensorKind::Hours);
        assert_eq!(SensorKind::from_unit("d"), SensorKind::Days);
        assert_eq!(SensorKind::from_unit(""), SensorKind::Text);
        assert_eq!(SensorKind::from_unit("bar"), SensorKind::Text);
    }

    #[test]
    fn test_numeric_interpret() {
        let kind = SensorKind::Temperature;
        assert_eq!(kind.interpret("21.4"), Some(SensorValue::Numeric(21.4)));
        assert_eq!(kind.interpret(" -3.5 "), Some(SensorValue::Numeric(-3.5)));
        assert_eq!(kind.interpret("AUS"), None);
    }

    #[test]
    fn test_text_interpret() {
        let kind = SensorKind::from_unit("");
        assert_eq!(
            kind.interpret("BEREIT"),
            Some(SensorValue::Text("BEREIT".to_string()))
        );
    }

    #[test]
    fn test_value_display() {
        assert_eq!(SensorValue::Numeric(1523.0).to_string(), "1523");
        assert_eq!(SensorValue::Text("AUS".into()).to_string(), "AUS");
    }
}
