//! Parser for the paired description and value feeds.

use guntalink_core::{Measurement, MeasurementSet, PollError, PollResult};
use tracing::warn;

/// Marker the firmware puts on unused padding slots in the description feed.
const RESERVED_MARKER: &str = "reserved";

/// Marker for fault/status channels. An empty value on such a channel means
/// "no fault", not "no data".
const FAULT_MARKER: &str = "Störung";

/// Value substituted for a blank fault channel.
const NO_FAULT_VALUE: &str = "0";

/// Parse the two newline-delimited feeds into a measurement set.
///
/// Lines are paired strictly by position; a line-count mismatch between the
/// feeds is a protocol violation and fails the parse outright rather than
/// truncating to the shorter feed. Individually malformed description lines
/// (no single `;` separating name from unit) are logged and skipped. A parse
/// that yields zero measurements is also a failure: an empty poll must not
/// be published as valid state.
///
/// Pure function; the same inputs always produce the same set.
pub fn parse_feeds(descriptions: &str, values: &str) -> PollResult<MeasurementSet> {
    let description_lines: Vec<&str> = descriptions.lines().collect();
    let value_lines: Vec<&str> = values.lines().collect();

    if description_lines.len() != value_lines.len() {
        return Err(PollError::LineCountMismatch {
            descriptions: description_lines.len(),
            values: value_lines.len(),
        });
    }

    let mut parsed = MeasurementSet::new();
    for (description, value) in description_lines.into_iter().zip(value_lines) {
        if description.contains(RESERVED_MARKER) {
            continue;
        }

        // Fault channels report absence-of-value as "no fault".
        let value = if description.contains(FAULT_MARKER) && value.trim().is_empty() {
            NO_FAULT_VALUE
        } else {
            value
        };

        let mut parts = description.splitn(3, ';');
        let (name, unit) = match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(unit), None) => (name, unit),
            _ => {
                warn!(description, "skipping unsplittable description line");
                continue;
            }
        };

        // Last-wins on duplicate names, in line order.
        parsed.insert(
            name.trim().to_string(),
            Measurement::new(value.trim(), unit.trim()),
        );
    }

    if parsed.is_empty() {
        return Err(PollError::EmptyResult);
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurement<'a>(set: &'a MeasurementSet, name: &str) -> &'a Measurement {
        set.get(name).unwrap_or_else(|| panic!("missing {}", name))
    }

    #[test]
    fn test_well_formed_feeds() {
        let set = parse_feeds(
            "Aussentemp;°C\nreserved;x\nKessel Betriebsstunden;h\n",
            "21.4\n0\n1523\n",
        )
        .unwrap();

        assert_eq!(set.len(), 2);
        let temp = measurement(&set, "Aussentemp");
        assert_eq!(temp.value, "21.4");
        assert_eq!(temp.unit, "°C");
        let hours = measurement(&set, "Kessel Betriebsstunden");
        assert_eq!(hours.value, "1523");
        assert_eq!(hours.unit, "h");
        assert!(!set.contains_key("reserved"));
    }

    #[test]
    fn test_parse_is_pure() {
        let descriptions = "Aussentemp;°C\nLeistung;%\n";
        let values = "21.4\n63\n";
        let first = parse_feeds(descriptions, values).unwrap();
        let second = parse_feeds(descriptions, values).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reserved_lines_never_emitted() {
        let set = parse_feeds("reserved;x\nreserved 2;y\nPuffer oben;°C\n", "1\n2\n74.0\n")
            .unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.keys().all(|name| !name.contains("reserved")));
    }

    #[test]
    fn test_blank_fault_channel_reads_zero() {
        let set = parse_feeds("Störung;\n", "  \n").unwrap();
        let fault = measurement(&set, "Störung");
        assert_eq!(fault.value, "0");
        assert_eq!(fault.unit, "");
    }

    #[test]
    fn test_populated_fault_channel_passes_through() {
        let set = parse_feeds("Störung;\n", " F012 \n").unwrap();
        assert_eq!(measurement(&set, "Störung").value, "F012");
    }

    #[test]
    fn test_line_count_mismatch_fails() {
        let err = parse_feeds("a;°C\nb;%\nc;h\nd;d\ne;\n", "1\n2\n3\n4\n").unwrap_err();
        match err {
            PollError::LineCountMismatch {
                descriptions,
                values,
            } => {
                assert_eq!(descriptions, 5);
                assert_eq!(values, 4);
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_feeds_fail() {
        assert!(matches!(parse_feeds("", ""), Err(PollError::EmptyResult)));
    }

    #[test]
    fn test_all_reserved_fails() {
        let err = parse_feeds("reserved;x\nreserved;y\n", "0\n0\n").unwrap_err();
        assert!(matches!(err, PollError::EmptyResult));
    }

    #[test]
    fn test_unsplittable_line_skipped_not_fatal() {
        // "Betriebscode" has no ';' and is dropped; the rest still parses.
        let set = parse_feeds("Betriebscode\nAussentemp;°C\n", "7\n21.4\n").unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains_key("Aussentemp"));
    }

    #[test]
    fn test_too_many_separators_skipped() {
        let set = parse_feeds("a;b;c\nAussentemp;°C\n", "1\n21.4\n").unwrap();
        assert_eq!(set.len(), 1);
        assert!(!set.contains_key("a"));
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let set = parse_feeds("Leistung;%\nLeistung;%\n", "10\n20\n").unwrap();
        assert_eq!(measurement(&set, "Leistung").value, "20");
    }

    #[test]
    fn test_values_and_units_trimmed() {
        let set = parse_feeds("Puffer unten ; °C \n", "  38.5 \n").unwrap();
        let m = measurement(&set, "Puffer unten");
        assert_eq!(m.value, "38.5");
        assert_eq!(m.unit, "°C");
    }
}
