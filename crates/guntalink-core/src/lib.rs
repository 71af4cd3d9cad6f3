//! Core data model for the Guntalink heater bridge.
//!
//! This crate holds everything the other crates agree on:
//! - **Measurement / MeasurementSet**: one complete poll of the device,
//!   keyed by field name.
//! - **Snapshot**: a timestamped, published poll result.
//! - **SensorKind**: classification of a field by its unit string.
//! - **DeviceConfig**: the boundary configuration surface.
//! - **PollError**: the failure taxonomy for one poll cycle.
//!
//! No I/O happens here; transport and scheduling live in `guntalink-client`
//! and `guntalink-poller`.

pub mod config;
pub mod error;
pub mod measurement;
pub mod sensor;

pub use config::DeviceConfig;
pub use error::{PollError, PollResult};
pub use measurement::{Measurement, MeasurementSet, Snapshot};
pub use sensor::{SensorKind, SensorValue};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
