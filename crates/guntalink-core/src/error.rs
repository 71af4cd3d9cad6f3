//! Failure taxonomy for a single poll cycle.

use thiserror::Error;

/// Result type for poll cycle operations.
pub type PollResult<T> = Result<T, PollError>;

/// Everything that can fail one poll cycle.
///
/// The original firmware protocol gives callers no way to tell a transport
/// failure from "device reported nothing"; this enum deliberately splits the
/// cases so the coordinator can log and surface them differently. All
/// variants fail the cycle as a whole; individually malformed description
/// lines are skipped inside the parser and never reach this type.
#[derive(Debug, Clone, Error)]
pub enum PollError {
    /// Connection refused, timeout, DNS failure, or any other transport
    /// problem before an HTTP status was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// One of the two endpoints answered with a non-200 status. A single
    /// bad endpoint fails the whole poll; there is no partial result.
    #[error("unexpected status {code} from {endpoint}")]
    Status {
        /// Endpoint path that misbehaved (`daqdesc.cgi` or `daqdata.cgi`).
        endpoint: &'static str,
        code: u16,
    },

    /// Description and value feeds had different line counts. The feeds are
    /// zipped strictly positionally, so a mismatch means a firmware or
    /// protocol assumption broke; logged at error severity upstream.
    #[error("feed line count mismatch: {descriptions} descriptions vs {values} values")]
    LineCountMismatch { descriptions: usize, values: usize },

    /// Both feeds parsed cleanly but produced zero measurements. An empty
    /// poll is never published as valid state.
    #[error("device returned no usable measurements")]
    EmptyResult,
}

impl PollError {
    /// Whether this failure indicates a broken protocol assumption rather
    /// than a routine transient fault.
    pub fn is_structural(&self) -> bool {
        matches!(self, PollError::LineCountMismatch { .. })
    }
}
