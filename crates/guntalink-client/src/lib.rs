//! Device client for the Guntalink heater bridge.
//!
//! Talks to the heater's embedded web server over two unauthenticated HTTP
//! GET endpoints and turns the paired plain-text feeds into a
//! [`MeasurementSet`](guntalink_core::MeasurementSet):
//!
//! - `/daqdesc.cgi`: one `<name>;<unit>` description per line
//! - `/daqdata.cgi`: one bare scalar value per line, positionally matched
//!
//! The embedded server does not reliably declare a charset, so response
//! bodies are decoded through a byte-level sniffer instead of trusting HTTP
//! headers. Retry policy lives in `guntalink-poller`; this crate performs
//! exactly one request per endpoint per call.

pub mod client;
pub mod encoding;
pub mod parser;

pub use client::{DeviceClient, RawResponse, DESC_ENDPOINT, DATA_ENDPOINT};
pub use encoding::{decode_body, detect_encoding};
pub use parser::parse_feeds;
