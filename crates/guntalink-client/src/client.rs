//! HTTP transport against the device's embedded web server.

use std::time::Duration;

use guntalink_core::{MeasurementSet, PollError, PollResult};
use reqwest::Client;
use tracing::debug;

use crate::encoding::decode_body;
use crate::parser::parse_feeds;

/// Field description endpoint, one `<name>;<unit>` per line.
pub const DESC_ENDPOINT: &str = "daqdesc.cgi";

/// Field value endpoint, one bare scalar per line.
pub const DATA_ENDPOINT: &str = "daqdata.cgi";

/// Default per-request timeout in seconds. The firmware can hang a socket
/// indefinitely; an unbounded request would stall the poll cycle forever.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// A raw endpoint response before decoding.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Undecoded body bytes.
    pub body: Vec<u8>,
}

/// HTTP client for one heater device.
///
/// Performs exactly one GET per endpoint per call; no retries. A failed or
/// non-200 response on either endpoint fails the whole poll, never a partial
/// result.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    client: Client,
}

impl Default for DeviceClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceClient {
    /// Create a client with the default request timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with an explicit per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Fetch both feeds as raw bytes plus status codes.
    pub async fn fetch_raw(&self, host: &str) -> PollResult<(RawResponse, RawResponse)> {
        let descriptions = self.get(host, DESC_ENDPOINT).await?;
        let values = self.get(host, DATA_ENDPOINT).await?;
        Ok((descriptions, values))
    }

    /// Run one full poll cycle: fetch both feeds, decode, parse.
    pub async fn poll(&self, host: &str) -> PollResult<MeasurementSet> {
        let (descriptions, values) = self.fetch_raw(host).await?;

        if descriptions.status != 200 {
            return Err(PollError::Status {
                endpoint: DESC_ENDPOINT,
                code: descriptions.status,
            });
        }
        if values.status != 200 {
            return Err(PollError::Status {
                endpoint: DATA_ENDPOINT,
                code: values.status,
            });
        }

        let descriptions = decode_body(&descriptions.body);
        let values = decode_body(&values.body);
        parse_feeds(&descriptions, &values)
    }

    async fn get(&self, host: &str, endpoint: &'static str) -> PollResult<RawResponse> {
        let url = format!("http://{}/{}", host, endpoint);
        debug!(%url, "fetching device feed");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PollError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| PollError::Transport(e.to_string()))?
            .to_vec();

        debug!(endpoint, status, bytes = body.len(), "feed fetched");
        Ok(RawResponse { status, body })
    }
}
