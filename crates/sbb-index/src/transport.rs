//! HTTP transport to the index service.
//!
//! Everything above this module speaks JSON values and path segments. The
//! [`Transport`] trait is the seam that lets tests run without a server.

use std::time::Duration;

use serde_json::Value;
use tracing::trace;
use ureq::{Agent, Error as UreqError};
use url::Url;

use crate::IndexError;

/// Sends one JSON request to the index service and returns its JSON response.
pub trait Transport {
    /// POSTs `body` to the path built from `segments`.
    ///
    /// Each segment is percent-encoded on its own, so ids containing `/`
    /// stay a single path segment.
    fn post(&self, segments: &[&str], body: &Value) -> Result<Value, IndexError>;
}

/// Blocking HTTP transport backed by a `ureq` agent.
#[derive(Debug)]
pub struct HttpTransport {
    /// Shared agent with the request timeout applied.
    agent: Agent,
    /// Service base URL.
    base: Url,
    /// Value for the `Authorization: ApiKey` header.
    api_key: Option<String>,
}

impl HttpTransport {
    /// Creates a transport for `host`.
    ///
    /// `timeout` bounds each whole request, connect through body.
    pub fn new(host: &str, api_key: Option<String>, timeout: Duration) -> Result<Self, IndexError> {
        let base = Url::parse(host.trim()).map_err(|e| IndexError::InvalidHost {
            host: host.to_string(),
            message: e.to_string(),
        })?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(IndexError::InvalidHost {
                host: host.to_string(),
                message: "expected an http(s) URL".into(),
            });
        }

        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();

        Ok(Self {
            agent: Agent::new_with_config(config),
            base,
            api_key,
        })
    }

    /// Builds the request URL for `segments`.
    fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl Transport for HttpTransport {
    fn post(&self, segments: &[&str], body: &Value) -> Result<Value, IndexError> {
        let url = self.url_for(segments);
        let payload = serde_json::to_vec(body).map_err(|e| IndexError::decode(&e))?;
        trace!(url = %url, bytes = payload.len(), "index request");

        let mut request = self
            .agent
            .post(url.as_str())
            .header("Content-Type", "application/json");
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", &format!("ApiKey {key}"));
        }

        let mut response = request.send(&payload[..]).map_err(|e| match e {
            UreqError::Timeout(_) => IndexError::Timeout,
            other => IndexError::Network(other.to_string()),
        })?;

        let status = response.status().as_u16();
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|e| IndexError::Network(format!("failed to read response: {e}")))?;

        if !(200..300).contains(&status) {
            return Err(IndexError::from_status(status, &text));
        }

        serde_json::from_str(&text).map_err(|e| IndexError::decode(&e))
    }
}
