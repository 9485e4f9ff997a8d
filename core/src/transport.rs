//! The seam between request building and the network.
//!
//! # Design
//! Clients never perform I/O themselves; every query method takes a
//! `Transport` and hands it the `HttpRequest` it built. `UreqTransport` is
//! the blocking implementation used by the binary. Tests substitute
//! scripted transports that record what was sent.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
///
/// Non-2xx statuses are data, not errors: implementations return them as an
/// `HttpResponse` and reserve `Err` for failures where no response exists.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Default timeout applied to every request made through `UreqTransport`.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking transport backed by a `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&request.path);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&request.path);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Send `request` and return the response only if it came back ok.
///
/// Transport failures and non-ok statuses both collapse to `None`; the
/// query methods map that to their "no data" value.
pub(crate) fn fetch_ok(transport: &impl Transport, request: HttpRequest) -> Option<HttpResponse> {
    let method = request.method.as_str();
    let url = request.path.clone();
    debug!(method, %url, "sending request");
    match transport.execute(request) {
        Ok(response) if response.is_ok() => {
            debug!(method, %url, status = response.status, "request succeeded");
            Some(response)
        }
        Ok(response) => {
            warn!(method, %url, status = response.status, "request returned non-ok status");
            None
        }
        Err(e) => {
            warn!(method, %url, error = %e, "request failed");
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport for unit tests.

    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;

    /// Replays queued responses in order and records every request.
    /// Running out of responses is a transport failure.
    #[derive(Default)]
    pub struct ScriptedTransport {
        responses: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
        pub requests: RefCell<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, status: u16, body: serde_json::Value) -> Self {
            self.responses
                .borrow_mut()
                .push_back(Ok(HttpResponse::new(status, body.to_string())));
            self
        }

        pub fn respond_raw(self, status: u16, body: &str) -> Self {
            self.responses
                .borrow_mut()
                .push_back(Ok(HttpResponse::new(status, body)));
            self
        }

        pub fn fail(self, message: &str) -> Self {
            self.responses
                .borrow_mut()
                .push_back(Err(ApiError::Transport(message.to_string())));
            self
        }

        pub fn urls(&self) -> Vec<String> {
            self.requests.borrow().iter().map(|r| r.path.clone()).collect()
        }
    }

    impl Transport for ScriptedTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_string())))
        }
    }
}
