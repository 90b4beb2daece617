//! Request execution behind a trait seam.
//!
//! # Design
//! `Transport` is the only place the harness touches the network, so test
//! doubles can script responses and count calls. `UreqTransport` is the
//! production implementation: statuses come back as data (4xx/5xx are not
//! transport errors), redirects are not followed so a 307 can be asserted
//! on, and every call is bounded by a 10-second timeout.

use std::time::Duration;

use crate::error::HarnessError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one HTTP request. Implemented by the real ureq transport and by
/// scripted test doubles.
pub trait Transport {
    fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, HarnessError>;
}

/// Blocking HTTP transport backed by a ureq agent.
#[derive(Debug)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0)
            .timeout_global(Some(Duration::from_secs(10)))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&mut self, req: &HttpRequest) -> Result<HttpResponse, HarnessError> {
        let result = match (&req.method, &req.body) {
            (HttpMethod::Get, _) => {
                let mut r = self.agent.get(&req.url);
                for (name, value) in &req.headers {
                    r = r.header(name, value);
                }
                r.call()
            }
            (HttpMethod::Delete, _) => {
                let mut r = self.agent.delete(&req.url);
                for (name, value) in &req.headers {
                    r = r.header(name, value);
                }
                r.call()
            }
            (HttpMethod::Post, Some(body)) => {
                let mut r = self.agent.post(&req.url);
                for (name, value) in &req.headers {
                    r = r.header(name, value);
                }
                r.send(body.as_bytes())
            }
            (HttpMethod::Post, None) => {
                let mut r = self.agent.post(&req.url);
                for (name, value) in &req.headers {
                    r = r.header(name, value);
                }
                r.send_empty()
            }
            (HttpMethod::Put, Some(body)) => {
                let mut r = self.agent.put(&req.url);
                for (name, value) in &req.headers {
                    r = r.header(name, value);
                }
                r.send(body.as_bytes())
            }
            (HttpMethod::Put, None) => {
                let mut r = self.agent.put(&req.url);
                for (name, value) in &req.headers {
                    r = r.header(name, value);
                }
                r.send_empty()
            }
            (HttpMethod::Patch, Some(body)) => {
                let mut r = self.agent.patch(&req.url);
                for (name, value) in &req.headers {
                    r = r.header(name, value);
                }
                r.send(body.as_bytes())
            }
            (HttpMethod::Patch, None) => {
                let mut r = self.agent.patch(&req.url);
                for (name, value) in &req.headers {
                    r = r.header(name, value);
                }
                r.send_empty()
            }
        };

        let mut response = result.map_err(|e| HarnessError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}
