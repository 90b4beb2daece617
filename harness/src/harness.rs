//! The harness state and the generic test executor.
//!
//! # Design
//! All mutable run state lives on `Harness`: the pass/run counters and the
//! session bag (`scenario_id`, `session_token`) carried between dependent
//! test groups. Nothing is global, so independent harnesses can run in
//! parallel under the test runner. `run_test` is the single execution path
//! every counted test case goes through.

use crate::error::HarnessError;
use crate::http::{HttpMethod, HttpRequest, RequestBody, ResponseBody};
use crate::transport::Transport;

/// Outcome of one executed test case. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct TestResult {
    pub passed: bool,
    pub status: Option<u16>,
    pub body: ResponseBody,
    pub error: Option<String>,
}

impl TestResult {
    fn errored(error: HarnessError) -> Self {
        Self {
            passed: false,
            status: None,
            body: ResponseBody::Empty,
            error: Some(error.to_string()),
        }
    }
}

/// Sequential test harness for one backend instance.
pub struct Harness<T> {
    base_url: String,
    pub(crate) transport: T,
    pub tests_run: u32,
    pub tests_passed: u32,
    pub scenario_id: Option<String>,
    pub session_token: Option<String>,
}

impl<T: Transport> Harness<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            tests_run: 0,
            tests_passed: 0,
            scenario_id: None,
            session_token: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Execute one named test case and compare the observed status against
    /// `expected_status`.
    ///
    /// Increments `tests_run` on every invocation and `tests_passed` only on
    /// a status match. When the caller supplies no headers, the Content-Type
    /// for the body encoding is filled in. Transport failures and
    /// body-encoding failures come back as a failed `TestResult`, never as
    /// an `Err` — a broken call must not take down the run.
    pub fn run_test(
        &mut self,
        name: &str,
        method: HttpMethod,
        endpoint: &str,
        expected_status: u16,
        body: Option<RequestBody>,
        headers: Option<Vec<(String, String)>>,
    ) -> TestResult {
        let url = self.url_for(endpoint);
        self.tests_run += 1;
        println!();
        println!("-> {name}");
        println!("   {} {url}", method.as_str());

        let mut header_list = headers.unwrap_or_default();
        if header_list.is_empty() {
            if let Some(body) = &body {
                header_list.push(("Content-Type".to_string(), body.content_type().to_string()));
            }
        }

        let encoded = match body.as_ref().map(RequestBody::encode).transpose() {
            Ok(encoded) => encoded,
            Err(e) => {
                println!("   failed: {e}");
                return TestResult::errored(e);
            }
        };

        let request = HttpRequest {
            method,
            url,
            headers: header_list,
            body: encoded,
        };

        match self.transport.execute(&request) {
            Ok(response) => {
                let passed = response.status == expected_status;
                if passed {
                    self.tests_passed += 1;
                    println!("   passed (status {})", response.status);
                } else {
                    println!(
                        "   failed: expected {expected_status}, got {}",
                        response.status
                    );
                }
                println!("   response: {}", preview(&response.body, 200));
                TestResult {
                    passed,
                    status: Some(response.status),
                    body: ResponseBody::parse(&response.body),
                    error: None,
                }
            }
            Err(e) => {
                println!("   failed: {e}");
                TestResult::errored(e)
            }
        }
    }
}

/// First `limit` characters of a body, for progress output.
fn preview(body: &str, limit: usize) -> &str {
    match body.char_indices().nth(limit) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
