//! Sequential HTTP test harness for the LTI roleplay backend.
//!
//! # Overview
//! Runs a fixed sequence of named test cases against a live backend,
//! compares observed status codes against expectations, carries captured
//! values (scenario id, session token) between dependent groups, and
//! renders a final pass/fail report.
//!
//! # Design
//! - Every counted test case goes through `Harness::run_test`; the
//!   `tests_run` counter moves on every invocation, `tests_passed` only on
//!   a status match.
//! - The network sits behind the `Transport` trait so test doubles can
//!   script responses and count calls; `UreqTransport` is the real thing
//!   (blocking, 10-second timeout, redirects observed rather than
//!   followed).
//! - Response bodies decode to a tagged `ResponseBody`: JSON when it
//!   parses, raw text otherwise, never an error.
//! - A single failing call never aborts the run; only the database-init,
//!   scenarios, and LTI launch groups gate the process exit code.

pub mod error;
pub mod harness;
pub mod http;
pub mod report;
pub mod suite;
pub mod transport;
pub mod types;

pub use error::HarnessError;
pub use harness::{Harness, TestResult};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestBody, ResponseBody};
pub use report::RunSummary;
pub use transport::{Transport, UreqTransport};
