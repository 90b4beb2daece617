use std::process::ExitCode;

use api_harness::{Harness, UreqTransport};

fn main() -> ExitCode {
    let base_url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("BASE_URL").ok())
        .unwrap_or_else(|| "http://localhost:3001".to_string());

    let mut harness = Harness::new(&base_url, UreqTransport::new());
    let summary = harness.run_all();

    println!();
    println!("{summary}");

    if summary.overall_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
