//! Final run aggregation and rendering.

use std::fmt;

/// Verdicts of all groups plus the raw counters, produced once per run.
///
/// Only the database-init, scenarios, and LTI launch groups gate the
/// process verdict; the admin and roleplay groups are tracked for the
/// report but an unprovisioned backend user must not fail CI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub database_init: bool,
    pub scenarios: bool,
    pub lti_launch: bool,
    pub admin_scenarios: bool,
    pub roleplay_start: bool,
    pub roleplay_session: bool,
    pub tests_run: u32,
    pub tests_passed: u32,
}

impl RunSummary {
    pub fn pass_rate(&self) -> f64 {
        if self.tests_run == 0 {
            return 0.0;
        }
        f64::from(self.tests_passed) / f64::from(self.tests_run) * 100.0
    }

    pub fn overall_success(&self) -> bool {
        self.database_init && self.scenarios && self.lti_launch
    }

    pub fn groups(&self) -> [(&'static str, bool); 6] {
        [
            ("Database Initialization", self.database_init),
            ("Scenarios API", self.scenarios),
            ("LTI Launch API", self.lti_launch),
            ("Admin Scenarios API", self.admin_scenarios),
            ("Roleplay Start API", self.roleplay_start),
            ("Roleplay Session API", self.roleplay_session),
        ]
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "FINAL TEST RESULTS")?;
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "tests run:    {}", self.tests_run)?;
        writeln!(f, "tests passed: {}", self.tests_passed)?;
        writeln!(f, "success rate: {:.1}%", self.pass_rate())?;
        writeln!(f)?;
        writeln!(f, "detailed results:")?;
        for (name, passed) in self.groups() {
            writeln!(f, "  [{}] {name}", if passed { "pass" } else { "FAIL" })?;
        }
        write!(
            f,
            "overall: {}",
            if self.overall_success() {
                "PASS"
            } else {
                "FAIL"
            }
        )
    }
}
