//! The backend test groups, in their fixed execution order.
//!
//! # Design
//! Each group is a method returning its pass/fail verdict; dependent values
//! (the captured scenario id, the session token) travel through the harness
//! session bag. Two deliberate policies from the original suite are kept:
//! admin PUT/DELETE pass vacuously when no created id could be parsed (one
//! missing precondition must not cascade into three failures), while the
//! roleplay steps fail immediately when their precondition is absent.

use crate::harness::Harness;
use crate::http::{HttpMethod, HttpRequest, RequestBody};
use crate::report::RunSummary;
use crate::transport::Transport;
use crate::types::{
    created_scenario_id, first_scenario_id, scenario_array, session_token, LtiLaunchForm,
    NewScenario, StartRoleplay,
};

fn banner(title: &str) {
    println!();
    println!("{}", "=".repeat(50));
    println!("{title}");
    println!("{}", "=".repeat(50));
}

/// The fixed payload used by the admin create/update steps.
fn admin_test_scenario() -> NewScenario {
    NewScenario {
        title: "Test Scenario".to_string(),
        description: "A test scenario for API testing".to_string(),
        objective: "Test API functionality".to_string(),
        bot_tone: "Professional and helpful".to_string(),
        bot_context: "You are a test assistant helping with API testing".to_string(),
        bot_character: "Test Assistant".to_string(),
        learning_objectives: vec![
            "Test objective 1".to_string(),
            "Test objective 2".to_string(),
        ],
    }
}

/// The fixed form payload used to bootstrap a backend user.
fn bootstrap_form() -> LtiLaunchForm {
    LtiLaunchForm {
        user_id: "test_user_123".to_string(),
        lis_person_name_full: "Test User".to_string(),
        lis_person_contact_email_primary: "test@example.com".to_string(),
        roles: "Learner".to_string(),
        context_id: "test_context".to_string(),
        resource_link_id: "test_resource".to_string(),
    }
}

impl<T: Transport> Harness<T> {
    /// The database is considered initialized when the scenarios endpoint
    /// answers 200 with a non-empty list.
    pub fn check_database_init(&mut self) -> bool {
        banner("TESTING DATABASE INITIALIZATION");

        let result = self.run_test(
            "Database Initialization Check",
            HttpMethod::Get,
            "/api/scenarios",
            200,
            None,
            None,
        );
        if !result.passed {
            return false;
        }

        match result.body.as_json().and_then(scenario_array) {
            Some(scenarios) if !scenarios.is_empty() => {
                println!("   database initialized with {} scenarios", scenarios.len());
                let has_default = scenarios.iter().any(|s| {
                    s.get("title")
                        .and_then(|t| t.as_str())
                        .is_some_and(|t| t.contains("Customer Service"))
                });
                if has_default {
                    println!("   default Customer Service Excellence scenario found");
                } else {
                    println!("   default scenario not found");
                }
                true
            }
            _ => {
                println!("   database appears empty");
                false
            }
        }
    }

    /// List scenarios and capture the first id for the roleplay group. An
    /// empty list is logged but is not a failure here.
    pub fn check_scenarios(&mut self) -> bool {
        banner("TESTING SCENARIOS API");

        let result = self.run_test(
            "Get Scenarios",
            HttpMethod::Get,
            "/api/scenarios",
            200,
            None,
            None,
        );
        if result.passed {
            if let Some(body) = result.body.as_json() {
                match scenario_array(body) {
                    Some(scenarios) if !scenarios.is_empty() => {
                        self.scenario_id = first_scenario_id(body);
                        println!("   found {} scenarios", scenarios.len());
                        let title = scenarios[0]
                            .get("title")
                            .and_then(|t| t.as_str())
                            .unwrap_or("Unknown");
                        println!("   first scenario: {title}");
                    }
                    _ => println!("   no scenarios found"),
                }
            }
        }
        result.passed
    }

    /// Plain launch info must answer 200; the test-flag launch must answer
    /// with a 307 redirect. Both calls always run.
    pub fn check_lti_launch(&mut self) -> bool {
        banner("TESTING LTI LAUNCH API");

        let info = self.run_test(
            "LTI Launch Info",
            HttpMethod::Get,
            "/api/lti/launch",
            200,
            None,
            None,
        );
        let redirect = self.run_test(
            "LTI Test Launch",
            HttpMethod::Get,
            "/api/lti/launch?test=true",
            307,
            None,
            None,
        );
        info.passed && redirect.passed
    }

    /// Create/update/delete lifecycle against the admin collection. Update
    /// and delete only run when the create step passed and its response
    /// yielded an id; otherwise they pass vacuously, with no call made.
    pub fn check_admin_scenarios(&mut self) -> bool {
        banner("TESTING ADMIN SCENARIOS API");

        let list = self.run_test(
            "Get Admin Scenarios",
            HttpMethod::Get,
            "/api/admin/scenarios",
            200,
            None,
            None,
        );

        let payload = admin_test_scenario();
        let create_body = match RequestBody::json(&payload) {
            Ok(body) => body,
            Err(e) => {
                println!("   could not encode create payload: {e}");
                return false;
            }
        };
        let create = self.run_test(
            "Create Test Scenario",
            HttpMethod::Post,
            "/api/admin/scenarios",
            201,
            Some(create_body),
            None,
        );
        // An id from a mis-statused create is not trusted; a failed create
        // must leave the update and delete steps skipped.
        let created_id = if create.passed {
            create.body.as_json().and_then(created_scenario_id)
        } else {
            None
        };

        let update_ok = match &created_id {
            Some(id) => {
                let mut updated = payload.clone();
                updated.title = "Updated Test Scenario".to_string();
                match RequestBody::json(&updated) {
                    Ok(body) => {
                        self.run_test(
                            "Update Test Scenario",
                            HttpMethod::Put,
                            &format!("/api/admin/scenarios/{id}"),
                            200,
                            Some(body),
                            None,
                        )
                        .passed
                    }
                    Err(e) => {
                        println!("   could not encode update payload: {e}");
                        false
                    }
                }
            }
            None => {
                println!("   no created scenario id, skipping update");
                true
            }
        };

        let delete_ok = match &created_id {
            Some(id) => {
                self.run_test(
                    "Delete Test Scenario",
                    HttpMethod::Delete,
                    &format!("/api/admin/scenarios/{id}"),
                    200,
                    None,
                    None,
                )
                .passed
            }
            None => {
                println!("   no created scenario id, skipping delete");
                true
            }
        };

        list.passed && create.passed && update_ok && delete_ok
    }

    /// Best-effort user bootstrap via a simulated LMS launch. Bypasses
    /// `run_test`: the counters stay untouched, no status is asserted, and
    /// the returned flag only says whether the call completed at all.
    pub fn bootstrap_user(&mut self) -> bool {
        println!();
        println!("-> creating test user via LTI simulation");

        let body = match RequestBody::form(&bootstrap_form()) {
            Ok(body) => body,
            Err(e) => {
                println!("   could not encode launch form: {e}");
                return false;
            }
        };
        let encoded = match body.encode() {
            Ok(encoded) => encoded,
            Err(e) => {
                println!("   could not encode launch form: {e}");
                return false;
            }
        };
        let request = HttpRequest {
            method: HttpMethod::Post,
            url: self.url_for("/api/lti/launch"),
            headers: vec![("Content-Type".to_string(), body.content_type().to_string())],
            body: Some(encoded),
        };
        match self.transport.execute(&request) {
            Ok(response) => {
                println!("   LTI launch status: {}", response.status);
                true
            }
            Err(e) => {
                println!("   LTI launch error: {e}");
                false
            }
        }
    }

    /// Start a roleplay session against the scenario captured earlier. No
    /// captured scenario id means no call is made and the group fails.
    pub fn check_roleplay_start(&mut self) -> bool {
        banner("TESTING ROLEPLAY START API");

        let Some(scenario_id) = self.scenario_id.clone() else {
            println!("   no scenario id available for testing");
            return false;
        };

        if !self.bootstrap_user() {
            println!("   could not create test user, trying with userId 1");
        }

        let payload = StartRoleplay {
            user_id: 1,
            scenario_id,
            context_id: "test_context".to_string(),
            resource_link_id: "test_resource".to_string(),
        };
        let body = match RequestBody::json(&payload) {
            Ok(body) => body,
            Err(e) => {
                println!("   could not encode start payload: {e}");
                return false;
            }
        };
        let result = self.run_test(
            "Start Roleplay Session",
            HttpMethod::Post,
            "/api/roleplay/start",
            200,
            Some(body),
            None,
        );
        if result.passed {
            self.session_token = result.body.as_json().and_then(session_token);
            match &self.session_token {
                Some(token) => println!("   session token: {token}"),
                None => println!("   no session token in response"),
            }
        }
        result.passed
    }

    /// Fetch the session created by the start step. No captured token means
    /// no call is made and the group fails.
    pub fn check_roleplay_session(&mut self) -> bool {
        banner("TESTING ROLEPLAY SESSION API");

        let Some(token) = self.session_token.clone() else {
            println!("   no session token available for testing");
            return false;
        };

        self.run_test(
            "Get Roleplay Session",
            HttpMethod::Get,
            &format!("/api/roleplay/session/{token}"),
            200,
            None,
            None,
        )
        .passed
    }

    /// Run every group in order and aggregate the verdicts.
    pub fn run_all(&mut self) -> RunSummary {
        println!("starting roleplay backend API tests");
        println!("base URL: {}", self.base_url());

        let database_init = self.check_database_init();
        let scenarios = self.check_scenarios();
        let lti_launch = self.check_lti_launch();
        let admin_scenarios = self.check_admin_scenarios();
        let roleplay_start = self.check_roleplay_start();
        let roleplay_session = self.check_roleplay_session();

        RunSummary {
            database_init,
            scenarios,
            lti_launch,
            admin_scenarios,
            roleplay_start,
            roleplay_session,
            tests_run: self.tests_run,
            tests_passed: self.tests_passed,
        }
    }
}
