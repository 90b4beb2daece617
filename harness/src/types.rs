//! Request DTOs and response navigation for the roleplay backend.
//!
//! # Design
//! Requests get explicit record shapes with the wire casing the backend
//! expects. Responses stay as `serde_json::Value` and are navigated through
//! the helpers below: the backend's id type is unspecified (string or
//! number, depending on the store behind it), and the harness must tolerate
//! extra fields it has never seen, so deserializing into rigid structs
//! would make the harness brittle for no gain.

use serde::Serialize;
use serde_json::Value;

/// Payload for `POST /api/admin/scenarios`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScenario {
    pub title: String,
    pub description: String,
    pub objective: String,
    pub bot_tone: String,
    pub bot_context: String,
    pub bot_character: String,
    pub learning_objectives: Vec<String>,
}

/// Payload for `POST /api/roleplay/start`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRoleplay {
    pub user_id: i64,
    pub scenario_id: String,
    pub context_id: String,
    pub resource_link_id: String,
}

/// Form-encoded payload simulating an LMS launch, used to bootstrap a
/// backend user. Field names are the standard LTI basic-launch parameters.
#[derive(Debug, Clone, Serialize)]
pub struct LtiLaunchForm {
    pub user_id: String,
    pub lis_person_name_full: String,
    pub lis_person_contact_email_primary: String,
    pub roles: String,
    pub context_id: String,
    pub resource_link_id: String,
}

/// Normalize an id that may arrive as a JSON string or number.
fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// The `scenarios` array of a list response, if present.
pub fn scenario_array(body: &Value) -> Option<&Vec<Value>> {
    body.get("scenarios")?.as_array()
}

/// Id of the first scenario in a list response.
pub fn first_scenario_id(body: &Value) -> Option<String> {
    scenario_array(body)?.first()?.get("id").and_then(id_string)
}

/// Id of the scenario inside a create response envelope.
pub fn created_scenario_id(body: &Value) -> Option<String> {
    body.get("scenario")?.get("id").and_then(id_string)
}

/// Session token of a roleplay start response.
pub fn session_token(body: &Value) -> Option<String> {
    body.get("sessionToken").and_then(id_string)
}
