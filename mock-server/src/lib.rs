use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Redirect,
    routing::{get, post, put},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub objective: String,
    pub bot_tone: String,
    pub bot_context: String,
    pub bot_character: String,
    pub learning_objectives: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub bot_tone: String,
    #[serde(default)]
    pub bot_context: String,
    #[serde(default)]
    pub bot_character: String,
    #[serde(default)]
    pub learning_objectives: Vec<String>,
}

/// LTI launch form fields as sent by an LMS. Only `user_id` is required;
/// real launches carry many more fields, which are ignored here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LtiUser {
    pub user_id: String,
    #[serde(default)]
    pub lis_person_name_full: Option<String>,
    #[serde(default)]
    pub lis_person_contact_email_primary: Option<String>,
    #[serde(default)]
    pub roles: Option<String>,
    #[serde(default)]
    pub context_id: Option<String>,
    #[serde(default)]
    pub resource_link_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRoleplay {
    pub user_id: i64,
    pub scenario_id: Uuid,
    #[serde(default)]
    pub context_id: String,
    #[serde(default)]
    pub resource_link_id: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_token: Uuid,
    pub user_id: i64,
    pub scenario_id: Uuid,
    pub context_id: String,
    pub resource_link_id: String,
}

#[derive(Debug, Deserialize)]
struct LaunchQuery {
    test: Option<bool>,
}

#[derive(Serialize)]
struct ScenarioList {
    scenarios: Vec<Scenario>,
}

#[derive(Serialize)]
struct ScenarioEnvelope {
    scenario: Scenario,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StartedSession {
    session_token: Uuid,
    scenario: Scenario,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
}

#[derive(Serialize)]
struct LaunchInfo {
    message: &'static str,
    methods: [&'static str; 2],
}

#[derive(Default)]
pub struct Backend {
    pub scenarios: Vec<Scenario>,
    pub sessions: HashMap<Uuid, Session>,
    pub users: HashMap<String, LtiUser>,
}

impl Backend {
    /// State as the real backend leaves it after database initialization:
    /// one default scenario.
    pub fn seeded() -> Self {
        let default_scenario = Scenario {
            id: Uuid::new_v4(),
            title: "Customer Service Excellence".to_string(),
            description: "Practice handling a frustrated customer".to_string(),
            objective: "De-escalate and resolve the complaint".to_string(),
            bot_tone: "Frustrated but reasonable".to_string(),
            bot_context: "You are a customer whose order arrived damaged".to_string(),
            bot_character: "Upset customer".to_string(),
            learning_objectives: vec![
                "Active listening".to_string(),
                "Empathy under pressure".to_string(),
            ],
        };
        Self {
            scenarios: vec![default_scenario],
            sessions: HashMap::new(),
            users: HashMap::new(),
        }
    }
}

pub type Db = Arc<RwLock<Backend>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Backend::seeded()));
    Router::new()
        .route("/api/scenarios", get(list_scenarios))
        .route("/api/lti/launch", get(launch_info).post(launch))
        .route(
            "/api/admin/scenarios",
            get(admin_list_scenarios).post(admin_create_scenario),
        )
        .route(
            "/api/admin/scenarios/{id}",
            put(admin_update_scenario).delete(admin_delete_scenario),
        )
        .route("/api/roleplay/start", post(start_roleplay))
        .route("/api/roleplay/session/{token}", get(get_session))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_scenarios(State(db): State<Db>) -> Json<ScenarioList> {
    let backend = db.read().await;
    Json(ScenarioList {
        scenarios: backend.scenarios.clone(),
    })
}

/// GET launch endpoint. With `?test=true` the backend redirects into the
/// frontend with a synthetic session; a plain GET returns usage info.
async fn launch_info(Query(query): Query<LaunchQuery>) -> Result<Json<LaunchInfo>, Redirect> {
    if query.test == Some(true) {
        return Err(Redirect::temporary("/?lti=test"));
    }
    Ok(Json(LaunchInfo {
        message: "LTI launch endpoint",
        methods: ["GET", "POST"],
    }))
}

/// POST launch: upsert the user identified by the LTI form fields, then
/// redirect into the frontend as the real handshake does.
async fn launch(State(db): State<Db>, Form(input): Form<LtiUser>) -> Redirect {
    let mut backend = db.write().await;
    backend.users.insert(input.user_id.clone(), input);
    Redirect::to("/?lti=launch")
}

async fn admin_list_scenarios(State(db): State<Db>) -> Json<ScenarioList> {
    let backend = db.read().await;
    Json(ScenarioList {
        scenarios: backend.scenarios.clone(),
    })
}

async fn admin_create_scenario(
    State(db): State<Db>,
    Json(input): Json<ScenarioInput>,
) -> (StatusCode, Json<ScenarioEnvelope>) {
    let scenario = Scenario {
        id: Uuid::new_v4(),
        title: input.title,
        description: input.description,
        objective: input.objective,
        bot_tone: input.bot_tone,
        bot_context: input.bot_context,
        bot_character: input.bot_character,
        learning_objectives: input.learning_objectives,
    };
    db.write().await.scenarios.push(scenario.clone());
    (StatusCode::CREATED, Json(ScenarioEnvelope { scenario }))
}

async fn admin_update_scenario(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<ScenarioInput>,
) -> Result<Json<ScenarioEnvelope>, StatusCode> {
    let mut backend = db.write().await;
    let scenario = backend
        .scenarios
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    scenario.title = input.title;
    scenario.description = input.description;
    scenario.objective = input.objective;
    scenario.bot_tone = input.bot_tone;
    scenario.bot_context = input.bot_context;
    scenario.bot_character = input.bot_character;
    scenario.learning_objectives = input.learning_objectives;
    Ok(Json(ScenarioEnvelope {
        scenario: scenario.clone(),
    }))
}

async fn admin_delete_scenario(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, StatusCode> {
    let mut backend = db.write().await;
    let before = backend.scenarios.len();
    backend.scenarios.retain(|s| s.id != id);
    if backend.scenarios.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(Deleted { success: true }))
}

async fn start_roleplay(
    State(db): State<Db>,
    Json(input): Json<StartRoleplay>,
) -> Result<Json<StartedSession>, StatusCode> {
    let mut backend = db.write().await;
    let scenario = backend
        .scenarios
        .iter()
        .find(|s| s.id == input.scenario_id)
        .cloned()
        .ok_or(StatusCode::NOT_FOUND)?;
    let session = Session {
        session_token: Uuid::new_v4(),
        user_id: input.user_id,
        scenario_id: input.scenario_id,
        context_id: input.context_id,
        resource_link_id: input.resource_link_id,
    };
    let token = session.session_token;
    backend.sessions.insert(token, session);
    Ok(Json(StartedSession {
        session_token: token,
        scenario,
    }))
}

async fn get_session(
    State(db): State<Db>,
    Path(token): Path<Uuid>,
) -> Result<Json<Session>, StatusCode> {
    let backend = db.read().await;
    backend
        .sessions
        .get(&token)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
