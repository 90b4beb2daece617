use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn form_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            http::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(body.to_string())
        .unwrap()
}

// --- scenarios ---

#[tokio::test]
async fn list_scenarios_returns_seeded_default() {
    let resp = app().oneshot(get_request("/api/scenarios")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    let scenarios = json["scenarios"].as_array().unwrap();
    assert_eq!(scenarios.len(), 1);
    assert_eq!(scenarios[0]["title"], "Customer Service Excellence");
    assert!(scenarios[0]["id"].is_string());
}

// --- lti launch ---

#[tokio::test]
async fn launch_info_returns_200() {
    let resp = app().oneshot(get_request("/api/lti/launch")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["message"], "LTI launch endpoint");
}

#[tokio::test]
async fn launch_with_test_flag_redirects_307() {
    let resp = app()
        .oneshot(get_request("/api/lti/launch?test=true"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn launch_post_form_redirects() {
    let resp = app()
        .oneshot(form_request(
            "/api/lti/launch",
            "user_id=test_user_123&lis_person_name_full=Test+User&roles=Learner\
             &context_id=test_context&resource_link_id=test_resource",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn launch_post_without_user_id_is_rejected() {
    let resp = app()
        .oneshot(form_request("/api/lti/launch", "roles=Learner"))
        .await
        .unwrap();

    assert!(resp.status().is_client_error());
}

// --- admin scenarios ---

#[tokio::test]
async fn admin_create_returns_201_with_envelope() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/admin/scenarios",
            r#"{"title":"Test Scenario","botTone":"Professional","learningObjectives":["a"]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let json = body_json(resp).await;
    assert_eq!(json["scenario"]["title"], "Test Scenario");
    assert_eq!(json["scenario"]["botTone"], "Professional");
    assert!(json["scenario"]["id"].is_string());
}

#[tokio::test]
async fn admin_create_rejects_missing_title() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/admin/scenarios",
            r#"{"objective":"no title"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn admin_update_unknown_id_returns_404() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/api/admin/scenarios/00000000-0000-0000-0000-000000000000",
            r#"{"title":"Updated"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_crud_lifecycle() {
    let app = app();

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/scenarios",
            r#"{"title":"Lifecycle"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    let id = created["scenario"]["id"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/admin/scenarios/{id}"),
            r#"{"title":"Lifecycle Updated"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["scenario"]["title"], "Lifecycle Updated");

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/admin/scenarios/{id}"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted = body_json(resp).await;
    assert_eq!(deleted["success"], true);

    let resp = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/admin/scenarios/{id}"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- roleplay ---

#[tokio::test]
async fn start_roleplay_unknown_scenario_returns_404() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/roleplay/start",
            r#"{"userId":1,"scenarioId":"00000000-0000-0000-0000-000000000000"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn start_roleplay_then_fetch_session() {
    let app = app();

    let resp = app.clone().oneshot(get_request("/api/scenarios")).await.unwrap();
    let json = body_json(resp).await;
    let scenario_id = json["scenarios"][0]["id"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/roleplay/start",
            &format!(
                r#"{{"userId":1,"scenarioId":"{scenario_id}","contextId":"ctx","resourceLinkId":"rl"}}"#
            ),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let started = body_json(resp).await;
    let token = started["sessionToken"].as_str().unwrap().to_string();
    assert_eq!(started["scenario"]["id"], scenario_id.as_str());

    let resp = app
        .oneshot(get_request(&format!("/api/roleplay/session/{token}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let session = body_json(resp).await;
    assert_eq!(session["sessionToken"], token.as_str());
    assert_eq!(session["userId"], 1);
    assert_eq!(session["contextId"], "ctx");
}

#[tokio::test]
async fn get_session_unknown_token_returns_404() {
    let resp = app()
        .oneshot(get_request(
            "/api/roleplay/session/00000000-0000-0000-0000-000000000000",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
