mod common;

use askama::Template;
use askql_web::handlers::query::ConversationTemplate;
use askql_web::session::Workspace;
use axum::http::StatusCode;
use common::{body_string, TestApp};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn successful_query_renders_the_pretty_printed_payload() {
    let app = TestApp::spawn().await;
    let cookie = app.login("analyst@example.com").await;

    Mock::given(method("POST"))
        .and(path("/api/generate-sql"))
        .and(header("authorization", "Bearer test-analysis-token"))
        .and(body_partial_json(serde_json::json!({
            "prompt": "Who had the highest salary in 2024?",
            "type": "postgres",
            "connectionID": "test-connection",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "sql": "SELECT name FROM employees ORDER BY salary DESC LIMIT 1"
        })))
        .expect(1)
        .mount(&app.analysis_server)
        .await;

    let response = app
        .post_form(
            "/query",
            &[("prompt", "Who had the highest salary in 2024?")],
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    // The payload is pretty-printed (and HTML-escaped by the template)
    assert!(body.contains("&quot;sql&quot;"));
    assert!(body.contains("SELECT name FROM employees ORDER BY salary DESC LIMIT 1"));
    assert!(body.contains("Query succeeded."));
    // The prompt shows up as the user's message
    assert!(body.contains("Who had the highest salary in 2024?"));
}

#[tokio::test]
async fn server_error_produces_a_failed_outcome_with_the_status_code() {
    let app = TestApp::spawn().await;
    let cookie = app.login("analyst@example.com").await;

    Mock::given(method("POST"))
        .and(path("/api/generate-sql"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.analysis_server)
        .await;

    let response = app
        .post_form("/query", &[("prompt", "anything")], Some(&cookie))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("500"));
    assert!(!body.contains("Query succeeded."));
}

#[tokio::test]
async fn whitespace_prompt_issues_no_request_and_stays_idle() {
    let app = TestApp::spawn().await;
    let cookie = app.login("analyst@example.com").await;

    Mock::given(method("POST"))
        .and(path("/api/generate-sql"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.analysis_server)
        .await;

    let response = app
        .post_form("/query", &[("prompt", "   \t ")], Some(&cookie))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    // No user bubble, no settled outcome
    assert!(!body.contains("bg-blue-100"));
    assert!(!body.contains("Query succeeded."));
}

#[tokio::test]
async fn failed_query_can_be_resubmitted_immediately() {
    let app = TestApp::spawn().await;
    let cookie = app.login("analyst@example.com").await;

    Mock::given(method("POST"))
        .and(path("/api/generate-sql"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&app.analysis_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/generate-sql"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"sql": "SELECT 1"})),
        )
        .mount(&app.analysis_server)
        .await;

    let response = app
        .post_form("/query", &[("prompt", "first try")], Some(&cookie))
        .await;
    let body = body_string(response).await;
    assert!(body.contains("502"));

    // The failure is replaced, not accumulated
    let response = app
        .post_form("/query", &[("prompt", "second try")], Some(&cookie))
        .await;
    let body = body_string(response).await;
    assert!(body.contains("Query succeeded."));
    assert!(!body.contains("502"));
}

#[tokio::test]
async fn attached_dataset_feeds_the_conversation_log() {
    let app = TestApp::spawn().await;
    let cookie = app.login("analyst@example.com").await;

    let response = app
        .post_form("/dataset", &[("name", "payroll.sql")], Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Successfully attached &quot;payroll.sql&quot;."));

    // Removing the dataset clears the log
    let response = app.delete("/dataset", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(!body.contains("Successfully attached"));
    assert!(body.contains("Attach a SQL dataset"));
}

#[tokio::test]
async fn rendering_the_same_outcome_twice_is_identical() {
    let mut workspace = Workspace::default();
    workspace.attach_dataset("payroll.sql");
    workspace
        .flow
        .begin("Who had the highest salary in 2024?", "postgres", "conn-1")
        .unwrap();
    workspace.flow.succeed(&serde_json::json!({"sql": "SELECT 1"}));

    let first = ConversationTemplate::from_workspace(&workspace)
        .render()
        .unwrap();
    let second = ConversationTemplate::from_workspace(&workspace)
        .render()
        .unwrap();
    assert_eq!(first, second);
}
