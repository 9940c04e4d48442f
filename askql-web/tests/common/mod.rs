//! Test helper module for askql-web integration tests.
//!
//! Spins up wiremock servers standing in for the identity provider and the
//! analysis service, and builds the full router against them.

#![allow(dead_code)]

use askql_web::config::{AnalysisServiceSettings, IdentityProviderSettings};
use askql_web::services::analysis::HttpAnalysisClient;
use askql_web::services::identity::HttpIdentityProvider;
use askql_web::session::SessionRegistry;
use askql_web::startup::build_router;
use askql_web::AppState;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use secrecy::Secret;
use std::sync::Arc;
use tower::util::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub identity_server: MockServer,
    pub analysis_server: MockServer,
}

impl TestApp {
    pub async fn spawn() -> Self {
        askql_web::services::metrics::init_metrics();

        let identity_server = MockServer::start().await;
        let analysis_server = MockServer::start().await;

        let identity_settings = IdentityProviderSettings {
            api_key: Secret::new("test-api-key".to_string()),
            auth_domain: "askql-test.identity.example.com".to_string(),
            project_id: "askql-test".to_string(),
            storage_bucket: "askql-test.appspot.example.com".to_string(),
            messaging_sender_id: "000000000000".to_string(),
            app_id: "1:000000000000:web:test".to_string(),
            measurement_id: "G-TEST".to_string(),
            endpoint: Some(identity_server.uri()),
        };

        let analysis_settings = AnalysisServiceSettings {
            url: format!("{}/api/generate-sql", analysis_server.uri()),
            relay_url: None,
            connection_id: "test-connection".to_string(),
            api_token: Secret::new("test-analysis-token".to_string()),
            dialect: "postgres".to_string(),
            mock_mode: false,
        };

        let identity = Arc::new(HttpIdentityProvider::new(identity_settings));
        let analysis = Arc::new(HttpAnalysisClient::new(analysis_settings.clone()));
        let state = AppState::new(
            identity,
            analysis,
            SessionRegistry::new(),
            analysis_settings,
        );
        let router = build_router(state.clone());

        Self {
            router,
            state,
            identity_server,
            analysis_server,
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn delete(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method("DELETE").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_form(
        &self,
        uri: &str,
        form: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> Response {
        let body = serde_urlencoded::to_string(form).unwrap();
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(builder.body(Body::from(body)).unwrap())
            .await
            .unwrap()
    }

    /// Stub a successful sign-in, perform the login, and return the session
    /// cookie for follow-up requests.
    pub async fn login(&self, email: &str) -> String {
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "localId": "user-1",
                "email": email,
                "idToken": "id-token-1",
                "refreshToken": "refresh-token-1",
            })))
            .mount(&self.identity_server)
            .await;

        let response = self
            .post_form(
                "/login",
                &[("email", email), ("password", "correct horse")],
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("HX-Redirect").unwrap(),
            "/dashboard",
            "login should navigate to the dashboard"
        );
        session_cookie(&response)
    }
}

/// The session cookie pair from `Set-Cookie`, usable as a `Cookie` header.
pub fn session_cookie(response: &Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response sets a session cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
