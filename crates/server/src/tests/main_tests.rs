use super::*;
use crate::mailer::{Mailer, OutgoingEmail};
use async_trait::async_trait;
use axum::{body, body::Body, http::Request, response::Response};
use tower::ServiceExt;

struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _email: &OutgoingEmail) -> anyhow::Result<()> {
        anyhow::bail!("relay refused connection")
    }
}

fn test_app_with(mailer: Arc<dyn Mailer>, settings: &Settings) -> Router {
    let state = AppState {
        api: ApiContext {
            mailer,
            owner_email: settings.owner_email.clone(),
        },
    };
    build_router(Arc::new(state), settings)
}

fn test_app() -> Router {
    test_app_with(Arc::new(LogMailer), &Settings::default())
}

fn post_contact(body: impl Into<Body>) -> Request<Body> {
    Request::post(CONTACT_ROUTE)
        .header("content-type", "application/json")
        .body(body.into())
        .expect("request")
}

async fn json_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

fn valid_payload() -> serde_json::Value {
    serde_json::json!({
        "name": "Linus",
        "email": "linus@example.com",
        "subject": "Kernel",
        "message": "Just a hobby, won't be big."
    })
}

#[tokio::test]
async fn health_route_reports_ok() {
    let request = Request::get(HEALTH_ROUTE)
        .body(Body::empty())
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let health: HealthStatus = json_body(response).await;
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn valid_contact_is_accepted() {
    let response = test_app()
        .oneshot(post_contact(valid_payload().to_string()))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let accepted: ContactAccepted = json_body(response).await;
    assert!(accepted.success);
    assert_eq!(accepted.message, api::ACCEPTED_MESSAGE);
}

#[tokio::test]
async fn subject_may_be_omitted() {
    let mut payload = valid_payload();
    payload
        .as_object_mut()
        .expect("object")
        .remove("subject");
    let response = test_app()
        .oneshot(post_contact(payload.to_string()))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn blank_name_is_unprocessable_with_detail() {
    let mut payload = valid_payload();
    payload["name"] = serde_json::json!("   ");
    let response = test_app()
        .oneshot(post_contact(payload.to_string()))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let err: ApiError = json_body(response).await;
    assert_eq!(err.code, ErrorCode::Validation);
    assert_eq!(err.detail, api::REQUIRED_FIELDS_DETAIL);
}

#[tokio::test]
async fn invalid_email_is_unprocessable() {
    let mut payload = valid_payload();
    payload["email"] = serde_json::json!("not-an-email");
    let response = test_app()
        .oneshot(post_contact(payload.to_string()))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let err: ApiError = json_body(response).await;
    assert_eq!(err.detail, api::INVALID_EMAIL_DETAIL);
}

#[tokio::test]
async fn malformed_json_is_unprocessable_with_detail() {
    for body in ["{not json", r#"{"name":"only a name"}"#] {
        let response = test_app()
            .oneshot(post_contact(body))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{body}");

        let err: ApiError = json_body(response).await;
        assert_eq!(err.code, ErrorCode::Validation);
        assert!(!err.detail.is_empty());
    }
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let settings = Settings {
        max_body_bytes: 128,
        ..Settings::default()
    };
    let app = test_app_with(Arc::new(LogMailer), &settings);
    let mut payload = valid_payload();
    payload["message"] = serde_json::json!("x".repeat(1024));

    let response = app
        .oneshot(post_contact(payload.to_string()))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let err: ApiError = json_body(response).await;
    assert_eq!(err.code, ErrorCode::PayloadTooLarge);
}

#[tokio::test]
async fn mailer_failure_is_internal_error() {
    let app = test_app_with(Arc::new(FailingMailer), &Settings::default());
    let response = app
        .oneshot(post_contact(valid_payload().to_string()))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let err: ApiError = json_body(response).await;
    assert_eq!(err.detail, api::SEND_FAILED_DETAIL);
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri(CONTACT_ROUTE)
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-credentials")
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );
}

#[tokio::test]
async fn wildcard_origin_setting_still_builds_router() {
    let mut settings = Settings::default();
    config::apply_env(&mut settings, |key| {
        (key == "APP__ALLOWED_ORIGINS").then(|| "*".to_string())
    });
    let request = Request::get(HEALTH_ROUTE)
        .header("origin", "https://any.example")
        .body(Body::empty())
        .expect("request");
    let response = test_app_with(Arc::new(LogMailer), &settings)
        .oneshot(request)
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

#[tokio::test]
async fn wildcard_in_settings_keeps_listed_origins() {
    let settings = Settings {
        allowed_origins: vec!["*".into(), "http://localhost:3000".into()],
        ..Settings::default()
    };
    let request = Request::get(HEALTH_ROUTE)
        .header("origin", "http://localhost:3000")
        .body(Body::empty())
        .expect("request");
    let response = test_app_with(Arc::new(LogMailer), &settings)
        .oneshot(request)
        .await
        .expect("response");
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );
}

#[tokio::test]
async fn cors_ignores_unknown_origin() {
    let request = Request::get(HEALTH_ROUTE)
        .header("origin", "https://evil.example")
        .body(Body::empty())
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
