#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use portfolio_api::handlers::{router, AppState};
use portfolio_api::mailer::{ContactMessage, MailError, Mailer};
use portfolio_api::store::SectionStore;

/// In-process app over an in-memory store. Each test gets its own
/// database, so tests never interfere with each other.
pub struct TestApp {
    pub router: Router,
    pub store: SectionStore,
    pub mail_count: Arc<AtomicUsize>,
}

struct CountingMailer {
    sent: Arc<AtomicUsize>,
}

#[async_trait]
impl Mailer for CountingMailer {
    async fn send_contact(&self, _message: &ContactMessage) -> Result<(), MailError> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub async fn spawn_app() -> TestApp {
    let store = SectionStore::in_memory()
        .await
        .expect("in-memory store should open");
    let mail_count = Arc::new(AtomicUsize::new(0));
    let mailer = Arc::new(CountingMailer {
        sent: mail_count.clone(),
    });

    let state = AppState::new(store.clone(), mailer);
    TestApp {
        router: router(state),
        store,
        mail_count,
    }
}

/// The password the login route accepts in tests. Mirrors the config's
/// own resolution so a pre-set ADMIN_PASSWORD env does not break tests.
pub fn admin_password() -> String {
    std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string())
}

impl TestApp {
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, token);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request should build");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router should respond");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should collect");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body should be JSON")
        };
        (status, value)
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.request("GET", path, None, None).await
    }

    /// Login with the configured password and return the session token.
    pub async fn login(&self) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/api/admin/login",
                None,
                Some(serde_json::json!({ "password": admin_password() })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"]
            .as_str()
            .expect("login response should carry a token")
            .to_string()
    }
}
