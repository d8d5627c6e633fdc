//! Admin-side client: an HTTP client for the collection routes plus the
//! dashboard controller that reconciles server responses into view state.

pub mod controller;
pub mod state;

pub use controller::AdminController;
pub use state::{DashboardState, FormState, ModalState, Toast, ToastKind};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::service::Collection;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("not logged in")]
    NotAuthenticated,

    #[error("server rejected request: {0}")]
    Api(String),
}

/// HTTP client for the admin API. Holds the session token after login
/// and attaches it, raw and unprefixed, as the Authorization header on
/// every mutating request. Logout is purely a client-side discard.
pub struct AdminClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl AdminClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Resume a session from a previously stored token. Only presence is
    /// checked client-side; the server re-validates on every mutation.
    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: Some(token.into()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn logout(&mut self) {
        self.token = None;
    }

    pub async fn login(&mut self, password: &str) -> Result<(), ClientError> {
        let url = format!("{}/api/admin/login", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "password": password }))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ClientError::InvalidCredentials);
        }
        let body: Value = response.error_for_status()?.json().await?;
        let token = body
            .get("token")
            .and_then(Value::as_str)
            .ok_or_else(|| ClientError::Api("login response missing token".to_string()))?;

        self.token = Some(token.to_string());
        Ok(())
    }

    /// Fetch one collection. Public read, no token needed.
    pub async fn fetch_collection(&self, collection: Collection) -> Result<Vec<Value>, ClientError> {
        let url = self.collection_url(collection);
        let body: Value = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match body {
            Value::Array(items) => Ok(items),
            other => Err(ClientError::Api(format!(
                "expected array response, got {other}"
            ))),
        }
    }

    /// Fetch both collections in parallel, for dashboard mount.
    pub async fn fetch_all(&self) -> Result<(Vec<Value>, Vec<Value>), ClientError> {
        tokio::try_join!(
            self.fetch_collection(Collection::Projects),
            self.fetch_collection(Collection::Experience),
        )
    }

    pub async fn create(
        &self,
        collection: Collection,
        fields: &Map<String, Value>,
    ) -> Result<Vec<Value>, ClientError> {
        let url = self.collection_url(collection);
        let request = self.http.post(&url).json(fields);
        self.send_mutation(request).await
    }

    pub async fn update(
        &self,
        collection: Collection,
        id: i64,
        fields: &Map<String, Value>,
    ) -> Result<Vec<Value>, ClientError> {
        let url = format!("{}/{}", self.collection_url(collection), id);
        let request = self.http.put(&url).json(fields);
        self.send_mutation(request).await
    }

    pub async fn delete(&self, collection: Collection, id: i64) -> Result<Vec<Value>, ClientError> {
        let url = format!("{}/{}", self.collection_url(collection), id);
        let request = self.http.delete(&url);
        self.send_mutation(request).await
    }

    fn collection_url(&self, collection: Collection) -> String {
        format!("{}/api/admin/{}", self.base_url, collection.section())
    }

    /// Attach the token, send, and unwrap the `{success, data}` envelope
    /// into the full post-mutation collection array.
    async fn send_mutation(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Vec<Value>, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::NotAuthenticated)?;
        let response = request.header("Authorization", token).send().await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ClientError::NotAuthenticated);
        }
        if !response.status().is_success() {
            let body: Value = response.json().await.unwrap_or_default();
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(ClientError::Api(message));
        }

        let body: Value = response.json().await?;
        match body.get("data") {
            Some(Value::Array(items)) => Ok(items.clone()),
            _ => Err(ClientError::Api(
                "mutation response missing data array".to_string(),
            )),
        }
    }
}
