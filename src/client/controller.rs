//! Dashboard controller binding the HTTP client to the view state.
//! Every action calls the corresponding collection route and, on
//! success, replaces the local collection with the server's returned
//! array; on failure local state is left untouched and a failure toast
//! is raised. Transport and auth errors surface as toasts, not Errs,
//! mirroring how the dashboard presents them.

use serde_json::{Map, Value};

use super::state::DashboardState;
use super::{AdminClient, ClientError};
use crate::service::Collection;

pub struct AdminController {
    client: AdminClient,
    pub state: DashboardState,
}

impl AdminController {
    pub fn new(client: AdminClient) -> Self {
        Self {
            client,
            state: DashboardState::new(),
        }
    }

    /// Mount-time gate: only token presence is checked locally; the
    /// server re-validates on every mutation.
    pub fn has_session(&self) -> bool {
        self.client.token().is_some()
    }

    pub async fn login(&mut self, password: &str) -> Result<(), ClientError> {
        self.client.login(password).await
    }

    pub fn logout(&mut self) {
        self.client.logout();
        self.state = DashboardState::new();
    }

    /// Fetch both collections in parallel and replace the caches.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let (projects, experience) = self.client.fetch_all().await?;
        self.state.set_collections(projects, experience);
        Ok(())
    }

    /// Submit the open create form against the active tab.
    pub async fn submit_create(&mut self, fields: Map<String, Value>) {
        let collection = self.state.active_tab;
        match self.client.create(collection, &fields).await {
            Ok(items) => self
                .state
                .apply_success(collection, items, format!("Added to {collection}")),
            Err(e) => self.state.apply_failure(e.to_string()),
        }
    }

    /// Submit the open edit form against the active tab.
    pub async fn submit_update(&mut self, id: i64, fields: Map<String, Value>) {
        let collection = self.state.active_tab;
        match self.client.update(collection, id, &fields).await {
            Ok(items) => self
                .state
                .apply_success(collection, items, format!("Updated {collection}")),
            Err(e) => self.state.apply_failure(e.to_string()),
        }
    }

    /// Carry out the deletion the confirm modal is holding, if any.
    pub async fn confirm_delete(&mut self) {
        let super::state::ModalState::ConfirmingDelete { collection, id } = self.state.modal else {
            return;
        };
        match self.client.delete(collection, id).await {
            Ok(items) => self
                .state
                .apply_success(collection, items, format!("Deleted from {collection}")),
            Err(e) => self.state.apply_failure(e.to_string()),
        }
    }
}
