//! Explicit, finite dashboard view state. Nothing here is persisted;
//! the whole structure is disposable and rebuilt from the server on
//! reload. The collection caches are never authoritative.

use serde_json::Value;

use crate::service::Collection;

#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Closed,
    Creating,
    /// Editing an existing item; carries a copy of the item being edited.
    Editing(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    ConfirmingDelete { collection: Collection, id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub active_tab: Collection,
    pub form: FormState,
    pub modal: ModalState,
    toast: Option<Toast>,
    projects: Vec<Value>,
    experience: Vec<Value>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            active_tab: Collection::Projects,
            form: FormState::Closed,
            modal: ModalState::Closed,
            toast: None,
            projects: Vec::new(),
            experience: Vec::new(),
        }
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection(&self, collection: Collection) -> &[Value] {
        match collection {
            Collection::Projects => &self.projects,
            Collection::Experience => &self.experience,
        }
    }

    /// Replace both caches with freshly fetched server state.
    pub fn set_collections(&mut self, projects: Vec<Value>, experience: Vec<Value>) {
        self.projects = projects;
        self.experience = experience;
    }

    /// Switching tabs resets the ephemeral form and modal state.
    pub fn select_tab(&mut self, tab: Collection) {
        self.active_tab = tab;
        self.form = FormState::Closed;
        self.modal = ModalState::Closed;
    }

    pub fn open_create_form(&mut self) {
        self.form = FormState::Creating;
    }

    pub fn open_edit_form(&mut self, item: Value) {
        self.form = FormState::Editing(item);
    }

    pub fn close_form(&mut self) {
        self.form = FormState::Closed;
    }

    pub fn request_delete(&mut self, collection: Collection, id: i64) {
        self.modal = ModalState::ConfirmingDelete { collection, id };
    }

    pub fn cancel_delete(&mut self) {
        self.modal = ModalState::Closed;
    }

    /// Reconcile a successful mutation: the server's returned array
    /// replaces the local collection wholesale (no optimistic merge),
    /// open form and modal close, and a success toast is raised.
    pub fn apply_success(
        &mut self,
        collection: Collection,
        items: Vec<Value>,
        message: impl Into<String>,
    ) {
        match collection {
            Collection::Projects => self.projects = items,
            Collection::Experience => self.experience = items,
        }
        self.form = FormState::Closed;
        self.modal = ModalState::Closed;
        self.toast = Some(Toast {
            kind: ToastKind::Success,
            message: message.into(),
        });
    }

    /// Reconcile a failed mutation: caches stay exactly as they were,
    /// only a failure toast is raised.
    pub fn apply_failure(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            kind: ToastKind::Error,
            message: message.into(),
        });
    }

    /// Toasts are transient: reading one consumes it.
    pub fn take_toast(&mut self) -> Option<Toast> {
        self.toast.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_replaces_the_whole_collection() {
        let mut state = DashboardState::new();
        state.set_collections(vec![json!({"id": 1})], vec![]);

        state.apply_success(
            Collection::Projects,
            vec![json!({"id": 1}), json!({"id": 2})],
            "Project added",
        );

        assert_eq!(state.collection(Collection::Projects).len(), 2);
        let toast = state.take_toast().unwrap();
        assert_eq!(toast.kind, ToastKind::Success);
    }

    #[test]
    fn failure_leaves_collections_untouched() {
        let mut state = DashboardState::new();
        let before = vec![json!({"id": 1, "title": "A"})];
        state.set_collections(before.clone(), vec![]);

        state.apply_failure("Failed to save");

        assert_eq!(state.collection(Collection::Projects), before.as_slice());
        assert_eq!(state.take_toast().unwrap().kind, ToastKind::Error);
    }

    #[test]
    fn success_closes_form_and_modal() {
        let mut state = DashboardState::new();
        state.open_create_form();
        state.request_delete(Collection::Projects, 1);

        state.apply_success(Collection::Projects, vec![], "done");

        assert_eq!(state.form, FormState::Closed);
        assert_eq!(state.modal, ModalState::Closed);
    }

    #[test]
    fn tab_switch_resets_form_and_modal() {
        let mut state = DashboardState::new();
        state.open_edit_form(json!({"id": 3}));
        state.request_delete(Collection::Projects, 3);

        state.select_tab(Collection::Experience);

        assert_eq!(state.active_tab, Collection::Experience);
        assert_eq!(state.form, FormState::Closed);
        assert_eq!(state.modal, ModalState::Closed);
    }

    #[test]
    fn toast_is_consumed_on_read() {
        let mut state = DashboardState::new();
        state.apply_failure("oops");

        assert!(state.take_toast().is_some());
        assert!(state.take_toast().is_none());
    }
}
