pub mod admin;
pub mod public;

use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::mailer::Mailer;
use crate::service::SectionService;
use crate::store::SectionStore;

#[derive(Clone)]
pub struct AppState {
    pub store: SectionStore,
    pub service: SectionService,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub fn new(store: SectionStore, mailer: Arc<dyn Mailer>) -> Self {
        let service = SectionService::new(store.clone());
        Self {
            store,
            service,
            mailer,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/api/portfolio", get(public::portfolio))
        .route("/api/contact", post(public::contact))
        // Admin
        .merge(admin_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/login", post(admin::login))
        // Collection reads are public; mutations check the session
        // token inside the handler extractor before touching the store
        .route(
            "/api/admin/projects",
            get(admin::projects_list).post(admin::projects_create),
        )
        .route(
            "/api/admin/projects/:id",
            put(admin::projects_update).delete(admin::projects_delete),
        )
        .route(
            "/api/admin/experience",
            get(admin::experience_list).post(admin::experience_create),
        )
        .route(
            "/api/admin/experience/:id",
            put(admin::experience_update).delete(admin::experience_delete),
        )
}
