use crate::config::ServerConfig;
use crate::error::RecordResult;
use crate::storage::ids::RecordIdGenerator;
use crate::storage::store::RecordStore;
use crate::students::handlers::{
    handle_create_student, handle_delete_student, handle_get_student, handle_list_students,
    handle_update_student,
};

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler.
pub struct AppState {
    pub store: RecordStore,
    pub ids: RecordIdGenerator,
    /// Serializes create, update and delete so that a duplicate scan and the
    /// write that follows it cannot interleave with another mutation.
    pub write_lock: Mutex<()>,
    pub legacy_write_status: bool,
    pub public_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            ids: RecordIdGenerator::new(),
            write_lock: Mutex::new(()),
            legacy_write_status: false,
            public_dir: None,
        }
    }

    pub async fn from_config(config: &ServerConfig) -> RecordResult<Self> {
        let store = RecordStore::open(&config.data_dir).await?;
        Ok(Self {
            legacy_write_status: config.legacy_write_status,
            public_dir: config.public_dir.clone(),
            ..Self::new(store)
        })
    }

    pub fn with_legacy_write_status(mut self, enabled: bool) -> Self {
        self.legacy_write_status = enabled;
        self
    }

    pub fn with_public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = Some(dir.into());
        self
    }

    /// Status used when a record could not be written.
    pub fn write_failure_status(&self) -> StatusCode {
        if self.legacy_write_status {
            StatusCode::OK
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route(
            "/students",
            get(handle_list_students).post(handle_create_student),
        )
        .route(
            "/students/:record_id",
            get(handle_get_student)
                .put(handle_update_student)
                .delete(handle_delete_student),
        )
        .route("/health", get(handle_health));

    let router = match &state.public_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
