use super::extract::StudentBody;
use super::types::*;
use crate::error::{RecordError, RecordResult};
use crate::search::matcher::NameFilter;
use crate::search::scanner::{find_duplicate, search};
use crate::server::AppState;
use crate::storage::types::{RecordId, StudentRecord};

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use std::sync::Arc;

/// How many fresh ids a create tries before giving up on a taken one.
const MAX_ID_ATTEMPTS: usize = 8;

pub async fn handle_create_student(
    Extension(state): Extension<Arc<AppState>>,
    StudentBody(payload): StudentBody,
) -> Response {
    let _guard = state.write_lock.lock().await;

    match find_duplicate(&state.store, payload.first_name.as_str(), payload.last_name.as_str())
        .await
    {
        Ok(Some(existing)) => {
            tracing::warn!("Create refused, record {} has the same name", existing.record_id);
            let err = RecordError::Duplicate {
                first_name: existing.first_name,
                last_name: existing.last_name,
            };
            return (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(MessageResponse::new(format!("error - {}", err))),
            )
                .into_response();
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Duplicate scan failed: {}", e);
            return internal_error();
        }
    }

    match create_with_fresh_id(&state, &payload).await {
        Ok(record) => {
            tracing::info!("Created record {}", record.record_id);
            (
                StatusCode::CREATED,
                Json(RecordResponse::new(RecordKey::Id(record.record_id), MSG_CREATED)),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create record: {}", e);
            (
                state.write_failure_status(),
                Json(RecordResponse::new(RecordKey::Unassigned, MSG_CREATE_FAILED)),
            )
                .into_response()
        }
    }
}

async fn create_with_fresh_id(
    state: &AppState,
    payload: &StudentPayload,
) -> RecordResult<StudentRecord> {
    let mut attempt = 1;
    loop {
        let record = payload.to_record(state.ids.next_id());
        match state.store.create(&record).await {
            Ok(()) => return Ok(record),
            Err(RecordError::AlreadyExists(id)) if attempt < MAX_ID_ATTEMPTS => {
                tracing::warn!("Record id {} already taken, retrying", id);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

pub async fn handle_get_student(
    Extension(state): Extension<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Response {
    let Ok(id) = raw_id.parse::<RecordId>() else {
        return not_found(RecordKey::Raw(raw_id));
    };

    match state.store.read(id).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) if e.is_internal() => {
            tracing::error!("Failed to read record {}: {}", id, e);
            internal_error()
        }
        Err(_) => not_found(RecordKey::Id(id)),
    }
}

pub async fn handle_list_students(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let filter = NameFilter::new(params.first_name.as_deref(), params.last_name.as_deref());

    match search(&state.store, &filter).await {
        Ok(students) => {
            tracing::debug!(
                "Listed {} students (filtered: {})",
                students.len(),
                !filter.is_empty()
            );
            (StatusCode::OK, Json(StudentsResponse { students })).into_response()
        }
        Err(e) => {
            tracing::error!("Student search failed: {}", e);
            internal_error()
        }
    }
}

/// Replaces every field of an existing record. Names are not checked for
/// duplicates here.
pub async fn handle_update_student(
    Extension(state): Extension<Arc<AppState>>,
    Path(raw_id): Path<String>,
    StudentBody(payload): StudentBody,
) -> Response {
    let Ok(id) = raw_id.parse::<RecordId>() else {
        return not_found(RecordKey::Raw(raw_id));
    };

    let _guard = state.write_lock.lock().await;

    if !state.store.exists(id).await {
        return not_found(RecordKey::Id(id));
    }

    match state.store.write(&payload.to_record(id)).await {
        Ok(()) => {
            tracing::info!("Updated record {}", id);
            (
                StatusCode::CREATED,
                Json(RecordResponse::new(RecordKey::Id(id), MSG_UPDATED)),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to update record {}: {}", id, e);
            (
                state.write_failure_status(),
                Json(RecordResponse::new(RecordKey::Id(id), MSG_UPDATE_FAILED)),
            )
                .into_response()
        }
    }
}

pub async fn handle_delete_student(
    Extension(state): Extension<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Response {
    let Ok(id) = raw_id.parse::<RecordId>() else {
        return not_found(RecordKey::Raw(raw_id));
    };

    let _guard = state.write_lock.lock().await;

    match state.store.delete(id).await {
        Ok(()) => {
            tracing::info!("Deleted record {}", id);
            (
                StatusCode::OK,
                Json(RecordResponse::new(RecordKey::Id(id), MSG_DELETED)),
            )
                .into_response()
        }
        Err(e) if e.is_internal() => {
            tracing::error!("Failed to delete record {}: {}", id, e);
            internal_error()
        }
        Err(_) => not_found(RecordKey::Id(id)),
    }
}

fn not_found(record_id: RecordKey) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(RecordResponse::new(record_id, MSG_NOT_FOUND)),
    )
        .into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(MessageResponse::new(MSG_INTERNAL)),
    )
        .into_response()
}
