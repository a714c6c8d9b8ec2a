//! `/api/projects` route handlers.
//!
//! # Responsibility
//! - Decode requests, call the injected store on the blocking pool and
//!   encode the uniform response envelope.
//!
//! # Invariants
//! - Handlers never return a transport-level failure: store errors,
//!   malformed bodies and worker panics all become `success: false`.
//! - `POST` answers 201 and `GET` answers 200 regardless of outcome.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use log::{error, info, warn};
use sitegen_core::{
    ApiResponse, CreateProjectRequest, Project, ProjectServiceError, ProjectStore, ServiceResult,
};
use std::sync::Arc;
use std::time::Instant;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProjectStore>,
}

/// Builds the project routes over `store`.
pub fn router(store: Arc<dyn ProjectStore>) -> Router {
    Router::new()
        .route("/api/projects", get(list_projects).post(create_project))
        .route("/api/projects/:id", get(get_project))
        .with_state(AppState { store })
}

async fn create_project(
    State(state): State<AppState>,
    payload: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse<Project>>) {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!(
                "event=project_create module=api status=rejected error={}",
                rejection.body_text()
            );
            return (
                StatusCode::CREATED,
                Json(ApiResponse::failure(rejection.body_text())),
            );
        }
    };

    let response = call_store(&state, "project_create", move |store| {
        store.create(&body.website_idea)
    })
    .await;
    (StatusCode::CREATED, Json(response))
}

async fn list_projects(State(state): State<AppState>) -> Json<ApiResponse<Vec<Project>>> {
    Json(call_store(&state, "project_list", |store| store.list_all()).await)
}

async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<ApiResponse<Project>> {
    Json(call_store(&state, "project_get", move |store| store.get_by_id(&id)).await)
}

async fn call_store<T, F>(state: &AppState, event: &'static str, op: F) -> ApiResponse<T>
where
    T: Send + 'static,
    F: FnOnce(&dyn ProjectStore) -> ServiceResult<T> + Send + 'static,
{
    let started_at = Instant::now();
    let store = Arc::clone(&state.store);
    let outcome = tokio::task::spawn_blocking(move || op(store.as_ref())).await;
    let duration_ms = started_at.elapsed().as_millis();

    match outcome {
        Ok(Ok(data)) => {
            info!("event={event} module=api status=ok duration_ms={duration_ms}");
            ApiResponse::success(data)
        }
        Ok(Err(err)) => {
            log_store_error(event, duration_ms, &err);
            ApiResponse::failure(err.to_string())
        }
        Err(join_err) => {
            error!(
                "event={event} module=api status=error duration_ms={duration_ms} error_code=worker_failed error={join_err}"
            );
            ApiResponse::failure("An unknown error occurred")
        }
    }
}

fn log_store_error(event: &str, duration_ms: u128, err: &ProjectServiceError) {
    match err {
        ProjectServiceError::Validation(_) | ProjectServiceError::NotFound(_) => warn!(
            "event={event} module=api status=rejected duration_ms={duration_ms} error={err}"
        ),
        ProjectServiceError::Storage(_) => error!(
            "event={event} module=api status=error duration_ms={duration_ms} error_code=storage_failed error={err}"
        ),
    }
}
