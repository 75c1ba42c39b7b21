use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::models::{Document, NewDocument, PaginatedResponse};
use crate::state::AppState;
use crate::store;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/documents",
            post(upload_document).get(list_documents),
        )
        .route("/api/documents/{id}", get(get_document))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<&'static str, StatusCode> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)?;
    Ok("OK")
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub status: &'static str,
    pub id: i64,
}

/// Accept a multipart upload under the `file` field, extract it and store
/// the resulting record.
async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let mut file_bytes = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            file_bytes = Some(field.bytes().await?);
        }
    }

    let bytes = file_bytes
        .filter(|b| !b.is_empty())
        .ok_or(ApiError::NoFile)?;

    let extracted = formex_extractor::from_bytes(&bytes)?;
    let new = NewDocument::from_extracted(extracted)?;
    let document = store::create_document(&state.pool, new).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            status: "success",
            id: document.id,
        }),
    ))
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

async fn list_documents(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<PaginatedResponse<Document>>, ApiError> {
    let limit = params.limit.unwrap_or(50).clamp(1, 200);
    let offset = params.offset.unwrap_or(0).max(0);

    let total = store::count_documents(&state.pool).await?;
    let data = store::list_documents(&state.pool, limit, offset).await?;

    Ok(Json(PaginatedResponse {
        data,
        total,
        limit,
        offset,
    }))
}

async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Document>, ApiError> {
    let document = store::get_document(&state.pool, id).await?;
    Ok(Json(document))
}
