//! Request handlers.

use std::path::PathBuf;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use filecommander_core::{FileEntry, FsError};

use crate::error::ApiError;
use crate::AppState;

/// Query of `GET /entries`. A missing `path` counts as empty.
#[derive(Debug, Deserialize)]
pub(crate) struct EntriesQuery {
    #[serde(default)]
    path: String,
}

/// Body of `POST /copy` and `POST /move`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileOperationRequest {
    #[serde(default)]
    source_paths: Option<Vec<String>>,
    #[serde(default)]
    destination_directory: String,
}

pub(crate) async fn drives(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.executor.drives().await?))
}

pub(crate) async fn entries(
    State(state): State<AppState>,
    Query(query): Query<EntriesQuery>,
) -> Result<Json<Vec<FileEntry>>, ApiError> {
    let entries = state.executor.list(PathBuf::from(query.path)).await?;
    Ok(Json(entries))
}

pub(crate) async fn copy(
    State(state): State<AppState>,
    Json(request): Json<FileOperationRequest>,
) -> Result<StatusCode, ApiError> {
    let (cancel, _guard) = request_token();
    let sources = source_list(request.source_paths)?;

    state
        .executor
        .copy(sources, request.destination_directory.into(), cancel)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn move_items(
    State(state): State<AppState>,
    Json(request): Json<FileOperationRequest>,
) -> Result<StatusCode, ApiError> {
    let (cancel, _guard) = request_token();
    let sources = source_list(request.source_paths)?;

    state
        .executor
        .move_to(sources, request.destination_directory.into(), cancel)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn delete(
    State(state): State<AppState>,
    Json(paths): Json<Option<Vec<String>>>,
) -> Result<StatusCode, ApiError> {
    let (cancel, _guard) = request_token();
    let targets = source_list(paths)?;

    state.executor.delete(targets, cancel).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// A token cancelled when the handler future is dropped, which happens when
/// the client disconnects.
fn request_token() -> (CancellationToken, tokio_util::sync::DropGuard) {
    let token = CancellationToken::new();
    let guard = token.clone().drop_guard();
    (token, guard)
}

fn source_list(paths: Option<Vec<String>>) -> Result<Vec<PathBuf>, FsError> {
    paths
        .map(|paths| paths.into_iter().map(PathBuf::from).collect())
        .ok_or_else(|| FsError::invalid("Source paths are required"))
}
