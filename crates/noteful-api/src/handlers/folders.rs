//! Folder HTTP handlers.
//!
//! Folders have a unique name. Deleting a folder keeps its notes and clears
//! their `folderId`.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::debug;

use super::JsonObject;
use crate::{ApiError, AppState};
use noteful_core::logging::{FOLDER_ID, OPERATION, ROWS_AFFECTED, SUBSYSTEM};
use noteful_core::{parse_id, require_non_empty, Folder, FolderRepository, ListFoldersRequest};

/// Query parameters for listing folders.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListFoldersQuery {
    /// Case-sensitive substring of the folder name
    pub search_term: Option<String>,
}

/// Request body for creating or renaming a folder.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct FolderBody {
    pub name: Option<String>,
}

impl TryFrom<JsonObject> for FolderBody {
    type Error = ApiError;

    fn try_from(body: JsonObject) -> Result<Self, Self::Error> {
        Ok(FolderBody {
            name: body.string("name")?,
        })
    }
}

impl FolderBody {
    fn validated_name(self) -> Result<String, ApiError> {
        Ok(require_non_empty("name", self.name.as_deref())?)
    }
}

/// List folders, optionally filtered by name, sorted by name.
#[utoipa::path(
    get,
    path = "/folders",
    tag = "Folders",
    params(ListFoldersQuery),
    responses((status = 200, description = "Matching folders", body = [Folder]))
)]
pub async fn list_folders(
    State(state): State<AppState>,
    query: Result<Query<ListFoldersQuery>, QueryRejection>,
) -> Result<Json<Vec<Folder>>, ApiError> {
    let Query(query) = query?;
    let folders = state
        .db
        .folders
        .list(ListFoldersRequest {
            search_term: query.search_term,
        })
        .await?;
    Ok(Json(folders))
}

/// Get a single folder.
///
/// # Returns
/// - 200 OK with the folder
/// - 404 Not Found if the id is malformed or no folder has it
#[utoipa::path(
    get,
    path = "/folders/{id}",
    tag = "Folders",
    params(("id" = String, Path, description = "Folder id")),
    responses(
        (status = 200, description = "The folder", body = Folder),
        (status = 404, description = "No such folder", body = crate::error::ErrorBody)
    )
)]
pub async fn get_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Folder>, ApiError> {
    let id = parse_id(&id).ok_or_else(ApiError::not_found)?;
    let folder = state
        .db
        .folders
        .get(id)
        .await?
        .ok_or_else(ApiError::not_found)?;
    Ok(Json(folder))
}

/// Create a folder.
///
/// # Returns
/// - 201 Created with the folder and a `Location` header
/// - 400 Bad Request if the name is missing or already taken
#[utoipa::path(
    post,
    path = "/folders",
    tag = "Folders",
    request_body = FolderBody,
    responses(
        (status = 201, description = "Folder created", body = Folder),
        (status = 400, description = "Missing or duplicate name", body = crate::error::ErrorBody)
    )
)]
pub async fn create_folder(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: JsonObject,
) -> Result<impl IntoResponse, ApiError> {
    let name = FolderBody::try_from(body)?.validated_name()?;

    let folder = state.db.folders.create(&name).await?;
    let location = super::location(&headers, &format!("/folders/{}", folder.id));

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(folder),
    ))
}

/// Rename a folder.
///
/// The body is validated before the id, so a missing name is reported even
/// when the id is also wrong.
#[utoipa::path(
    put,
    path = "/folders/{id}",
    tag = "Folders",
    params(("id" = String, Path, description = "Folder id")),
    request_body = FolderBody,
    responses(
        (status = 200, description = "Folder after the rename", body = Folder),
        (status = 400, description = "Missing or duplicate name", body = crate::error::ErrorBody),
        (status = 404, description = "No such folder", body = crate::error::ErrorBody)
    )
)]
pub async fn update_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: JsonObject,
) -> Result<Json<Folder>, ApiError> {
    let name = FolderBody::try_from(body)?.validated_name()?;
    let id = parse_id(&id).ok_or_else(ApiError::not_found)?;

    let folder = state.db.folders.update(id, &name).await?;
    Ok(Json(folder))
}

/// Delete a folder and clear it from every note that referenced it.
///
/// Succeeds whether or not the folder existed.
#[utoipa::path(
    delete,
    path = "/folders/{id}",
    tag = "Folders",
    params(("id" = String, Path, description = "Folder id")),
    responses(
        (status = 204, description = "Folder gone"),
        (status = 400, description = "Malformed id", body = crate::error::ErrorBody)
    )
)]
pub async fn delete_folder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)
        .ok_or_else(|| ApiError::BadRequest("The `id` is not valid".to_string()))?;

    let deletion = state.db.folders.delete(id).await?;
    debug!(
        { SUBSYSTEM } = "api",
        { OPERATION } = "delete_folder",
        { FOLDER_ID } = %id,
        { ROWS_AFFECTED } = deletion.notes_cleared,
        folder_removed = deletion.folder_removed,
        "Folder deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}
