//! Note HTTP handlers.
//!
//! A note's `folderId` is a weak reference: it must parse as an id, but the
//! folder does not have to exist.

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
use noteful_core::logging::{NOTE_ID, OPERATION, SUBSYSTEM};
use noteful_core::{
    parse_id, reject_nul, require_non_empty, validate_reference_id, CreateNoteRequest, ListNotesRequest, Note,
    NoteRepository, UpdateNoteRequest,
};

/// Query parameters for listing notes.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListNotesQuery {
    /// Case-insensitive substring of the title or content
    pub search_term: Option<String>,
    /// Only notes in this folder
    pub folder_id: Option<String>,
}

/// Request body for creating or replacing a note.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteBody {
    pub title: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<String>,
}

/// Validated note fields, ready for the repository.
struct NoteFields {
    title: String,
    content: Option<String>,
    folder_id: Option<uuid::Uuid>,
}

impl TryFrom<JsonObject> for NoteBody {
    type Error = ApiError;

    fn try_from(body: JsonObject) -> Result<Self, Self::Error> {
        Ok(NoteBody {
            title: body.string("title")?,
            content: body.string("content")?,
            folder_id: body.string("folderId")?,
        })
    }
}

impl NoteBody {
    fn validate(self) -> Result<NoteFields, ApiError> {
        let title = require_non_empty("title", self.title.as_deref())?;
        reject_nul("content", self.content.as_deref())?;
        let folder_id = validate_reference_id("folderId", self.folder_id.as_deref())?;
        Ok(NoteFields {
            title,
            content: self.content,
            folder_id,
        })
    }
}

/// List notes, newest update first.
///
/// Filters combine: a note must match the search term AND be in the folder.
/// A `folderId` that is not a valid id matches nothing.
#[utoipa::path(
    get,
    path = "/notes",
    tag = "Notes",
    params(ListNotesQuery),
    responses((status = 200, description = "Matching notes", body = [Note]))
)]
pub async fn list_notes(
    State(state): State<AppState>,
    query: Result<Query<ListNotesQuery>, QueryRejection>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let Query(query) = query?;
    let folder_id = match query.folder_id.as_deref() {
        None | Some("") => None,
        Some(raw) => match parse_id(raw) {
            Some(id) => Some(id),
            None => return Ok(Json(Vec::new())),
        },
    };

    let notes = state
        .db
        .notes
        .list(ListNotesRequest {
            search_term: query.search_term,
            folder_id,
        })
        .await?;
    Ok(Json(notes))
}

/// Get a single note.
#[utoipa::path(
    get,
    path = "/notes/{id}",
    tag = "Notes",
    params(("id" = String, Path, description = "Note id")),
    responses(
        (status = 200, description = "The note", body = Note),
        (status = 404, description = "No such note", body = crate::error::ErrorBody)
    )
)]
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Note>, ApiError> {
    let id = parse_id(&id).ok_or_else(ApiError::not_found)?;
    let note = state
        .db
        .notes
        .fetch(id)
        .await?
        .ok_or_else(ApiError::not_found)?;
    Ok(Json(note))
}

/// Create a note.
///
/// # Returns
/// - 201 Created with the note and a `Location` header
/// - 400 Bad Request if the title is missing or `folderId` is malformed
#[utoipa::path(
    post,
    path = "/notes",
    tag = "Notes",
    request_body = NoteBody,
    responses(
        (status = 201, description = "Note created", body = Note),
        (status = 400, description = "Missing title or malformed folderId", body = crate::error::ErrorBody)
    )
)]
pub async fn create_note(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: JsonObject,
) -> Result<impl IntoResponse, ApiError> {
    let fields = NoteBody::try_from(body)?.validate()?;

    let note = state
        .db
        .notes
        .insert(CreateNoteRequest {
            title: fields.title,
            content: fields.content,
            folder_id: fields.folder_id,
        })
        .await?;
    let location = super::location(&headers, &format!("/notes/{}", note.id));

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(note)))
}

/// Replace a note's title, content and folder.
///
/// Omitted `content` or `folderId` are cleared.
#[utoipa::path(
    put,
    path = "/notes/{id}",
    tag = "Notes",
    params(("id" = String, Path, description = "Note id")),
    request_body = NoteBody,
    responses(
        (status = 200, description = "Note after the update", body = Note),
        (status = 400, description = "Missing title or malformed folderId", body = crate::error::ErrorBody),
        (status = 404, description = "No such note", body = crate::error::ErrorBody)
    )
)]
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: JsonObject,
) -> Result<Json<Note>, ApiError> {
    let fields = NoteBody::try_from(body)?.validate()?;
    let id = parse_id(&id).ok_or_else(ApiError::not_found)?;

    let note = state
        .db
        .notes
        .update(
            id,
            UpdateNoteRequest {
                title: fields.title,
                content: fields.content,
                folder_id: fields.folder_id,
            },
        )
        .await?;
    Ok(Json(note))
}

/// Delete a note. Deleting a note that does not exist is not an error.
#[utoipa::path(
    delete,
    path = "/notes/{id}",
    tag = "Notes",
    params(("id" = String, Path, description = "Note id")),
    responses((status = 204, description = "Note gone"))
)]
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if let Some(id) = parse_id(&id) {
        let removed = state.db.notes.delete(id).await?;
        debug!(
            { SUBSYSTEM } = "api",
            { OPERATION } = "delete_note",
            { NOTE_ID } = %id,
            removed,
            "Note delete handled"
        );
    }
    Ok(StatusCode::NO_CONTENT)
}
