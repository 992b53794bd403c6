//! Note repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, Pool, Postgres, Row, Transaction};
use tracing::debug;
use uuid::Uuid;

use noteful_core::logging::{COMPONENT, NOTE_ID, OPERATION, RESULT_COUNT, SEARCH_TERM, SUBSYSTEM};
use noteful_core::{
    new_v7, CreateNoteRequest, Error, ListNotesRequest, Note, NoteRepository, Result,
    UpdateNoteRequest,
};

use crate::escape_like;

const NOTE_COLUMNS: &str = "id, title, content, folder_id, created_at, updated_at";

/// PostgreSQL implementation of NoteRepository.
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

// =============================================================================
// HELPER FUNCTIONS FOR LIST QUERY BUILDING
// =============================================================================

/// Build the WHERE clause for a list request.
///
/// Placeholders are numbered in the order the values are bound by
/// `list`: search term first, then folder id.
fn build_where_clause(has_search_term: bool, has_folder_id: bool) -> String {
    let mut conditions: Vec<String> = Vec::new();
    let mut param_idx = 1;

    if has_search_term {
        conditions.push(format!(
            "(title ILIKE '%' || ${0} || '%' ESCAPE '\\' OR content ILIKE '%' || ${0} || '%' ESCAPE '\\')",
            param_idx
        ));
        param_idx += 1;
    }
    if has_folder_id {
        conditions.push(format!("folder_id = ${}", param_idx));
    }

    if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    }
}

/// Map a database row to a Note.
fn map_row_to_note(row: PgRow) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        folder_id: row.get("folder_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn insert(&self, req: CreateNoteRequest) -> Result<Note> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let note = self.insert_with_id_tx(&mut tx, new_v7(), req).await?;
        tx.commit().await.map_err(Error::Database)?;

        debug!(
            { SUBSYSTEM } = "database",
            { COMPONENT } = "notes",
            { OPERATION } = "insert",
            { NOTE_ID } = %note.id,
            "Note created"
        );
        Ok(note)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Note>> {
        let row = sqlx::query(&format!("SELECT {} FROM note WHERE id = $1", NOTE_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row.map(map_row_to_note))
    }

    async fn list(&self, req: ListNotesRequest) -> Result<Vec<Note>> {
        let raw_term = req.search_term.as_deref().filter(|t| !t.is_empty());
        // No stored title or content can contain NUL, and PostgreSQL rejects it as a parameter.
        if raw_term.is_some_and(|t| t.contains('\0')) {
            return Ok(Vec::new());
        }
        let search_term = raw_term.map(escape_like);

        let query = format!(
            "SELECT {} FROM note {} ORDER BY updated_at DESC, id DESC",
            NOTE_COLUMNS,
            build_where_clause(search_term.is_some(), req.folder_id.is_some())
        );

        let mut q = sqlx::query(&query);
        if let Some(term) = &search_term {
            q = q.bind(term);
        }
        if let Some(folder_id) = req.folder_id {
            q = q.bind(folder_id);
        }

        let rows = q.fetch_all(&self.pool).await.map_err(Error::Database)?;

        debug!(
            { SUBSYSTEM } = "database",
            { COMPONENT } = "notes",
            { OPERATION } = "list",
            { SEARCH_TERM } = raw_term.unwrap_or(""),
            { RESULT_COUNT } = rows.len(),
            "Notes listed"
        );
        Ok(rows.into_iter().map(map_row_to_note).collect())
    }

    async fn update(&self, id: Uuid, req: UpdateNoteRequest) -> Result<Note> {
        let row = sqlx::query(&format!(
            "UPDATE note SET title = $1, content = $2, folder_id = $3, updated_at = $4
             WHERE id = $5
             RETURNING {}",
            NOTE_COLUMNS
        ))
        .bind(&req.title)
        .bind(&req.content)
        .bind(req.folder_id)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.map(map_row_to_note).ok_or(Error::NoteNotFound(id))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM note WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        let removed = result.rows_affected() > 0;
        debug!(
            { SUBSYSTEM } = "database",
            { COMPONENT } = "notes",
            { OPERATION } = "delete",
            { NOTE_ID } = %id,
            removed,
            "Note delete attempted"
        );
        Ok(removed)
    }
}

/// Transaction-aware variants.
impl PgNoteRepository {
    /// Insert a note with a caller-chosen id within an existing transaction.
    pub async fn insert_with_id_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        req: CreateNoteRequest,
    ) -> Result<Note> {
        let now = Utc::now();
        let row = sqlx::query(&format!(
            "INSERT INTO note (id, title, content, folder_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING {}",
            NOTE_COLUMNS
        ))
        .bind(id)
        .bind(&req.title)
        .bind(&req.content)
        .bind(req.folder_id)
        .bind(now)
        .fetch_one(&mut **tx)
        .await
        .map_err(Error::Database)?;

        Ok(map_row_to_note(row))
    }

    /// Count notes referencing a folder.
    pub async fn count_in_folder(&self, folder_id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM note WHERE folder_id = $1")
            .bind(folder_id)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(count)
    }
}
