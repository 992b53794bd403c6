//! Folder repository implementation.

use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, Pool, Postgres, Row, Transaction};
use tracing::debug;
use uuid::Uuid;

use noteful_core::logging::{
    COMPONENT, DB_TABLE, DURATION_MS, FOLDER_ID, OPERATION, RESULT_COUNT, ROWS_AFFECTED,
    SEARCH_TERM, SUBSYSTEM,
};
use noteful_core::{
    new_v7, Error, Folder, FolderDeletion, FolderRepository, ListFoldersRequest, Result,
};

use crate::escape_like;

/// Message surfaced when a folder name collides with an existing one.
pub const DUPLICATE_FOLDER_NAME: &str = "The folder name already exists";

/// PostgreSQL implementation of FolderRepository.
pub struct PgFolderRepository {
    pool: Pool<Postgres>,
}

impl PgFolderRepository {
    /// Create a new PgFolderRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn map_row_to_folder(r: PgRow) -> Folder {
    Folder {
        id: r.get("id"),
        name: r.get("name"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

/// Translate a write failure, turning a unique violation on `name` into a conflict.
fn map_write_error(err: sqlx::Error) -> Error {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            Error::Conflict(DUPLICATE_FOLDER_NAME.to_string())
        }
        _ => Error::Database(err),
    }
}

#[async_trait]
impl FolderRepository for PgFolderRepository {
    async fn create(&self, name: &str) -> Result<Folder> {
        let id = new_v7();
        let now = Utc::now();

        let row = sqlx::query(
            "INSERT INTO folder (id, name, created_at, updated_at)
             VALUES ($1, $2, $3, $3)
             RETURNING id, name, created_at, updated_at",
        )
        .bind(id)
        .bind(name)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        debug!(
            { SUBSYSTEM } = "database",
            { COMPONENT } = "folders",
            { OPERATION } = "create",
            { FOLDER_ID } = %id,
            "Folder created"
        );
        Ok(map_row_to_folder(row))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Folder>> {
        let row = sqlx::query(
            "SELECT id, name, created_at, updated_at
             FROM folder
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(map_row_to_folder))
    }

    async fn list(&self, req: ListFoldersRequest) -> Result<Vec<Folder>> {
        let term = req.search_term.as_deref().filter(|t| !t.is_empty());
        // No stored name can contain NUL, and PostgreSQL rejects it as a parameter.
        if term.is_some_and(|t| t.contains('\0')) {
            return Ok(Vec::new());
        }

        let rows = match term {
            Some(term) => sqlx::query(
                r#"
                SELECT id, name, created_at, updated_at
                FROM folder
                WHERE name LIKE '%' || $1 || '%' ESCAPE '\'
                ORDER BY name ASC
                "#,
            )
            .bind(escape_like(term))
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?,
            None => sqlx::query(
                r#"
                SELECT id, name, created_at, updated_at
                FROM folder
                ORDER BY name ASC
                "#,
            )
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?,
        };

        debug!(
            { SUBSYSTEM } = "database",
            { COMPONENT } = "folders",
            { OPERATION } = "list",
            { SEARCH_TERM } = term.unwrap_or(""),
            { RESULT_COUNT } = rows.len(),
            "Folders listed"
        );
        Ok(rows.into_iter().map(map_row_to_folder).collect())
    }

    async fn update(&self, id: Uuid, name: &str) -> Result<Folder> {
        let row = sqlx::query(
            "UPDATE folder SET name = $1, updated_at = $2
             WHERE id = $3
             RETURNING id, name, created_at, updated_at",
        )
        .bind(name)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        row.map(map_row_to_folder)
            .ok_or(Error::FolderNotFound(id))
    }

    async fn delete(&self, id: Uuid) -> Result<FolderDeletion> {
        let start = Instant::now();
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let result = self.delete_tx(&mut tx, id).await?;
        tx.commit().await.map_err(Error::Database)?;

        debug!(
            { SUBSYSTEM } = "database",
            { COMPONENT } = "folders",
            { OPERATION } = "cascade_delete",
            { DB_TABLE } = "folder",
            { FOLDER_ID } = %id,
            folder_removed = result.folder_removed,
            { ROWS_AFFECTED } = result.notes_cleared,
            { DURATION_MS } = start.elapsed().as_millis() as u64,
            "Folder deleted"
        );
        Ok(result)
    }
}

/// Transaction-aware variants, so callers can compose the cascade with other writes.
impl PgFolderRepository {
    /// Clear `folder_id` on every note referencing the folder.
    ///
    /// Idempotent: a second run finds nothing to clear.
    pub async fn clear_note_references_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        folder_id: Uuid,
    ) -> Result<u64> {
        let result =
            sqlx::query("UPDATE note SET folder_id = NULL, updated_at = $2 WHERE folder_id = $1")
                .bind(folder_id)
                .bind(Utc::now())
                .execute(&mut **tx)
                .await
                .map_err(Error::Database)?;
        Ok(result.rows_affected())
    }

    /// Delete a folder within an existing transaction, clearing note references first.
    pub async fn delete_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<FolderDeletion> {
        let notes_cleared = self.clear_note_references_tx(tx, id).await?;

        let deleted = sqlx::query("DELETE FROM folder WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await
            .map_err(Error::Database)?;

        Ok(FolderDeletion {
            folder_removed: deleted.rows_affected() > 0,
            notes_cleared,
        })
    }

    /// Create a folder with a caller-chosen id within an existing transaction.
    pub async fn insert_with_id_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        name: &str,
    ) -> Result<Folder> {
        let now = Utc::now();
        let row = sqlx::query(
            "INSERT INTO folder (id, name, created_at, updated_at)
             VALUES ($1, $2, $3, $3)
             RETURNING id, name, created_at, updated_at",
        )
        .bind(id)
        .bind(name)
        .bind(now)
        .fetch_one(&mut **tx)
        .await
        .map_err(map_write_error)?;
        Ok(map_row_to_folder(row))
    }
}
