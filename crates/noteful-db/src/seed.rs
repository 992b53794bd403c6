//! Seed data for development and end-to-end tests.
//!
//! The fixture set is embedded at compile time. Seeding wipes both tables and
//! reloads them in a single transaction, so a failed seed leaves the previous
//! contents intact.

use serde::Deserialize;
use sqlx::{Pool, Postgres};
use tracing::info;
use uuid::Uuid;

use noteful_core::logging::SUBSYSTEM;
use noteful_core::{CreateNoteRequest, Error, Result};

use crate::{PgFolderRepository, PgNoteRepository};

const FOLDERS_JSON: &str = include_str!("../seed/folders.json");
const NOTES_JSON: &str = include_str!("../seed/notes.json");

/// A folder as it appears in the seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedFolder {
    pub id: Uuid,
    pub name: String,
}

/// A note as it appears in the seed file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedNote {
    pub id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<Uuid>,
}

/// Parsed seed fixtures.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub folders: Vec<SeedFolder>,
    pub notes: Vec<SeedNote>,
}

/// Row counts written by [`seed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub folders: usize,
    pub notes: usize,
}

impl SeedData {
    /// Parse the embedded fixture files.
    pub fn embedded() -> Result<Self> {
        Ok(Self {
            folders: serde_json::from_str(FOLDERS_JSON)?,
            notes: serde_json::from_str(NOTES_JSON)?,
        })
    }

    /// Notes whose `folderId` points at the given seed folder.
    pub fn notes_in_folder(&self, folder_id: Uuid) -> usize {
        self.notes
            .iter()
            .filter(|n| n.folder_id == Some(folder_id))
            .count()
    }
}

/// Replace the contents of `folder` and `note` with the embedded fixtures.
pub async fn seed(pool: &Pool<Postgres>) -> Result<SeedSummary> {
    let data = SeedData::embedded()?;
    let folders = PgFolderRepository::new(pool.clone());
    let notes = PgNoteRepository::new(pool.clone());

    let mut tx = pool.begin().await.map_err(Error::Database)?;

    sqlx::query("DELETE FROM note")
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;
    sqlx::query("DELETE FROM folder")
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

    for folder in &data.folders {
        folders
            .insert_with_id_tx(&mut tx, folder.id, &folder.name)
            .await?;
    }
    for note in &data.notes {
        notes
            .insert_with_id_tx(
                &mut tx,
                note.id,
                CreateNoteRequest {
                    title: note.title.clone(),
                    content: note.content.clone(),
                    folder_id: note.folder_id,
                },
            )
            .await?;
    }

    tx.commit().await.map_err(Error::Database)?;

    let summary = SeedSummary {
        folders: data.folders.len(),
        notes: data.notes.len(),
    };
    info!(
        { SUBSYSTEM } = "seed",
        folders = summary.folders,
        notes = summary.notes,
        "Database seeded"
    );
    Ok(summary)
}
