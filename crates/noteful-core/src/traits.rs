//! Core traits for noteful abstractions.
//!
//! These traits define the interfaces that concrete store implementations
//! must satisfy, keeping the HTTP layer independent of the database.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// FOLDER REPOSITORY TRAITS
// =============================================================================

/// Request for listing folders.
#[derive(Debug, Clone, Default)]
pub struct ListFoldersRequest {
    /// Case-sensitive substring the folder name must contain.
    pub search_term: Option<String>,
}

/// Repository for folder operations.
#[async_trait]
pub trait FolderRepository: Send + Sync {
    /// Create a folder. Fails with `Error::Conflict` if the name is taken.
    async fn create(&self, name: &str) -> Result<Folder>;

    /// Get a folder by ID.
    async fn get(&self, id: Uuid) -> Result<Option<Folder>>;

    /// List folders ordered by name ascending.
    async fn list(&self, req: ListFoldersRequest) -> Result<Vec<Folder>>;

    /// Rename a folder and return the updated row.
    ///
    /// Fails with `Error::FolderNotFound` if no folder has this ID, and with
    /// `Error::Conflict` if another folder already uses the name.
    async fn update(&self, id: Uuid, name: &str) -> Result<Folder>;

    /// Delete a folder and clear `folder_id` on every note referencing it.
    ///
    /// Deleting a folder that does not exist is not an error.
    async fn delete(&self, id: Uuid) -> Result<FolderDeletion>;
}

// =============================================================================
// NOTE REPOSITORY TRAITS
// =============================================================================

/// Request for listing notes. Filters are combined conjunctively.
#[derive(Debug, Clone, Default)]
pub struct ListNotesRequest {
    /// Case-insensitive substring matched against title or content.
    pub search_term: Option<String>,
    /// Only notes filed under this folder.
    pub folder_id: Option<Uuid>,
}

/// Request for creating a new note.
#[derive(Debug, Clone)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<Uuid>,
}

/// Request for replacing the mutable fields of a note.
///
/// Absent `content` or `folder_id` clear the stored value.
#[derive(Debug, Clone)]
pub struct UpdateNoteRequest {
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<Uuid>,
}

/// Repository for note CRUD operations.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note and return the stored row.
    async fn insert(&self, req: CreateNoteRequest) -> Result<Note>;

    /// Fetch a note by ID.
    async fn fetch(&self, id: Uuid) -> Result<Option<Note>>;

    /// List notes ordered by last update, most recent first.
    async fn list(&self, req: ListNotesRequest) -> Result<Vec<Note>>;

    /// Replace the mutable fields and return the post-update row.
    ///
    /// Fails with `Error::NoteNotFound` if no note has this ID.
    async fn update(&self, id: Uuid, req: UpdateNoteRequest) -> Result<Note>;

    /// Delete a note. Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}
