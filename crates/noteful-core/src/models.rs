//! Entity models for noteful.
//!
//! Both entities serialize with camelCase keys; timestamps are RFC 3339.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// FOLDER
// =============================================================================

/// A named folder that notes may reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: Uuid,
    /// Unique across all folders.
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// NOTE
// =============================================================================

/// A note, optionally filed in a folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: Option<String>,
    /// Weak reference to a folder. Not guaranteed to resolve.
    pub folder_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Whether the note is filed under the given folder.
    pub fn is_in_folder(&self, folder_id: Uuid) -> bool {
        self.folder_id == Some(folder_id)
    }
}

/// Outcome of deleting a folder and clearing its note references.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderDeletion {
    /// Whether a folder row was removed.
    pub folder_removed: bool,
    /// Number of notes whose `folder_id` was cleared.
    pub notes_cleared: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_folder() -> Folder {
        Folder {
            id: Uuid::nil(),
            name: "Archive".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_folder_serializes_exact_keys() {
        let json = serde_json::to_value(sample_folder()).unwrap();
        let mut keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort();
        assert_eq!(keys, vec!["createdAt", "id", "name", "updatedAt"]);
    }

    #[test]
    fn test_note_serializes_null_folder_id() {
        let note = Note {
            id: Uuid::nil(),
            title: "Groceries".to_string(),
            content: None,
            folder_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["title"], "Groceries");
        assert!(json["folderId"].is_null());
        assert!(json["content"].is_null());
        assert!(json.get("folder_id").is_none());
    }

    #[test]
    fn test_note_is_in_folder() {
        let folder_id = Uuid::new_v4();
        let note = Note {
            id: Uuid::new_v4(),
            title: "t".to_string(),
            content: Some("c".to_string()),
            folder_id: Some(folder_id),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(note.is_in_folder(folder_id));
        assert!(!note.is_in_folder(Uuid::new_v4()));
    }

    #[test]
    fn test_folder_deserializes_camel_case() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000000",
            "name": "Work",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-02T00:00:00Z"
        }"#;
        let folder: Folder = serde_json::from_str(json).unwrap();
        assert_eq!(folder.name, "Work");
        assert!(folder.updated_at > folder.created_at);
    }
}
