//! Folder repository tests: uniqueness, listing order, and the delete cascade.
//!
//! Deleting a folder clears `folder_id` on the notes that referenced it; the
//! notes themselves survive.

use noteful_core::{Error, FolderRepository, ListFoldersRequest, NoteRepository};
use noteful_db::test_fixtures::{unique_name, TestData, TestDataBuilder, TestDatabase};
use uuid::Uuid;

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_delete_folder_clears_exactly_its_notes() {
    let test_db = TestDatabase::new().await;
    let db = &test_db.db;

    let data = TestDataBuilder::new(db)
        .with_folder("doomed")
        .await
        .with_note_in_last_folder("first")
        .await
        .with_note_in_last_folder("second")
        .await
        .with_note_in_last_folder("third")
        .await
        .with_folder("survivor")
        .await
        .with_note_in_last_folder("bystander")
        .await
        .with_note("loose")
        .await
        .build();

    let doomed = data.folders[0];
    let survivor = data.folders[1];

    let result = db.folders.delete(doomed).await.expect("delete failed");
    assert!(result.folder_removed);
    assert_eq!(result.notes_cleared, 3);

    assert!(db.folders.get(doomed).await.unwrap().is_none());
    assert_eq!(db.notes.count_in_folder(doomed).await.unwrap(), 0);

    // The three notes still exist, now unfiled
    for id in &data.notes[..3] {
        let note = db.notes.fetch(*id).await.unwrap().expect("note deleted");
        assert!(note.folder_id.is_none());
        assert!(note.updated_at >= note.created_at);
    }

    // Other references untouched
    let bystander = db.notes.fetch(data.notes[3]).await.unwrap().unwrap();
    assert_eq!(bystander.folder_id, Some(survivor));

    test_db.cleanup(&data).await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_delete_folder_is_idempotent() {
    let test_db = TestDatabase::new().await;
    let data = TestDataBuilder::new(&test_db.db)
        .with_folder("twice")
        .await
        .with_note_in_last_folder("note")
        .await
        .build();

    let first = test_db.db.folders.delete(data.folders[0]).await.unwrap();
    let second = test_db.db.folders.delete(data.folders[0]).await.unwrap();

    assert!(first.folder_removed);
    assert_eq!(first.notes_cleared, 1);
    assert!(!second.folder_removed);
    assert_eq!(second.notes_cleared, 0);

    test_db.cleanup(&data).await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_delete_missing_folder_is_not_an_error() {
    let test_db = TestDatabase::new().await;
    let result = test_db.db.folders.delete(Uuid::now_v7()).await.unwrap();
    assert!(!result.folder_removed);
    assert_eq!(result.notes_cleared, 0);
    test_db.cleanup(&TestData::default()).await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_duplicate_folder_name_conflicts() {
    let test_db = TestDatabase::new().await;
    let name = unique_name("dup");

    let original = test_db.db.folders.create(&name).await.unwrap();
    let err = test_db.db.folders.create(&name).await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)), "got {err:?}");

    // Original unaffected
    let fetched = test_db.db.folders.get(original.id).await.unwrap().unwrap();
    assert_eq!(fetched, original);

    let data = TestData {
        folders: vec![original.id],
        notes: vec![],
    };
    test_db.cleanup(&data).await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_rename_to_taken_name_conflicts() {
    let test_db = TestDatabase::new().await;
    let a = test_db.db.folders.create(&unique_name("a")).await.unwrap();
    let b = test_db.db.folders.create(&unique_name("b")).await.unwrap();

    let err = test_db.db.folders.update(b.id, &a.name).await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    let renamed = test_db
        .db
        .folders
        .update(b.id, &unique_name("c"))
        .await
        .unwrap();
    assert_eq!(renamed.id, b.id);
    assert_ne!(renamed.name, b.name);
    assert!(renamed.updated_at >= b.updated_at);
    assert_eq!(renamed.created_at, b.created_at);

    let data = TestData {
        folders: vec![a.id, b.id],
        notes: vec![],
    };
    test_db.cleanup(&data).await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_update_missing_folder_is_not_found() {
    let test_db = TestDatabase::new().await;
    let id = Uuid::now_v7();
    let err = test_db.db.folders.update(id, "whatever").await.unwrap_err();
    assert!(matches!(err, Error::FolderNotFound(missing) if missing == id));
    test_db.cleanup(&TestData::default()).await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_list_folders_substring_sorted_by_name() {
    let test_db = TestDatabase::new().await;
    let token = Uuid::new_v4().simple().to_string();

    let mut ids = Vec::new();
    for name in ["zeta", "alpha", "mid"] {
        let folder = test_db
            .db
            .folders
            .create(&format!("{}-{}", name, token))
            .await
            .unwrap();
        ids.push(folder.id);
    }

    let listed = test_db
        .db
        .folders
        .list(ListFoldersRequest {
            search_term: Some(token.clone()),
        })
        .await
        .unwrap();
    let names: Vec<_> = listed.iter().map(|f| f.name.clone()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(listed.len(), 3);
    assert_eq!(names, sorted);

    // Case-sensitive match
    let upper = test_db
        .db
        .folders
        .list(ListFoldersRequest {
            search_term: Some(format!("MID-{}", token)),
        })
        .await
        .unwrap();
    assert!(upper.is_empty());

    let data = TestData {
        folders: ids,
        notes: vec![],
    };
    test_db.cleanup(&data).await;
}
