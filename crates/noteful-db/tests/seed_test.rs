//! Seeding against a live database.
//!
//! Seeding wipes both tables, so this lives in its own test binary and should
//! not run against a database other tests are using at the same time.

use std::collections::HashSet;

use noteful_core::{FolderRepository, ListFoldersRequest, ListNotesRequest, NoteRepository};
use noteful_db::test_fixtures::TestDatabase;
use noteful_db::{seed, SeedData, SeedSummary};

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database; replaces all rows
async fn test_seed_twice_yields_the_fixture_set() {
    let test_db = TestDatabase::new().await;
    let db = &test_db.db;
    let data = SeedData::embedded().expect("embedded seed");
    let expected = SeedSummary {
        folders: 4,
        notes: 7,
    };

    assert_eq!(seed(db.pool()).await.expect("first seed"), expected);
    assert_eq!(seed(db.pool()).await.expect("second seed"), expected);

    let folders = db
        .folders
        .list(ListFoldersRequest::default())
        .await
        .expect("list folders");
    let notes = db
        .notes
        .list(ListNotesRequest::default())
        .await
        .expect("list notes");
    assert_eq!(folders.len(), expected.folders);
    assert_eq!(notes.len(), expected.notes);

    let folder_ids: HashSet<_> = folders.iter().map(|f| f.id).collect();
    for note in &notes {
        if let Some(folder_id) = note.folder_id {
            assert!(
                folder_ids.contains(&folder_id),
                "note {} points at missing folder {}",
                note.id,
                folder_id
            );
        }
    }

    for folder in &folders {
        let stored = db
            .notes
            .count_in_folder(folder.id)
            .await
            .expect("count notes");
        assert_eq!(stored as usize, data.notes_in_folder(folder.id));
    }

    test_db.db.close().await;
}
