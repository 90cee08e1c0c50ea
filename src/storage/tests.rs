// src/storage/tests.rs
//!
//! Tests for the storage transfer steps
//!

#[cfg(test)]
mod transfer_tests {
    use crate::storage::*;
    use crate::test_support::local_files;
    use std::fs;
    use tempfile::TempDir;

    fn context(destination: std::path::PathBuf) -> TransferContentContext {
        TransferContentContext {
            destination_folder: destination,
            content_ids: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_appends_and_creates_content_dir() {
        let dir = TempDir::new().unwrap();
        let step = ValidateDestinationFolder::new(local_files(dir.path()));

        let updated = step.execute(context(dir.path().to_path_buf())).await.unwrap();

        assert_eq!(updated.destination_folder, dir.path().join("content"));
        assert!(dir.path().join("content").is_dir());
    }

    #[tokio::test]
    async fn test_keeps_existing_content_dir() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("content")).unwrap();
        fs::write(dir.path().join("content/do_1.json"), "{}").unwrap();
        let step = ValidateDestinationFolder::new(local_files(dir.path()));

        let updated = step
            .execute(context(dir.path().join("content/")))
            .await
            .unwrap();

        assert_eq!(updated.destination_folder, dir.path().join("content"));
        assert!(dir.path().join("content/do_1.json").exists());
        assert!(!dir.path().join("content/content").exists());
    }

    #[tokio::test]
    async fn test_unwritable_destination() {
        let dir = TempDir::new().unwrap();
        let step = ValidateDestinationFolder::new(local_files(dir.path()));

        let result = step.execute(context(dir.path().join("missing/folder"))).await;

        match result {
            Err(err @ TransferError::NotWritable { .. }) => {
                assert_eq!(err.to_string(), "Destination is not writable");
            }
            other => panic!("Expected NotWritable, got {:?}", other),
        }
        assert!(!dir.path().join("missing").exists());
    }
}
