use crate::domain::ports::Storage;
use crate::utils::error::{ArkitektonikaError, Result};
use std::path::{Path, PathBuf};

/// Filesystem storage rooted at a base directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        tokio::fs::read(&full_path)
            .await
            .map_err(|e| ArkitektonikaError::io(full_path, e))
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ArkitektonikaError::io(parent, e))?;
        }

        tokio::fs::write(&full_path, data)
            .await
            .map_err(|e| ArkitektonikaError::io(full_path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage
            .write_file("nested/dir/plot.schem", b"schematic")
            .await
            .unwrap();
        let data = storage.read_file("nested/dir/plot.schem").await.unwrap();
        assert_eq!(data, b"schematic");
    }

    #[tokio::test]
    async fn test_read_missing_file_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        match storage.read_file("missing.schem").await {
            Err(ArkitektonikaError::Io { path, source }) => {
                assert!(path.ends_with("missing.schem"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Io error, got {:?}", other),
        }
    }
}
