use std::fs::Metadata;
use std::path::PathBuf;
use std::time::SystemTime;

/// A regular, non-empty file discovered during a walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    /// Last path component
    pub name: String,
    /// Logical length in bytes
    pub size_bytes: u64,
    pub created_at: Option<SystemTime>,
    pub modified_at: Option<SystemTime>,
}

impl FileRecord {
    /// Build a record for `path`, or `None` unless it is a regular file with content
    pub fn from_metadata(path: PathBuf, metadata: &Metadata) -> Option<Self> {
        if !metadata.is_file() || metadata.len() == 0 {
            return None;
        }

        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        Some(Self {
            name,
            size_bytes: metadata.len(),
            created_at: metadata.created().ok(),
            modified_at: metadata.modified().ok(),
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_record_for_regular_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("archive.zip");
        fs::write(&path, vec![0u8; 42]).unwrap();

        let meta = fs::metadata(&path).unwrap();
        let record = FileRecord::from_metadata(path.clone(), &meta).unwrap();

        assert_eq!(record.name, "archive.zip");
        assert_eq!(record.size_bytes, 42);
        assert_eq!(record.path, path);
        assert!(record.modified_at.is_some());
    }

    #[test]
    fn test_no_record_for_empty_file_or_directory() {
        let temp = TempDir::new().unwrap();
        let empty = temp.path().join("empty");
        fs::write(&empty, b"").unwrap();

        let meta = fs::metadata(&empty).unwrap();
        assert!(FileRecord::from_metadata(empty, &meta).is_none());

        let meta = fs::metadata(temp.path()).unwrap();
        assert!(FileRecord::from_metadata(temp.path().to_path_buf(), &meta).is_none());
    }
}
