use kanban_core::KanbanResult;
use std::io::Write;
use std::path::Path;

/// Atomic file writer that prevents data corruption.
/// Uses the write-to-temp-file then rename pattern.
pub struct AtomicWriter;

impl AtomicWriter {
    /// Write data to a file atomically.
    ///
    /// The temp file lives in the target's directory so the final rename never
    /// crosses filesystems. A crash mid-write leaves the old file intact.
    pub fn write_atomic(path: &Path, data: &[u8]) -> KanbanResult<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(data)?;
        temp_file.as_file().sync_all()?;
        temp_file.persist(path).map_err(|e| e.error)?;

        tracing::debug!(
            "Atomically wrote {} bytes to {}",
            data.len(),
            path.display()
        );
        Ok(())
    }

    /// Read a whole file as UTF-8, or `None` if it does not exist.
    pub fn read_to_string(path: &Path) -> KanbanResult<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(data) => {
                tracing::debug!("Read {} bytes from {}", data.len(), path.display());
                Ok(Some(data))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.json");

        AtomicWriter::write_atomic(&file_path, b"[1,2,3]").unwrap();

        let read = AtomicWriter::read_to_string(&file_path).unwrap();
        assert_eq!(read.as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn test_atomic_write_overwrites() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.json");

        AtomicWriter::write_atomic(&file_path, b"First").unwrap();
        AtomicWriter::write_atomic(&file_path, b"Second").unwrap();

        let read = AtomicWriter::read_to_string(&file_path).unwrap();
        assert_eq!(read.as_deref(), Some("Second"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let read = AtomicWriter::read_to_string(&dir.path().join("absent.json")).unwrap();
        assert!(read.is_none());
    }
}
