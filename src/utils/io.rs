//! File I/O primitives with consistent error handling.

use std::fs;
use std::io::{Error as IoError, ErrorKind};
use std::path::Path;

use crate::error::Result;

/// Read file contents as UTF-8.
///
/// Non-UTF-8 content surfaces as an `InvalidData` error; callers treat a
/// failed read as a skipped file, never a run abort.
pub fn read_file(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// Write content to file atomically (write to .tmp, then rename).
///
/// Prevents data loss if the process crashes mid-write. The rename is
/// atomic on POSIX filesystems, so readers always see either the old
/// content or the new content — never a partial write.
pub fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| invalid_path(path, "no parent directory"))?;

    let filename = path
        .file_name()
        .ok_or_else(|| invalid_path(path, "no file name"))?;

    let tmp_path = parent.join(format!("{}.tmp", filename.to_string_lossy()));

    fs::write(&tmp_path, content)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

fn invalid_path(path: &Path, reason: &str) -> crate::error::Error {
    IoError::new(
        ErrorKind::InvalidInput,
        format!("Invalid path {}: {}", path.display(), reason),
    )
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn read_file_succeeds_for_existing_file() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "test content").unwrap();

        let content = read_file(temp.path()).unwrap();
        assert!(content.contains("test content"));
    }

    #[test]
    fn read_file_returns_error_for_missing_file() {
        let result = read_file(Path::new("/nonexistent/path.txt"));
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code(), "IO_ERROR");
    }

    #[test]
    fn atomic_write_replaces_existing_content() {
        let temp = NamedTempFile::new().unwrap();
        write_file_atomic(temp.path(), "new content").unwrap();

        let content = fs::read_to_string(temp.path()).unwrap();
        assert_eq!(content, "new content");
    }

    #[test]
    fn atomic_write_fails_for_missing_directory() {
        let result = write_file_atomic(Path::new("/nonexistent/dir/file.txt"), "content");
        assert!(result.is_err());
    }
}
