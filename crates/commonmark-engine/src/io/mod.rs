use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a markdown file and return its content
pub fn read_file(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    log::debug!("reading {}", path.display());
    fs::read_to_string(path).map_err(IoError::Io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_existing_file() {
        // Given a markdown file on disk
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.md");
        fs::write(&path, "# Title\n\n```js\nx\n```\n").unwrap();

        // When reading it
        let content = read_file(&path).unwrap();

        // Then the content comes back unchanged
        assert_eq!(content, "# Title\n\n```js\nx\n```\n");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let path = PathBuf::from("/this/path/does/not/exist.md");
        let result = read_file(&path);
        assert!(matches!(result, Err(IoError::NotFound(p)) if p == path));
    }

    #[test]
    fn test_directory_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let result = read_file(dir.path());
        assert!(matches!(result, Err(IoError::Io(_))));
    }
}
