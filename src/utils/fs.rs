//! File system utility functions
//!
//! Manifest discovery and reading with proper error handling.

use crate::error::{CliparseError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// Utility struct for file system operations
#[derive(Debug, Default)]
pub struct FileSystemUtils;

impl FileSystemUtils {
    /// Create a new file system utilities instance
    pub fn new() -> Self {
        Self
    }

    /// Find files in `dir` matching a glob `pattern`, sorted by path
    #[instrument(skip(self))]
    pub fn find_files<P: AsRef<Path> + std::fmt::Debug>(
        &self,
        dir: P,
        pattern: &str,
    ) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();

        if !dir.is_dir() {
            return Err(CliparseError::file_system(
                "search",
                dir,
                std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            ));
        }

        let full_pattern = dir.join(pattern);
        let full_pattern = full_pattern.to_string_lossy();
        debug!("Searching for files matching: {}", full_pattern);

        let paths = glob::glob(&full_pattern).map_err(|e| {
            CliparseError::configuration(format!("Invalid file pattern '{pattern}': {e}"))
        })?;

        let mut files = Vec::new();
        for path_result in paths {
            match path_result {
                Ok(path) if path.is_file() => {
                    debug!("Found file: {}", path.display());
                    files.push(path);
                }
                Ok(path) => debug!("Skipping non-file match: {}", path.display()),
                Err(e) => warn!("Error reading path: {}", e),
            }
        }

        // Sort for consistent load order
        files.sort();
        Ok(files)
    }

    /// Read a whole file as UTF-8 text
    #[instrument(skip(self))]
    pub fn read_to_string<P: AsRef<Path> + std::fmt::Debug>(&self, path: P) -> Result<String> {
        let path = path.as_ref();
        debug!("Reading file: {}", path.display());
        fs::read_to_string(path).map_err(|e| CliparseError::file_system("read", path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_files_sorted_and_filtered() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.toml"), "").unwrap();
        fs::write(temp_dir.path().join("a.toml"), "").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(temp_dir.path().join("dir.toml")).unwrap();

        let fs_utils = FileSystemUtils::new();
        let files = fs_utils.find_files(temp_dir.path(), "*.toml").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["a.toml", "b.toml"]);
    }

    #[test]
    fn test_find_files_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        let err = FileSystemUtils::new()
            .find_files(&missing, "*.toml")
            .unwrap_err();
        assert!(matches!(err, CliparseError::FileSystem { .. }));
    }

    #[test]
    fn test_read_to_string() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("file.txt");
        fs::write(&path, "hello").unwrap();

        let fs_utils = FileSystemUtils::new();
        assert_eq!(fs_utils.read_to_string(&path).unwrap(), "hello");
        assert!(fs_utils.read_to_string(temp_dir.path().join("nope")).is_err());
    }
}
