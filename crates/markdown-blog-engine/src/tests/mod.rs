use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary source directory for posts
pub fn create_test_source_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test markdown file, including any parent directories
pub fn create_test_file(source_dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = source_dir.path().join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();
    file_path
}
