use crate::models::MarkdownFile;
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid source directory: {0}")]
    InvalidSourceDir(String),
    #[error("Path is not relative to the source directory: {0}")]
    InvalidPath(PathBuf),
}

/// Read a markdown file and return its content
pub fn read_file(relative_path: &RelativePath, source_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(source_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write content to a file, creating parent directories as needed
pub fn write_file(
    relative_path: &RelativePath,
    output_root: &Path,
    content: &str,
) -> Result<PathBuf, IoError> {
    let absolute_path = relative_path.to_path(output_root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)?;
    Ok(absolute_path)
}

/// Last modification time of a file as a Unix timestamp
pub fn modified_timestamp(relative_path: &RelativePath, source_root: &Path) -> Result<i64, IoError> {
    let modified = fs::metadata(relative_path.to_path(source_root))?.modified()?;
    let seconds = modified
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    Ok(i64::try_from(seconds).unwrap_or(i64::MAX))
}

/// Scan for markdown files under the source directory, sorted by path
pub fn scan_markdown_files(source_root: &Path) -> Result<Vec<MarkdownFile>, IoError> {
    validate_source_dir(source_root)?;

    let mut paths = Vec::new();
    scan_directory_recursive(source_root, &mut paths)?;
    paths.sort();

    paths
        .into_iter()
        .map(|path| -> Result<MarkdownFile, IoError> {
            let relative = path
                .strip_prefix(source_root)
                .ok()
                .and_then(|p| RelativePathBuf::from_path(p).ok())
                .ok_or_else(|| IoError::InvalidPath(path.clone()))?;
            Ok(MarkdownFile::new(relative))
        })
        .collect()
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == MarkdownFile::EXTENSION
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_source_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidSourceDir(format!(
            "{} does not exist or is not a directory",
            path.display()
        )));
    }

    Ok(())
}
