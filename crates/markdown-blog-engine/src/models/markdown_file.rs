use relative_path::{RelativePath, RelativePathBuf};

/// A Markdown source file, addressed relative to the source directory
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownFile {
    relative_path: RelativePathBuf,
    filename: String,
}

impl MarkdownFile {
    pub const EXTENSION: &'static str = "md";

    pub fn new(relative_path: RelativePathBuf) -> Self {
        let filename = Self::extract_filename(&relative_path);
        Self {
            relative_path,
            filename,
        }
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    /// File stem, e.g. `hello-world` for `posts/hello-world.md`
    pub fn filename(&self) -> &str {
        &self.filename
    }

    fn extract_filename(path: &RelativePath) -> String {
        path.file_stem().unwrap_or("untitled").to_string()
    }
}

impl From<&str> for MarkdownFile {
    fn from(path: &str) -> Self {
        Self::new(RelativePathBuf::from(path))
    }
}
