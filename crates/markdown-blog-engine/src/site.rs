//! Whole-site build: load every post, render it, write it out.

use crate::io::{self, IoError};
use crate::models::{MarkdownFile, Post, PostCollection};
use crate::rendering::{MarkdownRenderer, RenderError};
use markdown_blog_config::SiteConfig;
use relative_path::{RelativePath, RelativePathBuf};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error("Failed to render {path}: {source}")]
    Render {
        path: RelativePathBuf,
        source: RenderError,
    },

    #[error("Posts {first} and {second} would both be published as '{filename}'")]
    DuplicateFilename {
        filename: String,
        first: RelativePathBuf,
        second: RelativePathBuf,
    },
}

/// Where a post ended up after a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPost {
    pub filename: String,
    pub url: String,
    pub output_path: PathBuf,
}

pub struct SiteBuilder<'a> {
    config: &'a SiteConfig,
    renderer: MarkdownRenderer<'a>,
}

impl<'a> SiteBuilder<'a> {
    pub const INDEX_FILE: &'static str = "index.html";

    pub fn new(config: &'a SiteConfig, renderer: MarkdownRenderer<'a>) -> Self {
        Self { config, renderer }
    }

    pub fn config(&self) -> &SiteConfig {
        self.config
    }

    /// Render a single source file into a post
    pub fn load_post(&self, file: &MarkdownFile) -> Result<Post, BuildError> {
        let source_root = &self.config.source_path;
        let markdown = io::read_file(file.relative_path(), source_root)?;
        let date = io::modified_timestamp(file.relative_path(), source_root)?;

        let content = self
            .renderer
            .render(&markdown)
            .map_err(|source| BuildError::Render {
                path: file.relative_path().to_relative_path_buf(),
                source,
            })?;

        Ok(Post::new(file.filename(), file.filename(), date, content))
    }

    /// Load every Markdown file under the source directory, in collection order
    pub fn load_posts(&self) -> Result<PostCollection, BuildError> {
        let files = io::scan_markdown_files(&self.config.source_path)?;
        log::debug!(
            "Found {} markdown files in {}",
            files.len(),
            self.config.source_path.display()
        );

        check_unique_filenames(&files)?;

        let posts = files
            .iter()
            .map(|file| self.load_post(file))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PostCollection::new(posts, self.config.collections.posts.sort))
    }

    /// Write a post's HTML to `<build path>/<post path>/index.html`
    pub fn write_post(&self, post: &Post) -> Result<BuiltPost, BuildError> {
        let relative = RelativePath::new(post.path(self.config).trim_start_matches('/'))
            .join(Self::INDEX_FILE);
        let output_path = io::write_file(&relative, &self.config.build_path, &post.content)?;

        Ok(BuiltPost {
            filename: post.filename.clone(),
            url: post.url(self.config),
            output_path,
        })
    }

    pub fn build(&self) -> Result<Vec<BuiltPost>, BuildError> {
        let posts = self.load_posts()?;

        let mut built = Vec::with_capacity(posts.len());
        for post in posts.iter() {
            let output = self.write_post(post)?;
            log::info!(
                "{} -> {} ({} char excerpt)",
                post.filename,
                output.url,
                post.excerpt(self.config.excerpt_length).chars().count()
            );
            built.push(output);
        }

        log::info!(
            "Built {} posts into {}",
            built.len(),
            self.config.build_path.display()
        );
        Ok(built)
    }
}

/// Output paths are keyed by file stem, so two sources with the same stem
/// would overwrite each other
fn check_unique_filenames(files: &[MarkdownFile]) -> Result<(), BuildError> {
    let mut seen: HashMap<&str, &RelativePath> = HashMap::with_capacity(files.len());
    for file in files {
        if let Some(first) = seen.insert(file.filename(), file.relative_path()) {
            return Err(BuildError::DuplicateFilename {
                filename: file.filename().to_string(),
                first: first.to_relative_path_buf(),
                second: file.relative_path().to_relative_path_buf(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::HighlightError;
    use crate::tests::{create_test_file, create_test_source_dir};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn config_for(source: &TempDir, build: &TempDir) -> SiteConfig {
        SiteConfig {
            source_path: source.path().to_path_buf(),
            build_path: build.path().to_path_buf(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_build_writes_each_post_under_collection_path() {
        // Given two posts
        let source = create_test_source_dir();
        let build = create_test_source_dir();
        create_test_file(&source, "hello.md", "# Hello\n\nWorld");
        create_test_file(&source, "_posts/second.md", "Second post");
        let config = config_for(&source, &build);

        // When building the site
        let built = SiteBuilder::new(&config, MarkdownRenderer::new()).build().unwrap();

        // Then each post is written to posts/<filename>/index.html
        assert_eq!(built.len(), 2);
        let hello = build.path().join("posts/hello/index.html");
        assert_eq!(
            std::fs::read_to_string(&hello).unwrap(),
            "<h1>Hello</h1>\n<p>World</p>\n"
        );
        assert!(build.path().join("posts/second/index.html").exists());
        assert!(built.iter().any(|b| b.url == "/posts/hello" && b.output_path == hello));
    }

    #[test]
    fn test_load_post_renders_with_injected_transform() {
        let source = create_test_source_dir();
        let build = create_test_source_dir();
        create_test_file(&source, "code.md", "```go\nfmt.Println()\n```\n");
        let config = config_for(&source, &build);
        let stub = |_: &str, _: &str| -> Result<String, HighlightError> { Ok("GO".to_string()) };

        let builder = SiteBuilder::new(&config, MarkdownRenderer::with_highlighter(&stub));
        let post = builder.load_post(&MarkdownFile::from("code.md")).unwrap();

        assert_eq!(post.filename, "code");
        assert_eq!(post.title, "code");
        assert_eq!(
            post.content,
            "<pre><code class=\"hljs language-go\">GO</code></pre>\n"
        );
        assert!(post.date > 0);
    }

    #[test]
    fn test_render_failure_names_the_file() {
        let source = create_test_source_dir();
        let build = create_test_source_dir();
        create_test_file(&source, "broken.md", "```bad\nx\n```\n");
        let config = config_for(&source, &build);
        let renderer = MarkdownRenderer::new().with_code_block_transform(|_| {
            Err(HighlightError::Rejected {
                language: "bad".to_string(),
                message: "nope".to_string(),
            })
        });

        let err = SiteBuilder::new(&config, renderer).build().unwrap_err();

        assert!(matches!(err, BuildError::Render { .. }));
        assert!(err.to_string().contains("broken.md"));
    }

    #[test]
    fn test_same_filename_in_two_directories_is_rejected() {
        // Given two sources that would both land on posts/hello
        let source = create_test_source_dir();
        let build = create_test_source_dir();
        create_test_file(&source, "a/hello.md", "First");
        create_test_file(&source, "b/hello.md", "Second");
        let config = config_for(&source, &build);

        // When building the site
        let err = SiteBuilder::new(&config, MarkdownRenderer::new())
            .build()
            .unwrap_err();

        // Then neither is written and both paths are reported
        assert!(matches!(
            &err,
            BuildError::DuplicateFilename { filename, .. } if filename == "hello"
        ));
        let message = err.to_string();
        assert!(message.contains("a/hello.md"), "{message}");
        assert!(message.contains("b/hello.md"), "{message}");
        assert!(!build.path().join("posts/hello/index.html").exists());
    }

    #[test]
    fn test_missing_source_dir_is_io_error() {
        let build = create_test_source_dir();
        let config = SiteConfig {
            source_path: PathBuf::from("/no/such/source"),
            build_path: build.path().to_path_buf(),
            ..SiteConfig::default()
        };

        let err = SiteBuilder::new(&config, MarkdownRenderer::new())
            .load_posts()
            .unwrap_err();

        assert!(matches!(err, BuildError::Io(IoError::InvalidSourceDir(_))));
    }
}
