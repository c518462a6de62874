pub mod excerpt;
pub mod highlight;
pub mod io;
pub mod links;
pub mod models;
pub mod rendering;
pub mod site;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use excerpt::{DEFAULT_EXCERPT_LENGTH, build_excerpt};
pub use highlight::{HighlightError, Highlighter, SyntectHighlighter};
pub use io::IoError;
pub use links::{is_active, trim_path};
pub use models::{MarkdownFile, Post, PostCollection, tag_url};
pub use rendering::{
    CodeBlock, CodeBlockTransform, Markup, MarkdownRenderer, RenderError, highlight_code_block,
};
pub use site::{BuildError, BuiltPost, SiteBuilder};
