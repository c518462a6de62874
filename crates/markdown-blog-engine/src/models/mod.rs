pub mod collection;
pub mod markdown_file;
pub mod post;

pub use collection::PostCollection;
pub use markdown_file::MarkdownFile;
pub use post::{Post, tag_url};
