use crate::excerpt::build_excerpt;
use chrono::{DateTime, SecondsFormat, Utc};
use markdown_blog_config::SiteConfig;

/// A blog post with its rendered HTML body.
///
/// Everything a list or post page shows about a post is either a field here
/// or computed from one by the methods below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// File stem, used for the output path
    pub filename: String,
    pub title: String,
    pub tags: Vec<String>,
    /// Unix timestamp in seconds
    pub date: i64,
    pub cover_image: Option<String>,
    pub description: Option<String>,
    /// Hand-written excerpt, preferred over the body when present
    pub excerpt: Option<String>,
    /// Rendered HTML
    pub content: String,
}

impl Post {
    pub fn new(
        filename: impl Into<String>,
        title: impl Into<String>,
        date: i64,
        content: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            title: title.into(),
            tags: Vec::new(),
            date,
            cover_image: None,
            description: None,
            excerpt: None,
            content: content.into(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cover_image(mut self, url: impl Into<String>) -> Self {
        self.cover_image = Some(url.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    /// Publication date, `None` if the timestamp is out of range
    pub fn date(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.date, 0)
    }

    /// e.g. `January 5, 2019`
    pub fn display_date(&self) -> Option<String> {
        self.date()
            .map(|date| date.format("%B %-d, %Y").to_string())
    }

    /// e.g. `2019-01-05T00:00:00+00:00`, for `datetime` attributes
    pub fn atom_date(&self) -> Option<String> {
        self.date()
            .map(|date| date.to_rfc3339_opts(SecondsFormat::Secs, false))
    }

    pub fn excerpt(&self, max_length: usize) -> String {
        let source = self.excerpt.as_deref().unwrap_or(&self.content);
        build_excerpt(source, max_length)
    }

    /// Site-relative path from the posts collection template
    pub fn path(&self, config: &SiteConfig) -> String {
        config.collections.posts.resolve_path(&self.filename)
    }

    pub fn url(&self, config: &SiteConfig) -> String {
        config.url(&self.path(config))
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// URL of the page listing every post with `tag`
pub fn tag_url(config: &SiteConfig, tag: &str) -> String {
    config.url(&config.collections.tags.resolve_path(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // 2019-01-05T00:00:00Z
    const JAN_5_2019: i64 = 1_546_646_400;

    fn post() -> Post {
        Post::new(
            "hello-world",
            "Hello World",
            JAN_5_2019,
            "<h1>Hello</h1><p>First post with <code>code</code>.</p>",
        )
    }

    #[test]
    fn dates_from_unix_timestamp() {
        let post = post();

        assert_eq!(post.display_date().as_deref(), Some("January 5, 2019"));
        assert_eq!(
            post.atom_date().as_deref(),
            Some("2019-01-05T00:00:00+00:00")
        );
    }

    #[test]
    fn out_of_range_timestamp_has_no_date() {
        let post = Post::new("x", "X", i64::MAX, "");

        assert!(post.date().is_none());
        assert!(post.display_date().is_none());
    }

    #[test]
    fn excerpt_uses_content_by_default() {
        assert_eq!(post().excerpt(255), "First post with <code>code</code>.");
    }

    #[test]
    fn explicit_excerpt_wins_over_content() {
        let post = post().with_excerpt("<p>Custom summary of the post</p>");

        assert_eq!(post.excerpt(255), "Custom summary of the post");
        assert_eq!(post.excerpt(10), "Custom...");
    }

    #[test]
    fn url_follows_posts_collection_path() {
        let mut config = SiteConfig::default();

        assert_eq!(post().url(&config), "/posts/hello-world");

        config.base_url = "https://blog.example.com".to_string();
        assert_eq!(post().url(&config), "https://blog.example.com/posts/hello-world");
        assert_eq!(post().path(&config), "/posts/hello-world");
    }

    #[test]
    fn tag_url_follows_tags_collection_path() {
        assert_eq!(tag_url(&SiteConfig::default(), "rust"), "/tags/rust");
    }

    #[test]
    fn builder_sets_optional_fields() {
        let post = post()
            .with_tags(["php", "laravel"])
            .with_cover_image("/img/cover.png")
            .with_description("About things");

        assert!(post.has_tag("php"));
        assert!(!post.has_tag("PHP"));
        assert_eq!(post.cover_image.as_deref(), Some("/img/cover.png"));
        assert_eq!(post.description.as_deref(), Some("About things"));
    }
}
