use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SortOrderError {
    #[error("Empty sort order")]
    Empty,

    #[error("Unknown sort field '{0}' (expected date, title or filename)")]
    UnknownField(String),
}

/// Field a collection is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Date,
    Title,
    Filename,
}

impl SortField {
    fn as_str(self) -> &'static str {
        match self {
            SortField::Date => "date",
            SortField::Title => "title",
            SortField::Filename => "filename",
        }
    }
}

/// Collection ordering, written `date` (ascending) or `-date` (descending)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SortOrder {
    pub field: SortField,
    pub descending: bool,
}

impl SortOrder {
    pub const fn ascending(field: SortField) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    pub const fn descending(field: SortField) -> Self {
        Self {
            field,
            descending: true,
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::ascending(SortField::Filename)
    }
}

impl FromStr for SortOrder {
    type Err = SortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (descending, name) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let field = match name {
            "" => return Err(SortOrderError::Empty),
            "date" => SortField::Date,
            "title" => SortField::Title,
            "filename" => SortField::Filename,
            other => return Err(SortOrderError::UnknownField(other.to_string())),
        };

        Ok(Self { field, descending })
    }
}

impl TryFrom<String> for SortOrder {
    type Error = SortOrderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortOrder> for String {
    fn from(order: SortOrder) -> Self {
        order.to_string()
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            f.write_str("-")?;
        }
        f.write_str(self.field.as_str())
    }
}

/// A named group of pages sharing an output path template.
///
/// `path` may contain a `{filename}` placeholder which is replaced with the
/// page's file stem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    #[serde(default)]
    pub sort: SortOrder,
    pub path: String,
}

impl CollectionConfig {
    pub const FILENAME_PLACEHOLDER: &'static str = "{filename}";

    /// Resolve the path template for a page, always with one leading `/`
    pub fn resolve_path(&self, filename: &str) -> String {
        resolve_template(&self.path, filename)
    }
}

/// Tag archive pages, one per tag. Posts on a tag page keep the posts
/// collection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagsConfig {
    pub path: String,
}

impl TagsConfig {
    pub fn resolve_path(&self, tag: &str) -> String {
        resolve_template(&self.path, tag)
    }
}

fn resolve_template(template: &str, filename: &str) -> String {
    let path = template.replace(CollectionConfig::FILENAME_PLACEHOLDER, filename);
    format!("/{}", path.trim_start_matches('/'))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionsConfig {
    pub posts: CollectionConfig,
    pub tags: TagsConfig,
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            posts: CollectionConfig {
                sort: SortOrder::descending(SortField::Date),
                path: "posts/{filename}".to_string(),
            },
            tags: TagsConfig {
                path: "/tags/{filename}".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("date", SortOrder::ascending(SortField::Date))]
    #[case("-date", SortOrder::descending(SortField::Date))]
    #[case("title", SortOrder::ascending(SortField::Title))]
    #[case(" -filename ", SortOrder::descending(SortField::Filename))]
    fn parses_sort_order(#[case] input: &str, #[case] expected: SortOrder) {
        assert_eq!(input.parse::<SortOrder>(), Ok(expected));
    }

    #[rstest]
    #[case("", SortOrderError::Empty)]
    #[case("-", SortOrderError::Empty)]
    #[case("-author", SortOrderError::UnknownField("author".to_string()))]
    fn rejects_invalid_sort_order(#[case] input: &str, #[case] expected: SortOrderError) {
        assert_eq!(input.parse::<SortOrder>(), Err(expected));
    }

    #[test]
    fn sort_order_displays_in_config_syntax() {
        assert_eq!(SortOrder::descending(SortField::Date).to_string(), "-date");
        assert_eq!(SortOrder::ascending(SortField::Title).to_string(), "title");
    }

    #[test]
    fn resolve_path_substitutes_filename() {
        let posts = CollectionsConfig::default().posts;
        assert_eq!(posts.resolve_path("hello-world"), "/posts/hello-world");
    }

    #[test]
    fn resolve_path_keeps_single_leading_slash() {
        let tags = CollectionsConfig::default().tags;
        assert_eq!(tags.resolve_path("rust"), "/tags/rust");
    }

    #[test]
    fn resolve_path_without_placeholder() {
        let collection = CollectionConfig {
            sort: SortOrder::default(),
            path: "about".to_string(),
        };
        assert_eq!(collection.resolve_path("ignored"), "/about");
    }
}
