use crate::models::Post;
use markdown_blog_config::{SortField, SortOrder};
use std::cmp::Ordering;

/// Posts in collection order.
///
/// Sorting is stable, so posts that compare equal keep the order they were
/// loaded in.
#[derive(Debug, Clone, Default)]
pub struct PostCollection {
    posts: Vec<Post>,
}

impl PostCollection {
    pub fn new(mut posts: Vec<Post>, sort: SortOrder) -> Self {
        posts.sort_by(|a, b| {
            let ordering = compare(a, b, sort.field);
            if sort.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        Self { posts }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn iter(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, filename: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.filename == filename)
    }

    /// The post before `post` in collection order
    pub fn previous(&self, post: &Post) -> Option<&Post> {
        let index = self.position(post)?;
        index.checked_sub(1).and_then(|i| self.posts.get(i))
    }

    /// The post after `post` in collection order
    pub fn next(&self, post: &Post) -> Option<&Post> {
        let index = self.position(post)?;
        self.posts.get(index + 1)
    }

    /// Posts carrying exactly `tag`, in collection order
    pub fn tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Post> + 'a {
        self.posts.iter().filter(move |p| p.has_tag(tag))
    }

    /// Distinct tags in the order they first appear
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for tag in self.posts.iter().flat_map(|p| p.tags.iter()) {
            if !tags.contains(&tag.as_str()) {
                tags.push(tag);
            }
        }
        tags
    }

    fn position(&self, post: &Post) -> Option<usize> {
        self.posts.iter().position(|p| p.filename == post.filename)
    }
}

fn compare(a: &Post, b: &Post, field: SortField) -> Ordering {
    match field {
        SortField::Date => a.date.cmp(&b.date),
        SortField::Title => a.title.cmp(&b.title),
        SortField::Filename => a.filename.cmp(&b.filename),
    }
}
