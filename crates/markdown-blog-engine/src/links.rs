//! Helpers for navigation links.

/// Trim slashes and spaces from the start and slashes, spaces and dots from
/// the end of a path.
pub fn trim_path(path: &str) -> &str {
    path.trim_start_matches([' ', '\\', '/'])
        .trim_end_matches([' ', '.', '\\', '/'])
}

/// Whether the page at `page_path` is the one `path` links to.
///
/// An empty `path` only matches the site root.
pub fn is_active(page_path: &str, path: &str) -> bool {
    let page_path = trim_path(page_path);
    let path = trim_path(path);
    if path.is_empty() {
        return page_path.is_empty();
    }
    page_path.ends_with(path)
}
