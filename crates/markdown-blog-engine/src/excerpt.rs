//! Plain-text previews of rendered posts for list pages.

use regex::Regex;
use std::sync::OnceLock;

pub use markdown_blog_config::DEFAULT_EXCERPT_LENGTH;

const CODE_CLOSE: &str = "</code>";
const ELLIPSIS: &str = "...";

/// Build a preview of rendered HTML at most `max_length` characters long.
///
/// Code samples (`<pre>`) and headings are dropped, every other tag except
/// `<code>` is stripped. Content that fits is returned as cleaned. Longer
/// content is cut, a `<code>` span split by the cut is closed, the dangling
/// last word is dropped and `...` appended. A span left open by dropping the
/// last word is closed again, so the result never holds an unclosed `<code>`.
pub fn build_excerpt(content: &str, max_length: usize) -> String {
    let cleaned = clean(content);

    let Some((cut, _)) = cleaned.char_indices().nth(max_length) else {
        return cleaned;
    };

    let mut truncated = cleaned[..cut].to_string();
    close_open_code_span(&mut truncated);

    let mut excerpt = dangling_word_regex().replace(&truncated, "").into_owned();
    close_open_code_span(&mut excerpt);
    excerpt.push_str(ELLIPSIS);
    excerpt
}

fn close_open_code_span(html: &mut String) {
    let opened = code_open_regex().find_iter(html.as_str()).count();
    if opened > html.matches(CODE_CLOSE).count() {
        html.push_str(CODE_CLOSE);
    }
}

fn clean(content: &str) -> String {
    let without_pre = pre_block_regex().replace_all(content, "");
    let without_headings = heading_regex().replace_all(&without_pre, "");
    strip_tags_except_code(&without_headings)
}

fn pre_block_regex() -> &'static Regex {
    static PRE_BLOCK: OnceLock<Regex> = OnceLock::new();
    PRE_BLOCK.get_or_init(|| Regex::new(r"<pre(\s[^>]*)?>[\w\W]*?</pre>").expect("Invalid pre block regex"))
}

fn heading_regex() -> &'static Regex {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    HEADING.get_or_init(|| Regex::new(r"<h\d(\s[^>]*)?>[\w\W]*?</h\d>").expect("Invalid heading regex"))
}

fn code_open_regex() -> &'static Regex {
    static CODE_OPEN: OnceLock<Regex> = OnceLock::new();
    CODE_OPEN.get_or_init(|| Regex::new(r"<code(\s[^>]*)?>").expect("Invalid code tag regex"))
}

/// Trailing whitespace plus whatever partial word follows it
fn dangling_word_regex() -> &'static Regex {
    static DANGLING_WORD: OnceLock<Regex> = OnceLock::new();
    DANGLING_WORD.get_or_init(|| Regex::new(r"\s+?(\S+)?$").expect("Invalid dangling word regex"))
}

/// Remove every tag except `<code ...>` and `</code>`.
///
/// A `<` with no closing `>` swallows the rest of the input.
fn strip_tags_except_code(html: &str) -> String {
    let mut output = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        output.push_str(&rest[..start]);
        let from_tag = &rest[start..];

        let Some(end) = from_tag.find('>') else {
            return output;
        };

        let tag = &from_tag[..=end];
        if is_code_tag(tag) {
            output.push_str(tag);
        }
        rest = &from_tag[end + 1..];
    }

    output.push_str(rest);
    output
}

fn is_code_tag(tag: &str) -> bool {
    let inner = tag.trim_start_matches('<').trim_start_matches('/');
    let name_len = inner
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(inner.len());
    inner[..name_len].eq_ignore_ascii_case("code")
}
