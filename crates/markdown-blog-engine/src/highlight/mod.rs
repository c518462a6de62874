//! Syntax highlighting for fenced code blocks.
//!
//! [`Highlighter`] is the capability the rendering pipeline needs: take a
//! language name and raw code, return HTML. [`SyntectHighlighter`] is the
//! default engine; anything else with the same shape (including a plain
//! closure) can be swapped in.

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("Failed to highlight {language} code: {source}")]
    Engine {
        language: String,
        source: syntect::Error,
    },

    #[error("Failed to highlight {language} code: {message}")]
    Rejected { language: String, message: String },
}

pub trait Highlighter {
    /// Render `code` as HTML for `language`.
    ///
    /// Languages the engine does not know must come back unhighlighted but
    /// HTML-escaped, not as an error.
    fn highlight(&self, language: &str, code: &str) -> Result<String, HighlightError>;
}

impl<F> Highlighter for F
where
    F: Fn(&str, &str) -> Result<String, HighlightError>,
{
    fn highlight(&self, language: &str, code: &str) -> Result<String, HighlightError> {
        self(language, code)
    }
}

/// Highlighter backed by syntect's bundled grammars.
///
/// Output uses classed spans (`<span class="hljs-keyword ...">`) so the
/// colours come from the site stylesheet rather than inline styles.
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
}

impl SyntectHighlighter {
    pub const CLASS_PREFIX: &'static str = "hljs-";

    pub fn new() -> Self {
        Self::with_syntax_set(SyntaxSet::load_defaults_newlines())
    }

    pub fn with_syntax_set(syntax_set: SyntaxSet) -> Self {
        Self { syntax_set }
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, language: &str, code: &str) -> Result<String, HighlightError> {
        let Some(syntax) = self.syntax_set.find_syntax_by_token(language) else {
            log::debug!("No grammar for '{language}', leaving code unhighlighted");
            return Ok(html_escape::encode_text(code).into_owned());
        };

        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::SpacedPrefixed {
                prefix: Self::CLASS_PREFIX,
            },
        );

        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|source| HighlightError::Engine {
                    language: language.to_string(),
                    source,
                })?;
        }

        Ok(generator.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn known_language_gets_classed_spans() {
        let highlighter = SyntectHighlighter::new();

        let html = highlighter
            .highlight("rust", "fn main() {}\n")
            .unwrap();

        assert!(html.contains("<span class=\"hljs-"));
        assert!(html.contains("main"));
    }

    #[test]
    fn highlighted_output_escapes_markup_in_code() {
        let highlighter = SyntectHighlighter::new();

        let html = highlighter
            .highlight("python", "if a < b:\n    pass\n")
            .unwrap();

        assert!(html.contains("&lt;"));
        assert!(!html.contains("a < b"));
    }

    #[test]
    fn unknown_language_fails_open() {
        let highlighter = SyntectHighlighter::new();

        let html = highlighter
            .highlight("klingon", "a < b && c")
            .unwrap();

        assert_eq!(html, "a &lt; b &amp;&amp; c");
    }

    #[test]
    fn closures_are_highlighters() {
        let upper = |_: &str, code: &str| -> Result<String, HighlightError> {
            Ok(code.to_uppercase())
        };

        assert_eq!(upper.highlight("any", "abc").unwrap(), "ABC");
    }
}
