use crate::highlight::{HighlightError, Highlighter};

/// What the payload of a [`CodeBlock`] holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    /// Raw source text, escaped when written out
    Raw,
    /// Highlighter output, written out as is
    Html,
}

/// A completed fenced code block on its way through the rendering pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub text: String,
    pub class: String,
    pub markup: Markup,
}

impl CodeBlock {
    pub const LANGUAGE_PREFIX: &'static str = "language-";
    pub const HIGHLIGHT_CLASS: &'static str = "hljs";

    pub fn new(text: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: class.into(),
            markup: Markup::Raw,
        }
    }

    /// Build a block from a fence info string such as `rust` or `python title="x"`.
    ///
    /// Only the first word names the language; an empty info string gives an
    /// empty class.
    pub fn fenced(text: impl Into<String>, info: &str) -> Self {
        let class = match info.split_whitespace().next() {
            Some(language) => format!("{}{language}", Self::LANGUAGE_PREFIX),
            None => String::new(),
        };
        Self::new(text, class)
    }

    /// The language named by a `language-<name>` class
    pub fn language(&self) -> Option<&str> {
        self.class.strip_prefix(Self::LANGUAGE_PREFIX)
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<pre><code");
        if !self.class.is_empty() {
            html.push_str(" class=\"");
            html.push_str(&html_escape::encode_double_quoted_attribute(&self.class));
            html.push('"');
        }
        html.push('>');
        match self.markup {
            Markup::Raw => html.push_str(&html_escape::encode_text(&self.text)),
            Markup::Html => html.push_str(&self.text),
        }
        html.push_str("</code></pre>\n");
        html
    }
}

/// Run a block's code through `highlighter` if its class names a language.
///
/// Blocks without a `language-` class come back untouched. Highlighted blocks
/// keep their language class behind the `hljs` marker, e.g.
/// `hljs language-python`.
pub fn highlight_code_block<H>(block: CodeBlock, highlighter: &H) -> Result<CodeBlock, HighlightError>
where
    H: Highlighter + ?Sized,
{
    let Some(language) = block.language() else {
        return Ok(block);
    };

    let text = highlighter.highlight(language, &block.text)?;
    let class = format!("{} {}", CodeBlock::HIGHLIGHT_CLASS, block.class);

    Ok(CodeBlock {
        text,
        class,
        markup: Markup::Html,
    })
}
