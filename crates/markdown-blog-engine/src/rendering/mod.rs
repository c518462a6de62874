//! Markdown to HTML rendering.
//!
//! Rendering is a fixed pipeline over pulldown-cmark events. The only
//! pluggable stage is what happens to a completed fenced code block: the
//! pipeline hands it to a [`CodeBlockTransform`] and writes out whatever
//! comes back.

pub mod code_block;

pub use code_block::{CodeBlock, Markup, highlight_code_block};

use crate::highlight::{HighlightError, Highlighter};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Highlight(#[from] HighlightError),
}

pub type CodeBlockTransform<'a> = Box<dyn Fn(CodeBlock) -> Result<CodeBlock, HighlightError> + 'a>;

pub struct MarkdownRenderer<'a> {
    options: Options,
    transform: CodeBlockTransform<'a>,
}

fn passthrough(block: CodeBlock) -> Result<CodeBlock, HighlightError> {
    Ok(block)
}

/// Fenced block whose text is still being collected
struct OpenFence {
    info: String,
    text: String,
}

impl<'a> MarkdownRenderer<'a> {
    /// Renderer that leaves code blocks as plain escaped text
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_FOOTNOTES);

        Self {
            options,
            transform: Box::new(passthrough),
        }
    }

    /// Renderer that highlights fenced blocks declaring a language
    pub fn with_highlighter<H>(highlighter: &'a H) -> Self
    where
        H: Highlighter + ?Sized,
    {
        Self::new().with_code_block_transform(move |block| highlight_code_block(block, highlighter))
    }

    pub fn with_code_block_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(CodeBlock) -> Result<CodeBlock, HighlightError> + 'a,
    {
        self.transform = Box::new(transform);
        self
    }

    pub fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let mut events = Vec::new();
        let mut fence: Option<OpenFence> = None;

        for event in Parser::new_ext(markdown, self.options) {
            if let Some(open) = fence.as_mut() {
                match event {
                    Event::Text(text) => open.text.push_str(&text),
                    Event::End(TagEnd::CodeBlock) => {
                        if let Some(OpenFence { info, text }) = fence.take() {
                            let block = (self.transform)(CodeBlock::fenced(text, &info))?;
                            events.push(Event::Html(block.to_html().into()));
                        }
                    }
                    other => events.push(other),
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                    fence = Some(OpenFence {
                        info: info.into_string(),
                        text: String::new(),
                    });
                }
                other => events.push(other),
            }
        }

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, events.into_iter());
        Ok(output)
    }
}

impl Default for MarkdownRenderer<'_> {
    fn default() -> Self {
        Self::new()
    }
}
