//! Document pipeline: find admonitions in Markdown and render everything to HTML
//!
//! Two forms are recognized at the top of any Markdown text (the document
//! itself or an admonition body):
//!
//! ````text
//! ```ad-note
//! title: Fenced
//! Body
//! ```
//!
//! !!! ad-tip
//!     title: Nested
//!     Body
//! ````

use log::{debug, warn};
use std::sync::Arc;

use crate::config::Config;
use crate::descriptor::Registry;
use crate::extract::{extract_block_with, Indentation};
use crate::notice::{LogNotifier, Notice, Notifier};
use crate::params::{parse_parameters, KeywordSet};
use crate::render::{
    render_admonition, render_raw, Admonition, ClassIconResolver, IconResolver, MarkdownRenderer,
};

/// Default prefix of nested marker lines
pub const DEFAULT_MARKER_PREFIX: &str = "!!! ad-";

/// Deepest admonition nesting rendered; deeper blocks are shown as raw text
pub const MAX_NESTING_DEPTH: usize = 32;

const FENCE_INFO_PREFIX: &str = "ad-";

/// How a block was written in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockForm {
    Fenced,
    Nested,
}

/// An admonition found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: String,
    pub form: BlockForm,
    /// Line of the fence or marker
    pub start: usize,
    /// Last line belonging to the block (inclusive)
    pub end: usize,
    /// Raw block body, parameters included
    pub src: String,
}

#[derive(Debug)]
enum Segment {
    /// Plain Markdown lines `start..end`
    Markdown { start: usize, end: usize },
    Block(Block),
}

/// Renders Markdown documents containing admonitions
pub struct Pipeline {
    registry: Registry,
    keywords: KeywordSet,
    indentation: Indentation,
    marker_prefix: String,
    markdown: MarkdownRenderer,
    icons: Box<dyn IconResolver + Send + Sync>,
    notifier: Arc<dyn Notifier>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Pipeline with the builtin types and the extended keyword set
    pub fn new() -> Self {
        Self {
            registry: Registry::builtin(),
            keywords: KeywordSet::extended(),
            indentation: Indentation::default(),
            marker_prefix: DEFAULT_MARKER_PREFIX.to_string(),
            markdown: MarkdownRenderer::default(),
            icons: Box::new(ClassIconResolver),
            notifier: Arc::new(LogNotifier),
        }
    }

    /// Pipeline configured from a loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .with_registry(config.registry())
            .with_keywords(KeywordSet::from(config.keywords))
            .with_indentation(config.indentation)
            .with_marker_prefix(config.marker_prefix.clone())
            .with_markdown(MarkdownRenderer::new(config.markdown.options()))
    }

    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_keywords(mut self, keywords: KeywordSet) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_indentation(mut self, indentation: Indentation) -> Self {
        self.indentation = indentation;
        self
    }

    pub fn with_marker_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.marker_prefix = prefix.into();
        self
    }

    pub fn with_markdown(mut self, markdown: MarkdownRenderer) -> Self {
        self.markdown = markdown;
        self
    }

    pub fn with_icons(mut self, icons: Box<dyn IconResolver + Send + Sync>) -> Self {
        self.icons = icons;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Top-level admonitions of a document, in order
    pub fn blocks(&self, text: &str) -> Vec<Block> {
        let lines: Vec<&str> = text.lines().collect();
        self.segments(&lines)
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Block(block) => Some(block),
                Segment::Markdown { .. } => None,
            })
            .collect()
    }

    /// Render a document to HTML
    pub fn render(&self, text: &str) -> String {
        self.render_at(text, 0)
    }

    /// Render one admonition body of the given kind
    pub fn render_block(&self, kind: &str, src: &str) -> String {
        self.render_block_at(kind, src, 0)
    }

    fn render_at(&self, text: &str, depth: usize) -> String {
        let lines: Vec<&str> = text.lines().collect();
        let mut out = String::new();

        for segment in self.segments(&lines) {
            match segment {
                Segment::Markdown { start, end } => {
                    out.push_str(&self.markdown.render(&lines[start..end].join("\n")));
                }
                Segment::Block(block) => {
                    out.push_str(&self.render_block_at(&block.kind, &block.src, depth));
                }
            }
        }

        out
    }

    fn render_block_at(&self, kind: &str, src: &str, depth: usize) -> String {
        if depth >= MAX_NESTING_DEPTH {
            warn!("{kind} admonition nested deeper than {MAX_NESTING_DEPTH} levels, rendering as text");
            self.notifier.notify(Notice::warning(
                format!("Admonitions nested deeper than {MAX_NESTING_DEPTH} levels are shown as text."),
                "pipeline",
            ));
            return render_raw(src);
        }

        let block_type = self.registry.get(kind);
        let params = parse_parameters(kind, src, block_type, &self.keywords, self.notifier.as_ref());
        debug!(
            "rendering {kind} admonition (title: {:?}, collapse: {:?})",
            params.title, params.collapse
        );

        let body_html = self.render_at(&params.content, depth + 1);
        let admonition = Admonition::new(kind, params, block_type, body_html);
        render_admonition(&admonition, &self.markdown, self.icons.as_ref())
    }

    fn segments(&self, lines: &[&str]) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut plain_start = 0;
        let mut idx = 0;

        while idx < lines.len() {
            let line = lines[idx];

            let block = if let Some((fence, info)) = code_fence(line) {
                match admonition_kind(info) {
                    Some(kind) => Some(self.fenced_block(lines, idx, fence, kind)),
                    None => {
                        // Ordinary code stays Markdown, whatever it contains
                        idx = fence_close(lines, idx, fence).map_or(lines.len(), |close| close + 1);
                        continue;
                    }
                }
            } else if let Some(kind) = self.marker_kind(line) {
                match extract_block_with(lines, idx, line, &self.indentation) {
                    Ok(nested) => Some(Block {
                        kind: kind.to_string(),
                        form: BlockForm::Nested,
                        start: nested.start,
                        end: nested.end,
                        src: nested.src,
                    }),
                    Err(err) => {
                        warn!("treating line {idx} as text: {err}");
                        self.notifier.notify(Notice::error(err.to_string(), "pipeline"));
                        None
                    }
                }
            } else {
                None
            };

            match block {
                Some(block) => {
                    if plain_start < idx {
                        segments.push(Segment::Markdown {
                            start: plain_start,
                            end: idx,
                        });
                    }
                    idx = block.end + 1;
                    plain_start = idx;
                    segments.push(Segment::Block(block));
                }
                None => idx += 1,
            }
        }

        if plain_start < lines.len() {
            segments.push(Segment::Markdown {
                start: plain_start,
                end: lines.len(),
            });
        }

        segments
    }

    fn fenced_block(&self, lines: &[&str], start: usize, fence: &str, kind: &str) -> Block {
        let close = fence_close(lines, start, fence);

        // An unterminated fence runs to the end of the document
        let (body_end, end) = match close {
            Some(close) => (close, close),
            None => (lines.len(), lines.len() - 1),
        };

        Block {
            kind: kind.to_string(),
            form: BlockForm::Fenced,
            start,
            end,
            src: lines[start + 1..body_end].join("\n"),
        }
    }

    /// Kind named by a nested marker line: the last `-` segment after the prefix
    fn marker_kind<'l>(&self, line: &'l str) -> Option<&'l str> {
        let rest = line.strip_prefix(self.marker_prefix.as_str())?;
        if rest.is_empty() || rest.contains(char::is_whitespace) {
            return None;
        }
        rest.rsplit('-').next()
    }
}

/// Split an opening code fence into its fence string and info string
fn code_fence(line: &str) -> Option<(&str, &str)> {
    let fence_char = line.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let fence_len = line.chars().take_while(|c| *c == fence_char).count();
    if fence_len < 3 {
        return None;
    }
    Some(line.split_at(fence_len))
}

/// Kind named by an `ad-<kind>` info string
fn admonition_kind(info: &str) -> Option<&str> {
    info.trim()
        .strip_prefix(FENCE_INFO_PREFIX)?
        .split_whitespace()
        .next()
}

/// Line closing the fence opened at `start`
fn fence_close(lines: &[&str], start: usize, fence: &str) -> Option<usize> {
    lines[start + 1..]
        .iter()
        .position(|line| is_fence_close(line, fence))
        .map(|offset| start + 1 + offset)
}

fn is_fence_close(line: &str, fence: &str) -> bool {
    let trimmed = line.trim();
    let Some(fence_char) = fence.chars().next() else {
        return false;
    };
    trimmed.len() >= fence.len() && trimmed.chars().all(|c| c == fence_char)
}
