//! Document model with Rope-based text storage

use anyhow::{Context, Result};
use ropey::Rope;
use std::fs;
use std::path::{Path, PathBuf};

/// A Markdown document loaded for rendering
#[derive(Clone, Debug)]
pub struct Document {
    pub path: Option<PathBuf>,
    pub rope: Rope,
}

impl Document {
    /// Load a document from a file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(Self {
            path: Some(path.to_path_buf()),
            rope: Rope::from_str(&content),
        })
    }

    /// Document backed by in-memory text
    pub fn from_text(text: &str) -> Self {
        Self {
            path: None,
            rope: Rope::from_str(text),
        }
    }

    /// Full document text
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Get the number of lines in the document
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Every line without its line terminator
    pub fn lines(&self) -> Vec<String> {
        self.rope.lines().map(|line| line_text(&line)).collect()
    }

    /// Extract lines as text (inclusive range)
    pub fn get_lines(&self, start: usize, end_inclusive: usize) -> String {
        let line_count = self.line_count();

        // Clamp to valid range
        let start = start.min(line_count.saturating_sub(1));
        let end = end_inclusive.min(line_count.saturating_sub(1));

        if start > end {
            return String::new();
        }

        (start..=end)
            .map(|idx| line_text(&self.rope.line(idx)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn line_text(line: &ropey::RopeSlice<'_>) -> String {
    let content: String = line.chunks().collect();
    content.trim_end_matches(['\n', '\r']).to_string()
}
