//! Block type descriptors and the registry of known admonition types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where an icon comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconKind {
    FontAwesome,
    Rpg,
    Image,
}

/// An icon reference attached to a block type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconDefinition {
    pub name: String,
    pub kind: IconKind,
}

impl IconDefinition {
    pub fn font_awesome(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: IconKind::FontAwesome,
        }
    }
}

/// Per-type settings consulted while parsing and rendering a block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockType {
    /// Leave the title unset when the block has no `title:` line
    pub no_default_title: bool,
    /// Title used instead of the capitalized type name
    pub display_name: Option<String>,
    /// CSS color triple, e.g. "68, 138, 255"
    pub color: Option<String>,
    pub icon: Option<IconDefinition>,
}

impl BlockType {
    fn builtin(color: &str, icon: &str) -> Self {
        Self {
            color: Some(color.to_string()),
            icon: Some(IconDefinition::font_awesome(icon)),
            ..Self::default()
        }
    }

    /// Title used when a block does not supply one
    pub fn default_title(&self, kind: &str) -> String {
        match &self.display_name {
            Some(name) => name.clone(),
            None => capitalize(kind),
        }
    }
}

/// Upper-case the first character and lower-case the rest
pub fn capitalize(kind: &str) -> String {
    let mut chars = kind.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// (kinds, color, icon) for the types every registry starts with
const BUILTIN_TYPES: [(&[&str], &str, &str); 12] = [
    (&["note", "seealso"], "68, 138, 255", "pencil-alt"),
    (&["abstract", "summary", "tldr"], "0, 176, 255", "clipboard-list"),
    (&["info", "todo"], "0, 184, 212", "info-circle"),
    (&["tip", "hint", "important"], "0, 191, 165", "fire"),
    (&["success", "check", "done"], "0, 200, 83", "check-circle"),
    (&["question", "help", "faq"], "100, 221, 23", "question-circle"),
    (&["warning", "caution", "attention"], "255, 145, 0", "exclamation-triangle"),
    (&["failure", "fail", "missing"], "255, 82, 82", "times-circle"),
    (&["danger", "error"], "255, 23, 68", "bolt"),
    (&["bug"], "245, 0, 87", "bug"),
    (&["example"], "124, 77, 255", "list-ol"),
    (&["quote", "cite"], "158, 158, 158", "quote-right"),
];

/// Lookup table from block type tag to its descriptor
#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: HashMap<String, BlockType>,
    fallback: BlockType,
}

impl Registry {
    /// An empty registry; every kind resolves to the fallback descriptor
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the standard admonition types
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (kinds, color, icon) in BUILTIN_TYPES {
            for kind in kinds {
                registry.insert(*kind, BlockType::builtin(color, icon));
            }
        }
        registry
    }

    /// Add or replace the descriptor for a kind
    pub fn insert(&mut self, kind: impl Into<String>, block_type: BlockType) {
        self.types.insert(kind.into().to_lowercase(), block_type);
    }

    /// Whether the kind was registered explicitly
    pub fn contains(&self, kind: &str) -> bool {
        self.types.contains_key(&kind.to_lowercase())
    }

    /// Descriptor for a kind, falling back to the default descriptor
    pub fn get(&self, kind: &str) -> &BlockType {
        self.types
            .get(&kind.to_lowercase())
            .unwrap_or(&self.fallback)
    }

    /// Merge descriptors over the current ones
    pub fn extend<I, K>(&mut self, types: I)
    where
        I: IntoIterator<Item = (K, BlockType)>,
        K: Into<String>,
    {
        for (kind, block_type) in types {
            self.insert(kind, block_type);
        }
    }
}
