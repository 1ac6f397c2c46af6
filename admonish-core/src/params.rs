//! Leading `keyword: value` parameters of an admonition body

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::descriptor::BlockType;
use crate::notice::{Notice, Notifier};
use crate::prefix::matches_any;

/// Warning shown when a collapsible block had its title blanked
pub const BLANK_COLLAPSIBLE_TITLE: &str = "An admonition must have a title if it is collapsible.";

/// Collapse state of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collapse {
    /// Not collapsible
    None,
    /// Collapsible, initially expanded
    Open,
    /// Collapsible, initially collapsed
    Closed,
}

impl Collapse {
    /// Normalize a raw `collapse:` value.
    ///
    /// `none` and `open` are taken as written and anything unrecognized
    /// collapses the block. An empty value is the one exception to that
    /// fallback: it maps to `None`, the same as a block with no `collapse:`
    /// line, rather than to `Closed`.
    pub fn from_value(value: &str) -> Self {
        match value {
            "" | "none" => Collapse::None,
            "open" => Collapse::Open,
            _ => Collapse::Closed,
        }
    }

    pub fn is_collapsible(self) -> bool {
        self != Collapse::None
    }

    fn as_str(&self) -> &'static str {
        match self {
            Collapse::None => "none",
            Collapse::Open => "open",
            Collapse::Closed => "closed",
        }
    }
}

impl fmt::Display for Collapse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter a keyword line sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Title,
    Collapse,
    Icon,
    Color,
}

/// Named keyword sets selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeywordVariant {
    Basic,
    #[default]
    Extended,
}

/// Ordered `(token, field)` pairs recognized at the top of a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    tokens: Vec<String>,
    fields: Vec<Field>,
}

impl KeywordSet {
    pub fn new<I, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, Field)>,
        T: Into<String>,
    {
        let (tokens, fields) = pairs
            .into_iter()
            .map(|(token, field)| (token.into(), field))
            .unzip();
        Self { tokens, fields }
    }

    /// `title:` and `collapse:`
    pub fn basic() -> Self {
        Self::new([("title:", Field::Title), ("collapse:", Field::Collapse)])
    }

    /// `title:`, `collapse:`, `icon:` and `color:`
    pub fn extended() -> Self {
        Self::new([
            ("title:", Field::Title),
            ("collapse:", Field::Collapse),
            ("icon:", Field::Icon),
            ("color:", Field::Color),
        ])
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    /// Find the keyword a line starts with
    fn classify<'a>(&self, line: &'a str) -> Option<(Field, &'a str)> {
        let index = matches_any(line, &self.tokens)?;
        Some((self.fields[index], &line[self.tokens[index].len()..]))
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::extended()
    }
}

impl From<KeywordVariant> for KeywordSet {
    fn from(variant: KeywordVariant) -> Self {
        match variant {
            KeywordVariant::Basic => Self::basic(),
            KeywordVariant::Extended => Self::extended(),
        }
    }
}

/// Parameters resolved from a block body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    pub title: Option<String>,
    pub collapse: Option<Collapse>,
    pub icon: Option<String>,
    pub color: Option<String>,
    /// Body with the keyword lines removed
    pub content: String,
}

/// Values exactly as written, before defaults and validation
#[derive(Debug, Default)]
struct RawParameters {
    title: Option<String>,
    collapse: Option<String>,
    icon: Option<String>,
    color: Option<String>,
}

impl RawParameters {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Title => &mut self.title,
            Field::Collapse => &mut self.collapse,
            Field::Icon => &mut self.icon,
            Field::Color => &mut self.color,
        }
    }
}

/// Split a block body into its parameters and content.
///
/// Keyword lines are read from the top until a line matches no keyword or
/// repeats one already seen; everything from there on is content.
pub fn parse_parameters(
    kind: &str,
    src: &str,
    block_type: &BlockType,
    keywords: &KeywordSet,
    notifier: &dyn Notifier,
) -> Parameters {
    let lines: Vec<&str> = src.split('\n').collect();

    let mut raw = RawParameters::default();
    let mut consumed = 0;
    for line in &lines {
        let Some((field, value)) = keywords.classify(line) else {
            break;
        };
        let slot = raw.slot(field);
        if slot.is_some() {
            break;
        }
        *slot = Some(value.trim().to_string());
        consumed += 1;
    }

    let content = lines[consumed..].join("\n");

    // Typed defaults
    let collapse = raw.collapse.as_deref().map(Collapse::from_value);
    let mut title = match raw.title {
        Some(title) => Some(title),
        None if block_type.no_default_title => None,
        None => Some(block_type.default_title(kind)),
    };

    // Cross-field validation
    let blank_title = title.as_deref().is_some_and(|t| t.trim().is_empty());
    if blank_title && collapse.is_some_and(Collapse::is_collapsible) {
        title = Some(block_type.default_title(kind));
        notifier.notify(Notice::warning(BLANK_COLLAPSIBLE_TITLE, "params"));
    }

    Parameters {
        title,
        collapse,
        icon: raw.icon,
        color: raw.color,
        content,
    }
}
