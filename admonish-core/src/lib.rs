//! Admonish Core - Admonition parsing and rendering
//!
//! This crate contains the core logic for admonish, independent of any CLI concerns:
//! - Nested block extraction by marker line and indentation
//! - Keyword parameter parsing (title, collapse, icon, color)
//! - Block type registry and user-facing notices
//! - HTML element construction and the document pipeline
//! - Offset range checks for editor decorations
//! - Configuration management

pub mod config;
pub mod descriptor;
pub mod document;
pub mod extract;
pub mod notice;
pub mod params;
pub mod pipeline;
pub mod prefix;
pub mod ranges;
pub mod render;

// Re-export commonly used types
pub use config::Config;
pub use descriptor::{BlockType, Registry};
pub use document::Document;
pub use extract::{extract_block, ExtractError, NestedBlock};
pub use notice::{Notice, Notifier};
pub use params::{parse_parameters, Collapse, KeywordSet, Parameters};
pub use pipeline::Pipeline;
pub use prefix::matches_any;
pub use ranges::{ranges_include, Range};
