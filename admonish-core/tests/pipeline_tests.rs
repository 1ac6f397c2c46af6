//! Integration tests for admonish-core
//!
//! These tests run whole documents through the pipeline, from loading to HTML.

use admonish_core::config::Config;
use admonish_core::notice::{NoticeLevel, NoticeLog};
use admonish_core::params::BLANK_COLLAPSIBLE_TITLE;
use admonish_core::pipeline::BlockForm;
use admonish_core::{extract_block, Document, Pipeline};
use std::io::Write as _;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Helper to load a document from a temp file
fn create_test_doc(content: &str) -> (Document, NamedTempFile) {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write test content");
    file.flush().expect("Failed to flush");

    let doc = Document::load(file.path()).expect("Failed to load test document");
    (doc, file)
}

#[test]
fn integration_render_loaded_document() {
    let content = "# Notes\n\n```ad-warning\ntitle: Heads up\ncollapse: closed\nMind the gap.\n```\n\nDone.\n";
    let (doc, _file) = create_test_doc(content);

    let html = Pipeline::new().render(&doc.text());

    assert!(html.starts_with("<h1>Notes</h1>\n"));
    assert!(html.contains("<details class=\"admonition admonition-warning\" style=\"--admonition-color: 255, 145, 0;\">"));
    assert!(html.contains("<div class=\"admonition-title-markdown\">Heads up</div>"));
    assert!(html.contains("fa fa-exclamation-triangle"));
    assert!(html.contains("<p>Mind the gap.</p>"));
    assert!(html.trim_end().ends_with("<p>Done.</p>"));
}

#[test]
fn integration_nested_markers_inside_fenced_block() {
    let content = "```ad-note
title: Outer
Intro
!!! ad-tip
    title: Middle
    Middle body
    !!! ad-bug
        Deepest
Outro
```
";
    let html = Pipeline::new().render(content);

    let note = html.find("admonition-note").expect("outer block");
    let tip = html.find("admonition-tip").expect("middle block");
    let bug = html.find("admonition-bug").expect("inner block");
    assert!(note < tip && tip < bug);

    assert!(html.contains(">Middle</div>"));
    // The innermost block falls back to its capitalized kind
    assert!(html.contains(">Bug</div>"));
    assert!(html.contains("<p>Deepest</p>"));
    assert!(html.contains("<p>Outro</p>"));
}

#[test]
fn integration_blank_collapsible_title_warns_once() {
    let log = Arc::new(NoticeLog::new());
    let pipeline = Pipeline::new().with_notifier(log.clone());

    let html = pipeline.render("```ad-note\ntitle:\ncollapse: open\nBody text\n```\n");

    assert!(html.contains(" open>"));
    assert!(html.contains(">Note</div>"));

    let notices = log.drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Warning);
    assert_eq!(notices[0].message, BLANK_COLLAPSIBLE_TITLE);
}

#[test]
fn integration_config_drives_pipeline() {
    let mut config_file = NamedTempFile::new().expect("Failed to create temp file");
    config_file
        .write_all(
            b"keywords = \"Basic\"\nmarker_prefix = \"::: \"\n\n[indentation]\nallow_blank_lines = true\n\n[types.aside]\nno_default_title = true\ncolor = \"1, 2, 3\"\n",
        )
        .expect("Failed to write config");
    config_file.flush().expect("Failed to flush");

    let config = Config::load_from(config_file.path()).expect("Failed to load config");
    let pipeline = Pipeline::from_config(&config);

    let text = "::: aside\n    icon: star\n\n    Second paragraph\nAfter\n";
    let blocks = pipeline.blocks(text);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].form, BlockForm::Nested);
    assert_eq!((blocks[0].start, blocks[0].end), (0, 3));

    let html = pipeline.render(text);
    assert!(html.contains("style=\"--admonition-color: 1, 2, 3;\""));
    assert!(html.contains("admonition-title no-title"));
    // Basic keywords leave the icon line in the body
    assert!(html.contains("<p>icon: star</p>"));
    assert!(html.contains("<p>Second paragraph</p>"));
}

#[test]
fn integration_sequential_extraction_walks_document() {
    let doc = Document::from_text(
        "!!! ad-note\n  first\n  more\ntext\n!!! ad-note\n\tsecond\n!!! ad-note\n",
    );
    let lines = doc.lines();

    let mut from = 0;
    let mut found = Vec::new();
    while let Ok(block) = extract_block(&lines, from, "!!! ad-note") {
        assert!(block.end >= block.start);
        assert_eq!(lines[block.start], "!!! ad-note");
        from = block.end + 1;
        found.push((block.start, block.end, block.src));
    }

    assert_eq!(
        found,
        vec![
            (0, 2, "first\nmore".to_string()),
            (4, 5, "second".to_string()),
            (6, 6, String::new()),
        ]
    );
}
