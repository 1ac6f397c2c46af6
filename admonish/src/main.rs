//! Admonish - Render Markdown documents with admonition callouts to HTML

use admonish_core::params::KeywordVariant;
use admonish_core::{Config, Document, KeywordSet, Pipeline};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Render Markdown with admonitions to HTML
#[derive(Parser, Debug)]
#[command(name = "admonish")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to markdown file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Config file to use instead of the platform default
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Keyword lines recognized at the top of a block
    #[arg(short, long, value_enum)]
    keywords: Option<Keywords>,

    /// Write HTML here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// List the admonitions found instead of rendering
    #[arg(long)]
    list: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Keywords {
    Basic,
    Extended,
}

impl From<Keywords> for KeywordVariant {
    fn from(keywords: Keywords) -> Self {
        match keywords {
            Keywords::Basic => KeywordVariant::Basic,
            Keywords::Extended => KeywordVariant::Extended,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    // Load configuration
    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    // Load document
    let doc = Document::load(&args.file)
        .with_context(|| format!("Failed to load document: {}", args.file.display()))?;

    let mut pipeline = Pipeline::from_config(&config);
    if let Some(keywords) = args.keywords {
        pipeline = pipeline.with_keywords(KeywordSet::from(KeywordVariant::from(keywords)));
    }

    let text = doc.text();
    let output = if args.list {
        pipeline
            .blocks(&text)
            .iter()
            .map(|block| format!("{}-{}\t{:?}\t{}\n", block.start + 1, block.end + 1, block.form, block.kind))
            .collect::<String>()
    } else {
        pipeline.render(&text)
    };
    log::debug!("rendered {} lines from {}", doc.line_count(), args.file.display());

    match &args.output {
        Some(path) => std::fs::write(path, output)
            .with_context(|| format!("Failed to write output: {}", path.display()))?,
        None => print!("{output}"),
    }

    Ok(())
}
