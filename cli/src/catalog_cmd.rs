//! Catalog commands: `categories`, `browse`, `render`.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use showcase_core::{
    Browser, CATEGORIES_ERROR_MESSAGE, CardSink, CatalogLoader, DescriptorReadError,
    DirectoryFetchError, PROJECTS_ERROR_MESSAGE, Page, ProjectDescriptor, SelectOutcome,
    ShowcaseConfig,
};

use crate::{EXIT_OK, EXIT_UNKNOWN_CATEGORY};

#[derive(Debug, Parser)]
pub struct BrowseArgs {
    /// Category to select instead of the first one (display name)
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,

    /// Write the HTML document here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Parser)]
pub struct RenderArgs {
    /// Write the HTML document here instead of stdout
    #[arg(short, long, value_name = "FILE", conflicts_with = "stream")]
    pub output: Option<PathBuf>,

    /// Print one JSON line per card as soon as it resolves
    #[arg(long)]
    pub stream: bool,
}

fn page_title(config: &ShowcaseConfig) -> String {
    format!("{}/{}", config.source.owner, config.source.repo)
}

fn write_document(output: Option<&PathBuf>, html: &str) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, format!("{html}\n"))
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            println!("{html}");
            Ok(())
        }
    }
}

pub async fn run_categories(config: &ShowcaseConfig) -> Result<i32> {
    let loader = CatalogLoader::from_config(config)?;

    match loader.list_categories().await {
        Ok(categories) => {
            for category in categories {
                println!("{}\t{}", category.name, category.path);
            }
        }
        Err(error) => {
            tracing::error!(path = error.path(), error = %error, "error fetching categories");
            println!("{CATEGORIES_ERROR_MESSAGE}");
        }
    }
    Ok(EXIT_OK)
}

pub async fn run_browse(config: &ShowcaseConfig, args: BrowseArgs) -> Result<i32> {
    let browser = Browser::new(CatalogLoader::from_config(config)?);
    browser.start().await;

    // Without a category list there is nothing to match the name against;
    // the degraded page is still the result.
    let listed = browser.page().await.categories_message().is_none();
    if let Some(name) = &args.category
        && listed
        && browser.select_by_name(name).await == SelectOutcome::UnknownCategory
    {
        let page = browser.page().await;
        let known: Vec<&str> = page
            .category_rows()
            .iter()
            .map(|row| row.name.as_str())
            .collect();
        eprintln!(
            "error: no category named '{name}' (available: {})",
            known.join(", ")
        );
        return Ok(EXIT_UNKNOWN_CATEGORY);
    }

    let page = browser.page().await;
    write_document(args.output.as_ref(), &page.to_html(&page_title(config)))?;
    Ok(EXIT_OK)
}

pub async fn run_render(config: &ShowcaseConfig, args: RenderArgs) -> Result<i32> {
    let loader = CatalogLoader::from_config(config)?;

    if args.stream {
        let mut sink = JsonLinesSink {
            out: std::io::stdout(),
            error: None,
        };
        // Listing failures are already reported through the sink.
        let _ = loader.load_flattened(&mut sink).await;
        if let Some(error) = sink.error {
            return Err(error).context("failed to write to stdout");
        }
        return Ok(EXIT_OK);
    }

    let mut page = Page::flattened();
    let _ = loader.load_flattened(&mut page).await;
    write_document(args.output.as_ref(), &page.to_html(&page_title(config)))?;
    Ok(EXIT_OK)
}

/// Streams cards to a writer as newline-delimited JSON.
struct JsonLinesSink<W: Write> {
    out: W,
    /// First write failure; later writes are skipped.
    error: Option<std::io::Error>,
}

impl<W: Write> JsonLinesSink<W> {
    fn write_line(&mut self, value: &serde_json::Value) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{value}").and_then(|()| self.out.flush()) {
            self.error = Some(e);
        }
    }
}

impl<W: Write + Send> CardSink for JsonLinesSink<W> {
    fn append_card(&mut self, card: ProjectDescriptor) {
        self.write_line(&json!(card));
    }

    fn record_failure(&mut self, _error: DescriptorReadError) {
        // Logged by the loader; per-project failures are not part of the output.
    }

    fn fail(&mut self, _error: &DirectoryFetchError) {
        self.write_line(&json!({ "error": PROJECTS_ERROR_MESSAGE }));
    }
}
