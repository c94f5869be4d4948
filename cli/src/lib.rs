//! `showcase` command line.
//!
//! ## Commands
//!
//! - `showcase categories` - print `name<TAB>path` per category
//! - `showcase browse` - interactive layout, first (or named) category selected
//! - `showcase render` - flattened layout, every project of every category
//!
//! ## Exit Codes
//! - 0: Success, including pages degraded to an error message
//! - 1: Requested category does not exist
//! - 2: Configuration or I/O error

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use showcase_core::ShowcaseConfig;

pub mod catalog_cmd;

pub const EXIT_OK: i32 = 0;
pub const EXIT_UNKNOWN_CATEGORY: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Render a repository-hosted project showcase as HTML cards
#[derive(Debug, Parser)]
#[command(name = "showcase", version)]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Overrides applied on top of the config file
#[derive(Debug, Default, Args)]
pub struct SourceArgs {
    /// Config file (default: $SHOWCASE_CONFIG or ~/.config/showcase/showcase.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Contents API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Repository owner
    #[arg(long, global = true)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long, global = true)]
    pub repo: Option<String>,

    /// Branch every read is pinned to
    #[arg(long, global = true)]
    pub branch: Option<String>,

    /// Descriptor reads in flight per category
    #[arg(long, global = true, value_name = "N")]
    pub max_concurrent_reads: Option<usize>,
}

impl SourceArgs {
    /// Load the config file and apply command-line overrides.
    pub fn resolve_config(&self) -> Result<ShowcaseConfig> {
        let mut config = match &self.config {
            Some(path) => ShowcaseConfig::load_from_path(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => ShowcaseConfig::load().context("failed to load config")?,
        };

        if let Some(api_base) = &self.api_base {
            config.source.api_base.clone_from(api_base);
        }
        if let Some(owner) = &self.owner {
            config.source.owner.clone_from(owner);
        }
        if let Some(repo) = &self.repo {
            config.source.repo.clone_from(repo);
        }
        if let Some(branch) = &self.branch {
            config.source.branch.clone_from(branch);
        }
        if let Some(limit) = self.max_concurrent_reads {
            config.catalog.max_concurrent_reads = limit;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the categories of the catalog
    Categories,

    /// Render the interactive layout: category list plus one category's cards
    Browse(catalog_cmd::BrowseArgs),

    /// Render the flattened layout: every project of every category
    Render(catalog_cmd::RenderArgs),
}

impl Cli {
    pub async fn run(self) -> i32 {
        match self.try_run().await {
            Ok(code) => code,
            Err(err) => {
                eprintln!("error: {err:#}");
                EXIT_ERROR
            }
        }
    }

    async fn try_run(self) -> Result<i32> {
        let config = self.source.resolve_config()?;
        tracing::debug!(
            owner = %config.source.owner,
            repo = %config.source.repo,
            branch = %config.source.branch,
            "configuration resolved"
        );

        match self.command {
            Command::Categories => catalog_cmd::run_categories(&config).await,
            Command::Browse(args) => catalog_cmd::run_browse(&config, args).await,
            Command::Render(args) => catalog_cmd::run_render(&config, args).await,
        }
    }
}
