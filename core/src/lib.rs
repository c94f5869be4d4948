//! Repository-backed project showcase.
//!
//! Lists the categories and projects stored as directories in a remote
//! repository, read through the hosted "repository contents" API, and
//! renders one card per project descriptor (`info.json`).
//!
//! - [`content_source`]: the API client behind the `ContentSource` trait
//! - [`catalog`]: directory walk with interactive and flattened policies
//! - [`browser`]: category selection state with stale-load discarding
//! - [`render`]: page model and HTML output

#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod browser;
pub mod catalog;
pub mod config;
pub mod content_source;
pub mod descriptor;
pub mod errors;
pub mod model;
pub mod render;


pub use browser::{Browser, SelectOutcome, Selection};
pub use catalog::{CatalogLoader, CategoryLoad, FlattenedSummary};
pub use config::{CatalogConfig, ShowcaseConfig, SourceConfig};
pub use content_source::{ContentSource, GithubContentSource};
pub use descriptor::{decode_descriptor, encode_descriptor, read_descriptor};
pub use errors::{ConfigError, DescriptorReadError, DirectoryFetchError};
pub use model::{CategoryEntry, DirEntry, EntryKind, FileEnvelope, ProjectDescriptor};
pub use render::{
    CATEGORIES_ERROR_MESSAGE, CardSink, CategoryPane, CategoryRow, Diagnostic, PROJECTS_ERROR_MESSAGE,
    Page, ProjectsPane,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
