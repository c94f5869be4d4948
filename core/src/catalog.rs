//! Catalog traversal over `{root}/{category}/{project}/{descriptor_file}`.
//!
//! Two policies share one walker:
//! - interactive: [`CatalogLoader::load_category`] loads a single category
//!   into a [`CategoryLoad`];
//! - flattened: [`CatalogLoader::load_flattened`] streams every project of
//!   every category into a [`CardSink`].
//!
//! Descriptor reads within a category run up to `max_concurrent_reads` at a
//! time and are always delivered in listing order.

use std::sync::Arc;

use futures::stream::{self, Stream, StreamExt};

use crate::config::{CatalogConfig, ShowcaseConfig};
use crate::content_source::{ContentSource, GithubContentSource};
use crate::descriptor::read_descriptor;
use crate::errors::{ConfigError, DescriptorReadError, DirectoryFetchError};
use crate::model::{CategoryEntry, DirEntry, ProjectDescriptor};
use crate::render::CardSink;

/// Result of loading one category under the interactive policy.
#[derive(Debug, Default)]
pub struct CategoryLoad {
    /// Successful descriptors, in listing order
    pub cards: Vec<ProjectDescriptor>,
    /// Per-project failures, already logged
    pub failures: Vec<DescriptorReadError>,
}

impl CardSink for CategoryLoad {
    fn append_card(&mut self, card: ProjectDescriptor) {
        self.cards.push(card);
    }

    fn record_failure(&mut self, error: DescriptorReadError) {
        self.failures.push(error);
    }

    fn fail(&mut self, _error: &DirectoryFetchError) {
        self.cards.clear();
    }
}

/// Counters from a completed flattened load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlattenedSummary {
    pub categories: usize,
    pub cards: usize,
    pub failures: usize,
}

/// Walks the catalog through a [`ContentSource`].
#[derive(Clone)]
pub struct CatalogLoader {
    source: Arc<dyn ContentSource>,
    config: CatalogConfig,
}

impl CatalogLoader {
    pub fn new(source: Arc<dyn ContentSource>, config: CatalogConfig) -> Self {
        Self { source, config }
    }

    /// Loader backed by the hosted contents API described by `config`.
    pub fn from_config(config: &ShowcaseConfig) -> Result<Self, ConfigError> {
        let source = GithubContentSource::new(&config.source)?;
        Ok(Self::new(Arc::new(source), config.catalog.clone()))
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Directories under the catalog root, in listing order.
    pub async fn list_categories(&self) -> Result<Vec<CategoryEntry>, DirectoryFetchError> {
        let entries = self.source.list_dir(&self.config.root).await?;
        Ok(entries
            .into_iter()
            .filter(DirEntry::is_dir)
            .map(CategoryEntry::from)
            .collect())
    }

    /// Project directories of one category, in listing order.
    pub async fn list_projects(
        &self,
        category_path: &str,
    ) -> Result<Vec<DirEntry>, DirectoryFetchError> {
        let entries = self.source.list_dir(category_path).await?;
        Ok(entries.into_iter().filter(DirEntry::is_dir).collect())
    }

    /// Interactive policy: every readable descriptor of one category.
    ///
    /// A listing failure aborts the category; descriptor failures are
    /// collected next to the successes.
    pub async fn load_category(
        &self,
        category_path: &str,
    ) -> Result<CategoryLoad, DirectoryFetchError> {
        let mut load = CategoryLoad::default();
        self.stream_category(category_path, &mut load).await?;

        tracing::info!(
            path = category_path,
            cards = load.cards.len(),
            failures = load.failures.len(),
            "category loaded"
        );
        Ok(load)
    }

    /// Flattened policy: every category, every project, one card per
    /// readable descriptor appended to `sink` as soon as it resolves.
    ///
    /// Any listing failure (root or category) calls [`CardSink::fail`] and
    /// stops the load.
    pub async fn load_flattened(
        &self,
        sink: &mut dyn CardSink,
    ) -> Result<FlattenedSummary, DirectoryFetchError> {
        let categories = match self.list_categories().await {
            Ok(categories) => categories,
            Err(error) => {
                tracing::error!(
                    path = error.path(),
                    status = ?error.status(),
                    error = %error,
                    "error fetching categories"
                );
                sink.fail(&error);
                return Err(error);
            }
        };

        let mut counting = CountingSink {
            inner: sink,
            summary: FlattenedSummary {
                categories: categories.len(),
                ..FlattenedSummary::default()
            },
        };

        for category in &categories {
            if let Err(error) = self.stream_category(&category.path, &mut counting).await {
                counting.inner.fail(&error);
                return Err(error);
            }
        }

        tracing::info!(
            categories = counting.summary.categories,
            cards = counting.summary.cards,
            failures = counting.summary.failures,
            "catalog loaded"
        );
        Ok(counting.summary)
    }

    async fn stream_category(
        &self,
        category_path: &str,
        sink: &mut dyn CardSink,
    ) -> Result<(), DirectoryFetchError> {
        let projects = match self.list_projects(category_path).await {
            Ok(projects) => projects,
            Err(error) => {
                tracing::error!(
                    path = category_path,
                    status = ?error.status(),
                    error = %error,
                    "error loading projects for category"
                );
                return Err(error);
            }
        };

        let mut reads = self.descriptor_reads(projects);
        while let Some((project, result)) = reads.next().await {
            match result {
                Ok(card) => sink.append_card(card),
                Err(error) => {
                    tracing::warn!(
                        project = %project.name,
                        path = error.path(),
                        error = %error.detail(),
                        "error fetching descriptor"
                    );
                    sink.record_failure(error);
                }
            }
        }
        Ok(())
    }

    /// Ordered stream of descriptor reads, at most `max_concurrent_reads`
    /// in flight.
    fn descriptor_reads(
        &self,
        projects: Vec<DirEntry>,
    ) -> impl Stream<Item = (DirEntry, Result<ProjectDescriptor, DescriptorReadError>)> + '_ {
        let limit = self.config.max_concurrent_reads.max(1);
        stream::iter(projects)
            .map(move |project| {
                let path = self.config.descriptor_path(&project.path);
                async move {
                    let result = read_descriptor(self.source.as_ref(), &path).await;
                    (project, result)
                }
            })
            .buffered(limit)
    }
}

/// Forwards to another sink while counting what passes through.
struct CountingSink<'a> {
    inner: &'a mut dyn CardSink,
    summary: FlattenedSummary,
}

impl CardSink for CountingSink<'_> {
    fn append_card(&mut self, card: ProjectDescriptor) {
        self.summary.cards += 1;
        self.inner.append_card(card);
    }

    fn record_failure(&mut self, error: DescriptorReadError) {
        self.summary.failures += 1;
        self.inner.record_failure(error);
    }

    fn fail(&mut self, error: &DirectoryFetchError) {
        self.inner.fail(error);
    }
}
