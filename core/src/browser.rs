//! Interactive catalog browser.
//!
//! Holds the page and the category selection. Every selection bumps a
//! generation counter and cancels the previous load's token; a load only
//! commits to the project container while its generation is current.

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::catalog::CatalogLoader;
use crate::render::{CATEGORIES_ERROR_MESSAGE, CardSink, CategoryPane, CategoryRow, Page};

/// Category selection state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    NoCategorySelected,
    CategorySelected(String),
}

/// What happened to one selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Cards were committed to the page.
    Loaded { cards: usize, failures: usize },
    /// The category listing failed; the page shows the error message.
    Failed,
    /// A newer selection started before this one finished.
    Superseded,
    /// No category row has the requested path.
    UnknownCategory,
}

struct BrowserState {
    page: Page,
    selection: Selection,
    generation: u64,
    in_flight: Option<CancellationToken>,
}

pub struct Browser {
    loader: CatalogLoader,
    state: Mutex<BrowserState>,
}

impl Browser {
    pub fn new(loader: CatalogLoader) -> Self {
        Self {
            loader,
            state: Mutex::new(BrowserState {
                page: Page::interactive(),
                selection: Selection::NoCategorySelected,
                generation: 0,
                in_flight: None,
            }),
        }
    }

    /// Page load: list categories, then auto-select the first one.
    ///
    /// Returns the outcome of the automatic selection, or `None` when there
    /// was nothing to select.
    pub async fn start(&self) -> Option<SelectOutcome> {
        let first = {
            let categories = self.loader.list_categories().await;
            let mut state = self.state.lock().await;
            match categories {
                Ok(categories) => {
                    let rows: Vec<CategoryRow> =
                        categories.into_iter().map(CategoryRow::from).collect();
                    let first = rows.first().map(|row| row.path.clone());
                    state.page.categories = Some(CategoryPane::Rows(rows));
                    first
                }
                Err(error) => {
                    tracing::error!(
                        path = error.path(),
                        status = ?error.status(),
                        error = %error,
                        "error fetching categories"
                    );
                    state.page.log(error.path(), error.to_string());
                    state.page.categories =
                        Some(CategoryPane::Message(CATEGORIES_ERROR_MESSAGE.to_string()));
                    None
                }
            }
        };

        match first {
            Some(path) => Some(self.select(&path).await),
            None => None,
        }
    }

    /// Select the category at `path`, clear the project container and load
    /// it from a fresh fetch. Re-selecting the active category reloads it.
    pub async fn select(&self, path: &str) -> SelectOutcome {
        let (generation, token) = {
            let mut state = self.state.lock().await;
            if !state.page.activate_category(path) {
                return SelectOutcome::UnknownCategory;
            }
            state.selection = Selection::CategorySelected(path.to_string());
            state.generation += 1;
            let token = CancellationToken::new();
            if let Some(previous) = state.in_flight.replace(token.clone()) {
                previous.cancel();
            }
            state.page.clear_projects();
            (state.generation, token)
        };

        tracing::debug!(path, generation, "category selected");

        let result = tokio::select! {
            _ = token.cancelled() => {
                tracing::debug!(path, generation, "category load cancelled");
                return SelectOutcome::Superseded;
            }
            result = self.loader.load_category(path) => result,
        };

        let mut state = self.state.lock().await;
        if state.generation != generation {
            tracing::debug!(path, generation, "discarding stale category load");
            return SelectOutcome::Superseded;
        }
        state.in_flight = None;

        match result {
            Ok(load) => {
                let outcome = SelectOutcome::Loaded {
                    cards: load.cards.len(),
                    failures: load.failures.len(),
                };
                state.page.clear_projects();
                for failure in load.failures {
                    state.page.record_failure(failure);
                }
                for card in load.cards {
                    state.page.append_card(card);
                }
                outcome
            }
            Err(error) => {
                state.page.fail(&error);
                SelectOutcome::Failed
            }
        }
    }

    /// Select by the category's display name.
    pub async fn select_by_name(&self, name: &str) -> SelectOutcome {
        let path = {
            let state = self.state.lock().await;
            state
                .page
                .category_rows()
                .iter()
                .find(|row| row.name == name)
                .map(|row| row.path.clone())
        };

        match path {
            Some(path) => self.select(&path).await,
            None => SelectOutcome::UnknownCategory,
        }
    }

    /// Snapshot of the page.
    pub async fn page(&self) -> Page {
        self.state.lock().await.page.clone()
    }

    pub async fn selection(&self) -> Selection {
        self.state.lock().await.selection.clone()
    }

    pub async fn generation(&self) -> u64 {
        self.state.lock().await.generation
    }
}
