//! Page model and HTML rendering.
//!
//! `Page` stands in for the browser document: a category list (interactive
//! layout only), a project container, and the diagnostics console. The
//! console is never rendered into HTML.

use crate::errors::{DescriptorReadError, DirectoryFetchError};
use crate::model::{CategoryEntry, ProjectDescriptor};

pub const CATEGORIES_ERROR_MESSAGE: &str = "Error loading categories.";
pub const PROJECTS_ERROR_MESSAGE: &str = "Error loading projects. See console for details.";
pub const LINK_TEXT: &str = "View Project";

/// Receives catalog results as they resolve.
///
/// Loads hold the sink across awaits, so sinks must be `Send` for the load
/// to run on a spawned task.
pub trait CardSink: Send {
    /// A descriptor was read successfully.
    fn append_card(&mut self, card: ProjectDescriptor);

    /// A single descriptor could not be read; siblings continue.
    fn record_failure(&mut self, error: DescriptorReadError);

    /// A directory level could not be listed; the load stops here.
    fn fail(&mut self, error: &DirectoryFetchError);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    pub name: String,
    pub path: String,
    pub active: bool,
}

impl From<CategoryEntry> for CategoryRow {
    fn from(entry: CategoryEntry) -> Self {
        Self {
            name: entry.name,
            path: entry.path,
            active: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryPane {
    Rows(Vec<CategoryRow>),
    Message(String),
}

impl Default for CategoryPane {
    fn default() -> Self {
        Self::Rows(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectsPane {
    Cards(Vec<ProjectDescriptor>),
    Message(String),
}

impl Default for ProjectsPane {
    fn default() -> Self {
        Self::Cards(Vec::new())
    }
}

/// Console entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    /// `None` for the flattened layout, which has no category list.
    pub categories: Option<CategoryPane>,
    pub projects: ProjectsPane,
    pub diagnostics: Vec<Diagnostic>,
}

impl Page {
    pub fn interactive() -> Self {
        Self {
            categories: Some(CategoryPane::default()),
            ..Self::default()
        }
    }

    pub fn flattened() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[ProjectDescriptor] {
        match &self.projects {
            ProjectsPane::Cards(cards) => cards,
            ProjectsPane::Message(_) => &[],
        }
    }

    pub fn projects_message(&self) -> Option<&str> {
        match &self.projects {
            ProjectsPane::Message(message) => Some(message),
            ProjectsPane::Cards(_) => None,
        }
    }

    pub fn category_rows(&self) -> &[CategoryRow] {
        match &self.categories {
            Some(CategoryPane::Rows(rows)) => rows,
            _ => &[],
        }
    }

    pub fn categories_message(&self) -> Option<&str> {
        match &self.categories {
            Some(CategoryPane::Message(message)) => Some(message),
            _ => None,
        }
    }

    pub fn active_category(&self) -> Option<&CategoryRow> {
        self.category_rows().iter().find(|row| row.active)
    }

    /// Mark the row for `path` active and every other row inactive.
    /// Returns false when no row has that path.
    pub fn activate_category(&mut self, path: &str) -> bool {
        let Some(CategoryPane::Rows(rows)) = &mut self.categories else {
            return false;
        };
        if !rows.iter().any(|row| row.path == path) {
            return false;
        }
        for row in rows.iter_mut() {
            row.active = row.path == path;
        }
        true
    }

    pub fn clear_projects(&mut self) {
        self.projects = ProjectsPane::default();
    }

    pub fn log(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            path: path.into(),
            message: message.into(),
        });
    }

    /// Render the whole document.
    pub fn to_html(&self, title: &str) -> String {
        let mut lines = vec![
            "<!DOCTYPE html>".to_string(),
            "<html lang=\"en\">".to_string(),
            "<head>".to_string(),
            "  <meta charset=\"utf-8\">".to_string(),
            format!("  <title>{}</title>", escape_html(title)),
            "</head>".to_string(),
            "<body>".to_string(),
            format!("  <h1>{}</h1>", escape_html(title)),
        ];

        match &self.categories {
            None => {}
            Some(CategoryPane::Rows(rows)) => {
                lines.push("  <ul id=\"categories-list\">".to_string());
                for row in rows {
                    lines.push(format!("    {}", render_category_row(row)));
                }
                lines.push("  </ul>".to_string());
            }
            Some(CategoryPane::Message(message)) => {
                lines.push(format!(
                    "  <ul id=\"categories-list\"><p>{}</p></ul>",
                    escape_html(message)
                ));
            }
        }

        lines.push("  <section id=\"projects-container\">".to_string());
        match &self.projects {
            ProjectsPane::Cards(cards) => {
                for card in cards {
                    for line in render_card(card).lines() {
                        lines.push(format!("    {line}"));
                    }
                }
            }
            ProjectsPane::Message(message) => {
                lines.push(format!("    <p>{}</p>", escape_html(message)));
            }
        }
        lines.push("  </section>".to_string());

        lines.push("</body>".to_string());
        lines.push("</html>".to_string());
        lines.join("\n")
    }
}

impl CardSink for Page {
    fn append_card(&mut self, card: ProjectDescriptor) {
        match &mut self.projects {
            ProjectsPane::Cards(cards) => cards.push(card),
            ProjectsPane::Message(_) => self.projects = ProjectsPane::Cards(vec![card]),
        }
    }

    fn record_failure(&mut self, error: DescriptorReadError) {
        self.log(error.path(), error.detail());
    }

    fn fail(&mut self, error: &DirectoryFetchError) {
        self.log(error.path(), error.to_string());
        self.projects = ProjectsPane::Message(PROJECTS_ERROR_MESSAGE.to_string());
    }
}

/// Escape HTML special characters so the text renders verbatim.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn render_card(card: &ProjectDescriptor) -> String {
    [
        "<article class=\"project-card\">".to_string(),
        format!("  <h3>{}</h3>", escape_html(&card.name)),
        format!("  <p>{}</p>", escape_html(&card.description)),
        format!(
            "  <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{LINK_TEXT}</a>",
            escape_html(&card.url)
        ),
        "</article>".to_string(),
    ]
    .join("\n")
}

pub fn render_category_row(row: &CategoryRow) -> String {
    let class = if row.active { " class=\"active\"" } else { "" };
    format!(
        "<li data-path=\"{}\"{class}>{}</li>",
        escape_html(&row.path),
        escape_html(&row.name)
    )
}
