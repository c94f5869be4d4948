//! Wire and domain types for the repository contents API.

use serde::{Deserialize, Deserializer, Serialize};

/// Entry discriminator from a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
    /// `symlink`, `submodule`, or anything else the host reports.
    Other(String),
}

impl EntryKind {
    pub fn parse(value: &str) -> Self {
        match value {
            "dir" => Self::Dir,
            "file" => Self::File,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Dir => "dir",
            Self::File => "file",
            Self::Other(value) => value,
        }
    }
}

impl<'de> Deserialize<'de> for EntryKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

impl Serialize for EntryKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// One element of a directory listing. Extra fields the host sends
/// (`sha`, `size`, `html_url`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn dir(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: EntryKind::Dir,
        }
    }

    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: EntryKind::File,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// A directory under the categories root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryEntry {
    pub name: String,
    pub path: String,
}

impl From<DirEntry> for CategoryEntry {
    fn from(entry: DirEntry) -> Self {
        Self {
            name: entry.name,
            path: entry.path,
        }
    }
}

/// Parsed `info.json` of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    pub name: String,
    pub description: String,
    pub url: String,
}

/// Single-file response from the contents API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileEnvelope {
    /// Base64 payload, possibly wrapped with newlines.
    pub content: String,
    #[serde(default)]
    pub encoding: Option<String>,
}

impl FileEnvelope {
    pub fn base64(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            encoding: Some("base64".to_string()),
        }
    }
}
