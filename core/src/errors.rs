//! Showcase error types
//!
//! Two failure scopes drive how the page degrades:
//! - per-level failures (`DirectoryFetchError`) abort the level being loaded
//!   and replace its container with a generic message;
//! - per-item failures (`DescriptorReadError`) are logged and the project is
//!   left out, siblings keep loading.

use std::path::PathBuf;

use thiserror::Error;

/// Listing a directory through the content source failed.
#[derive(Debug, Clone, Error)]
pub enum DirectoryFetchError {
    #[error("failed to fetch directory {path}: {status} {status_text}")]
    Status {
        path: String,
        status: u16,
        status_text: String,
    },

    #[error("failed to fetch directory {path}: {message}")]
    Transport { path: String, message: String },

    #[error("unexpected listing for directory {path}: {message}")]
    Malformed { path: String, message: String },
}

impl DirectoryFetchError {
    pub fn path(&self) -> &str {
        match self {
            Self::Status { path, .. } | Self::Transport { path, .. } | Self::Malformed { path, .. } => {
                path
            }
        }
    }

    /// HTTP status, when the failure came from a non-success response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Reading one project descriptor failed at some stage.
#[derive(Debug, Error)]
pub enum DescriptorReadError {
    #[error("failed to fetch file {path}: {status} {status_text}")]
    Status {
        path: String,
        status: u16,
        status_text: String,
    },

    #[error("failed to fetch file {path}: {message}")]
    Transport { path: String, message: String },

    #[error("unexpected file envelope for {path}: {message}")]
    Envelope { path: String, message: String },

    #[error("descriptor {path} is not valid base64")]
    Decode {
        path: String,
        #[source]
        source: base64::DecodeError,
    },

    #[error("descriptor {path} is not a valid project descriptor")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DescriptorReadError {
    pub fn path(&self) -> &str {
        match self {
            Self::Status { path, .. }
            | Self::Transport { path, .. }
            | Self::Envelope { path, .. }
            | Self::Decode { path, .. }
            | Self::Parse { path, .. } => path,
        }
    }

    /// Message including the underlying cause, suitable for the diagnostics log.
    pub fn detail(&self) -> String {
        match self {
            Self::Decode { source, .. } => format!("{self}: {source}"),
            Self::Parse { source, .. } => format!("{self}: {source}"),
            _ => self.to_string(),
        }
    }
}

/// Loading or validating `showcase.toml` failed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse {
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}
