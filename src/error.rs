//! Fatal build errors
//!
//! Malformed content never ends up here: bad frontmatter and bad dates
//! degrade in place. Only inputs a page cannot be built without are fatal.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Template not found: {name} (looked in {path:?})")]
    MissingTemplate { name: String, path: PathBuf },

    #[error("Required content file not found: {path:?}")]
    MissingContent { path: PathBuf },

    #[error("Refusing to clear output directory {path:?}: it contains site inputs")]
    UnsafeOutput { path: PathBuf },

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl FolioError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
