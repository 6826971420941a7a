//! Site build error types.

use std::path::PathBuf;

/// Error returned while loading or building the site.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Docs source directory is missing.
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// A document couldn't be read (including non-UTF-8 content).
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        /// Source file, relative to the docs directory.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Malformed YAML front matter.
    #[error("Invalid front matter in {}: {source}", .path.display())]
    Frontmatter {
        /// Source file, relative to the docs directory.
        path: PathBuf,
        /// YAML parse error.
        source: serde_yaml::Error,
    },

    /// Manifest serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two documents resolve to the same page path.
    #[error("Duplicate page path {path}: {} and {}", .first.display(), .second.display())]
    DuplicatePath {
        /// Page path claimed twice.
        path: String,
        /// First document claiming the path.
        first: PathBuf,
        /// Second document claiming the path.
        second: PathBuf,
    },
}
