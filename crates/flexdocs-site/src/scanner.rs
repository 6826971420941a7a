//! Document discovery by filesystem walking.
//!
//! The scanner only finds Markdown files; reading and parsing them is left
//! to the builder so documents can be processed in parallel.

use std::fs;
use std::path::{Path, PathBuf};

/// Reference to one Markdown source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DocumentRef {
    /// Path relative to the source directory (e.g. `guides/setup.md`).
    pub rel_path: PathBuf,
    /// Absolute path for reading.
    pub abs_path: PathBuf,
}

/// Discovers Markdown documents under a source directory.
pub(crate) struct Scanner {
    source_dir: PathBuf,
}

impl Scanner {
    /// Create a new Scanner rooted at `source_dir`.
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Scan the source directory, sorted by relative path.
    ///
    /// Hidden files and directories are skipped. Returns an empty Vec if the
    /// source directory doesn't exist.
    pub fn scan(&self) -> Vec<DocumentRef> {
        let mut refs = Vec::new();
        if self.source_dir.exists() {
            self.scan_directory(&self.source_dir, Path::new(""), &mut refs);
        }
        refs.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        refs
    }

    fn scan_directory(&self, dir_path: &Path, rel_prefix: &Path, refs: &mut Vec<DocumentRef>) {
        let entries = match fs::read_dir(dir_path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %dir_path.display(), error = %e, "Failed to read directory");
                return;
            }
        };

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name();
            if name.to_string_lossy().starts_with('.') {
                continue;
            }

            let path = entry.path();
            let rel_path = rel_prefix.join(&name);
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());

            if is_dir {
                self.scan_directory(&path, &rel_path, refs);
            } else if path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
            {
                refs.push(DocumentRef {
                    rel_path,
                    abs_path: path,
                });
            }
        }
    }
}
