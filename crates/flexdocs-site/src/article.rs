//! Article metadata derived from one Markdown document.

use std::path::{Component, Path, PathBuf};

use flexdocs_config::TocConfig;
use flexdocs_toc::{Outline, OutlineLink, SluggedHeading, assign_ids, build_outline, extract_headings};
use serde::Serialize;

use crate::error::SiteError;
use crate::frontmatter::{Frontmatter, split_frontmatter};

/// Average reading speed used for reading time estimates.
const WORDS_PER_MINUTE: usize = 200;

/// Metadata of one article page.
#[derive(Clone, Debug, Serialize)]
pub struct Article {
    /// Page path, always with leading and trailing slash (`/guides/setup/`).
    pub path: String,
    /// Source file, relative to the docs directory.
    pub source: PathBuf,
    /// Article title.
    pub title: String,
    /// Category from front matter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Last update date from front matter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    /// Lead paragraph from front matter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress: Option<String>,
    /// Skills from front matter.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    /// Estimated reading time.
    pub reading_time_minutes: u32,
    /// Every heading of the document with its anchor id.
    pub headings: Vec<SluggedHeading>,
    /// Outline for the persistent side navigation.
    pub side_outline: Outline,
    /// Outline for the inline "on this page" list, if enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_outline: Option<Outline>,
}

impl Article {
    /// Build article metadata from a Markdown source.
    ///
    /// # Arguments
    ///
    /// * `rel_path` - Source file path relative to the docs directory
    /// * `source` - Full file content including front matter
    /// * `toc` - Outline cutoffs
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Frontmatter` if the front matter is malformed.
    pub fn from_source(rel_path: &Path, source: &str, toc: TocConfig) -> Result<Self, SiteError> {
        let (yaml, body) = split_frontmatter(source);
        let mut frontmatter = match yaml {
            Some(yaml) => Frontmatter::from_yaml(yaml).map_err(|source| SiteError::Frontmatter {
                path: rel_path.to_path_buf(),
                source,
            })?,
            None => Frontmatter::default(),
        };
        frontmatter.category = non_blank(frontmatter.category.take());
        frontmatter.slug = non_blank(frontmatter.slug.take());

        let headings = assign_ids(&extract_headings(body));
        if headings.iter().any(|heading| heading.id.is_empty()) {
            tracing::warn!(path = %rel_path.display(), "Heading without usable anchor text");
        }

        let side_outline = build_outline(&headings, toc.side_max_depth);
        let content_outline = frontmatter
            .toc
            .then(|| build_outline(&headings, toc.content_max_depth));

        let title = frontmatter
            .title
            .clone()
            .or_else(|| {
                headings
                    .iter()
                    .find(|heading| heading.depth == 1)
                    .map(|heading| heading.text.clone())
            })
            .unwrap_or_else(|| file_title(rel_path));

        Ok(Self {
            path: page_path(rel_path, &frontmatter),
            source: rel_path.to_path_buf(),
            title,
            category: frontmatter.category,
            updated: frontmatter.updated,
            ingress: frontmatter.ingress,
            skills: frontmatter.skills,
            reading_time_minutes: reading_time_minutes(body),
            headings,
            side_outline,
            content_outline,
        })
    }

    /// Side navigation links (`path#id`).
    #[must_use]
    pub fn side_links(&self) -> Vec<OutlineLink> {
        self.side_outline.links(&self.path)
    }

    /// In-content outline links, empty when the outline is disabled.
    #[must_use]
    pub fn content_links(&self) -> Vec<OutlineLink> {
        self.content_outline
            .as_ref()
            .map(|outline| outline.links(&self.path))
            .unwrap_or_default()
    }

    /// schema.org `TechArticle` structured data for the page head.
    #[must_use]
    pub fn structured_data(&self) -> serde_json::Value {
        serde_json::json!({
            "@context": "http://schema.org",
            "@type": "TechArticle",
            "dateModified": self.updated,
            "headline": self.title,
            "description": self.ingress,
        })
    }
}

/// Estimate reading time in whole minutes, at least one.
#[must_use]
pub fn reading_time_minutes(text: &str) -> u32 {
    let words = text.split_whitespace().count();
    u32::try_from(words.div_ceil(WORDS_PER_MINUTE).max(1)).unwrap_or(u32::MAX)
}

/// Page path from front matter, falling back to the file location.
///
/// - `category: guides`, `slug: setup` -> `/guides/setup/`
/// - `slug: setup` -> `/setup/`
/// - `guides/setup.md` -> `/guides/setup/`
/// - `guides/index.md` -> `/guides/`
/// - `index.md` -> `/`
fn page_path(rel_path: &Path, frontmatter: &Frontmatter) -> String {
    match (&frontmatter.category, &frontmatter.slug) {
        (Some(category), Some(slug)) => format!("/{category}/{slug}/"),
        (None, Some(slug)) => format!("/{slug}/"),
        _ => file_page_path(rel_path),
    }
}

/// Trim a path segment from front matter; blank values count as unset.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Convert a relative source path into a page path.
fn file_page_path(rel_path: &Path) -> String {
    let without_ext = rel_path.with_extension("");
    let mut segments: Vec<String> = without_ext
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if segments.last().is_some_and(|last| last == "index") {
        segments.pop();
    }

    if segments.is_empty() {
        "/".to_owned()
    } else {
        format!("/{}/", segments.join("/"))
    }
}

/// Title from the file stem (`getting-started.md` -> `getting-started`).
fn file_title(rel_path: &Path) -> String {
    rel_path
        .file_stem()
        .map_or_else(|| "Untitled".to_owned(), |stem| stem.to_string_lossy().into_owned())
}
