//! YAML front matter of Markdown articles.
//!
//! ```text
//! ---
//! title: Getting started
//! slug: getting-started
//! category: introduction
//! updated: 2019-01-15
//! ingress: First steps with the marketplace.
//! toc: true
//! ---
//! # Body
//! ```

use serde::{Deserialize, Serialize};

/// Article front matter.
///
/// All fields are optional. `toc` enables the in-content outline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Frontmatter {
    /// Article title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// URL slug within the category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Category (first path segment).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Last update date (`YYYY-MM-DD`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    /// Lead paragraph, used as the page description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress: Option<String>,
    /// Skills the article assumes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    /// Whether the article shows an inline table of contents.
    pub toc: bool,
}

impl Frontmatter {
    /// Parse front matter from YAML content.
    ///
    /// Empty content returns a default instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(trimmed)
    }
}

/// Split a leading `---` delimited front matter block from the body.
///
/// Returns `(None, source)` when the document has no front matter or the
/// block is never closed. The block may be closed by `---` or `...`.
pub fn split_frontmatter(source: &str) -> (Option<&str>, &str) {
    let Some(rest) = source
        .strip_prefix("---\n")
        .or_else(|| source.strip_prefix("---\r\n"))
    else {
        return (None, source);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let content = line.trim_end_matches(['\r', '\n']);
        if content == "---" || content == "..." {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }

    (None, source)
}
