//! Heading anchors and table of contents outlines.
//!
//! Turns the ordered heading list of one document into unique anchor ids and
//! depth-limited outlines for navigation widgets.
//!
//! # Pipeline
//!
//! - [`extract_headings`]: collect `(text, depth)` records from Markdown
//! - [`assign_ids`]: give every heading a unique, URL-fragment-safe id
//! - [`build_outline`]: keep the headings shallower than a cutoff
//!
//! Each call to [`assign_ids`] owns its own [`SlugLedger`], so documents can
//! be processed on any number of threads.
//!
//! # Example
//!
//! ```
//! use flexdocs_toc::{assign_ids, build_outline, extract_headings};
//!
//! let markdown = "# Intro\n\n## Setup\n\n## Setup\n\n### Details\n";
//! let headings = assign_ids(&extract_headings(markdown));
//! let ids: Vec<&str> = headings.iter().map(|h| h.id.as_str()).collect();
//! assert_eq!(ids, ["intro", "setup", "setup-1", "details"]);
//!
//! let side = build_outline(&headings, 3);
//! assert_eq!(side.len(), 3);
//! ```

mod extract;
mod heading;
mod outline;
mod slug;

pub use extract::extract_headings;
pub use heading::{Heading, SluggedHeading};
pub use outline::{Outline, OutlineLink, OutlineNode, build_outline};
pub use slug::{SlugLedger, assign_ids, slugify};
