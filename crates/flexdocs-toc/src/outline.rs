//! Depth-limited outlines for navigation widgets.
//!
//! The same slugged heading list feeds several outlines with different
//! cutoffs, e.g. a shallow one for persistent side navigation and a deeper
//! one for an inline "on this page" list. Cutoffs are chosen by the caller.

use crate::heading::SluggedHeading;

/// Ordered, depth-filtered view of a document's headings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Outline {
    entries: Vec<SluggedHeading>,
}

/// Outline entry with its nested children.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OutlineNode {
    /// The heading itself.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub heading: SluggedHeading,
    /// Headings nested under this one.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<OutlineNode>,
}

/// Outline entry resolved to a link target.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OutlineLink {
    /// Link target (`page_path#id`).
    pub href: String,
    /// Link text.
    pub text: String,
    /// Heading depth.
    pub depth: u8,
}

/// Keep the headings with `depth < max_depth`, in document order.
///
/// The input is not modified. An empty result means there is no navigation
/// to render.
#[must_use]
pub fn build_outline(slugged: &[SluggedHeading], max_depth: u8) -> Outline {
    Outline {
        entries: slugged
            .iter()
            .filter(|heading| heading.depth < max_depth)
            .cloned()
            .collect(),
    }
}

impl Outline {
    /// Outline entries in document order.
    pub fn entries(&self) -> &[SluggedHeading] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve every entry to a `page_path#id` link.
    #[must_use]
    pub fn links(&self, page_path: &str) -> Vec<OutlineLink> {
        self.entries
            .iter()
            .map(|heading| OutlineLink {
                href: format!("{page_path}#{}", heading.id),
                text: heading.text.clone(),
                depth: heading.depth,
            })
            .collect()
    }

    /// Nest entries under the closest preceding shallower entry.
    ///
    /// Entries with no shallower predecessor become roots. Skipped levels
    /// (an H2 followed by an H4) nest directly under the predecessor.
    #[must_use]
    pub fn nested(&self) -> Vec<OutlineNode> {
        let mut roots: Vec<OutlineNode> = Vec::new();
        // Open ancestors, shallowest first
        let mut stack: Vec<OutlineNode> = Vec::new();

        for heading in &self.entries {
            while stack.last().is_some_and(|open| open.heading.depth >= heading.depth) {
                close_node(&mut stack, &mut roots);
            }
            stack.push(OutlineNode {
                heading: heading.clone(),
                children: Vec::new(),
            });
        }
        while !stack.is_empty() {
            close_node(&mut stack, &mut roots);
        }

        roots
    }
}

/// Pop the innermost open node and attach it to its parent or to the roots.
fn close_node(stack: &mut Vec<OutlineNode>, roots: &mut Vec<OutlineNode>) {
    if let Some(node) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}

impl<'a> IntoIterator for &'a Outline {
    type Item = &'a SluggedHeading;
    type IntoIter = std::slice::Iter<'a, SluggedHeading>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
