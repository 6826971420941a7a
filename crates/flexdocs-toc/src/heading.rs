//! Heading records flowing through the pipeline.

/// A heading as produced by the Markdown processor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heading {
    /// Raw heading text.
    pub text: String,
    /// Nesting depth (1-6), 1 being the top-level section marker.
    pub depth: u8,
}

impl Heading {
    /// Create a new heading.
    pub fn new(text: impl Into<String>, depth: u8) -> Self {
        Self {
            text: text.into(),
            depth,
        }
    }
}

/// A heading with its assigned anchor id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SluggedHeading {
    /// Anchor id, unique within the document.
    pub id: String,
    /// Heading text.
    pub text: String,
    /// Nesting depth (1-6).
    pub depth: u8,
}

impl SluggedHeading {
    /// Anchor fragment for linking (`#id`).
    #[must_use]
    pub fn fragment(&self) -> String {
        format!("#{}", self.id)
    }
}
