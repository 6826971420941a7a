//! Heading anchor ids.
//!
//! Ids are derived from heading text with [`slugify`] and made unique within
//! one document by a [`SlugLedger`]. Duplicates get the smallest unused
//! numeric suffix: `setup`, `setup-1`, `setup-2`.

use std::collections::{HashMap, HashSet};

use crate::heading::{Heading, SluggedHeading};

/// Ids already handed out for one document.
///
/// A ledger lives for exactly one document's heading list. Identical text in
/// two documents yields the same id, since each page has its own fragment
/// namespace.
#[derive(Debug, Default)]
pub struct SlugLedger {
    /// Every id assigned so far.
    used: HashSet<String>,
    /// Next suffix to try per base slug. Suffixes below it are known taken.
    next_suffix: HashMap<String, usize>,
}

impl SlugLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a unique id for `text` and record it.
    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        if !self.used.contains(&base) {
            self.used.insert(base.clone());
            return base;
        }

        let suffix = self.next_suffix.entry(base.clone()).or_insert(1);
        loop {
            let candidate = format!("{base}-{suffix}");
            *suffix += 1;
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    /// Check whether an id has already been assigned.
    pub fn contains(&self, id: &str) -> bool {
        self.used.contains(id)
    }

    /// Number of ids assigned so far.
    pub fn len(&self) -> usize {
        self.used.len()
    }

    /// Check whether no id has been assigned yet.
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    /// Forget every assigned id.
    pub fn reset(&mut self) {
        self.used.clear();
        self.next_suffix.clear();
    }
}

/// Assign anchor ids to one document's headings.
///
/// Uses a fresh [`SlugLedger`], so ids are pairwise distinct within the
/// returned list and document order is preserved.
#[must_use]
pub fn assign_ids(headings: &[Heading]) -> Vec<SluggedHeading> {
    let mut ledger = SlugLedger::new();
    headings
        .iter()
        .map(|heading| SluggedHeading {
            id: ledger.slug(&heading.text),
            text: heading.text.clone(),
            depth: heading.depth,
        })
        .collect()
}

/// Convert heading text to its base slug.
///
/// Lowercases, drops everything except letters, digits, whitespace and
/// dashes, collapses whitespace runs into a single dash and trims dashes from
/// both ends. Text made only of symbols produces an empty slug.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            pending_space = true;
        } else if c.is_alphanumeric() || c == '-' {
            if pending_space && !result.is_empty() {
                result.push('-');
            }
            pending_space = false;
            result.push(c);
        }
    }

    let trimmed = result.trim_matches('-');
    if trimmed.len() == result.len() {
        result
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ids(texts: &[&str]) -> Vec<String> {
        let headings: Vec<Heading> = texts.iter().map(|t| Heading::new(*t, 2)).collect();
        assign_ids(&headings).into_iter().map(|h| h.id).collect()
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Getting Started!"), "getting-started");
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("What's New?"), "whats-new");
        assert_eq!(slugify("  Spaces  "), "spaces");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("kebab-case"), "kebab-case");
    }

    #[test]
    fn test_slugify_strips_symbols() {
        assert_eq!(slugify("snake_case"), "snakecase");
        assert_eq!(slugify("C++ & Rust"), "c-rust");
        assert_eq!(slugify("Step 1: Install"), "step-1-install");
    }

    #[test]
    fn test_slugify_symbol_only_is_empty() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("- -"), "");
    }

    #[test]
    fn test_slugify_trims_dashes() {
        assert_eq!(slugify("-leading and trailing-"), "leading-and-trailing");
        assert_eq!(slugify("a - b"), "a---b");
    }

    #[test]
    fn test_slugify_keeps_unicode_letters() {
        assert_eq!(slugify("Käyttöönotto Ohje"), "käyttöönotto-ohje");
        assert_eq!(slugify("ÉTÉ"), "été");
    }

    #[test]
    fn test_slugify_is_deterministic() {
        let text = "Payment Flow (v2)";
        assert_eq!(slugify(text), slugify(text));
        assert_eq!(slugify(text), "payment-flow-v2");
    }

    #[test]
    fn test_duplicate_headings_get_suffixes() {
        assert_eq!(ids(&["Setup", "Setup", "Setup"]), ["setup", "setup-1", "setup-2"]);
    }

    #[test]
    fn test_suffix_skips_taken_ids() {
        // "Setup 1" already claimed `setup-1`
        assert_eq!(ids(&["Setup 1", "Setup", "Setup"]), ["setup-1", "setup", "setup-2"]);
    }

    #[test]
    fn test_suffixed_candidate_collides_with_later_heading() {
        assert_eq!(
            ids(&["FAQ", "FAQ", "FAQ 1", "FAQ 1"]),
            ["faq", "faq-1", "faq-1-1", "faq-1-2"]
        );
    }

    #[test]
    fn test_empty_slugs_are_disambiguated() {
        assert_eq!(ids(&["???", "!!!", "..."]), ["", "-1", "-2"]);
    }

    #[test]
    fn test_ids_are_pairwise_distinct() {
        let texts = ["A", "a", "A!", "a-1", "A", "a 1", "", "?"];
        let result = ids(&texts);
        let unique: HashSet<&String> = result.iter().collect();
        assert_eq!(unique.len(), result.len());
    }

    #[test]
    fn test_assign_ids_preserves_order_and_depth() {
        let headings = vec![
            Heading::new("Intro", 1),
            Heading::new("Setup", 2),
            Heading::new("Setup", 2),
        ];
        let slugged = assign_ids(&headings);
        assert_eq!(
            slugged,
            vec![
                SluggedHeading { id: "intro".to_owned(), text: "Intro".to_owned(), depth: 1 },
                SluggedHeading { id: "setup".to_owned(), text: "Setup".to_owned(), depth: 2 },
                SluggedHeading { id: "setup-1".to_owned(), text: "Setup".to_owned(), depth: 2 },
            ]
        );
    }

    #[test]
    fn test_ledger_per_document() {
        let first = ids(&["Overview"]);
        let second = ids(&["Overview"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_ledger_reset() {
        let mut ledger = SlugLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.slug("Overview"), "overview");
        assert_eq!(ledger.slug("Overview"), "overview-1");
        assert!(ledger.contains("overview-1"));
        assert_eq!(ledger.len(), 2);

        ledger.reset();
        assert!(ledger.is_empty());
        assert_eq!(ledger.slug("Overview"), "overview");
    }
}
