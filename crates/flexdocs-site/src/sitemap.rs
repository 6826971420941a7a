//! Sitemap generation.
//!
//! Page URLs are `site_url + path_prefix + path`, always ending with a
//! slash, so the sitemap points at the canonical URL of each page.

use std::collections::BTreeMap;
use std::fmt::Write;

use flexdocs_config::{ResolvedEnvironment, with_trailing_slash};
use quick_xml::escape::escape;

/// XML namespace for sitemap.
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Sitemap for one resolved environment.
pub struct Sitemap {
    environment: ResolvedEnvironment,
    /// Excluded page paths, normalized with a trailing slash.
    exclude: Vec<String>,
    /// Page path to last modification date.
    pages: BTreeMap<String, Option<String>>,
}

impl Sitemap {
    /// Create an empty sitemap.
    ///
    /// `exclude` lists page paths to leave out; `/styleguide` and
    /// `/styleguide/` are equivalent.
    pub fn new(environment: ResolvedEnvironment, exclude: &[String]) -> Self {
        Self {
            environment,
            exclude: exclude.iter().map(|path| with_trailing_slash(path)).collect(),
            pages: BTreeMap::new(),
        }
    }

    /// Add a page unless excluded. Adding a path twice keeps one entry.
    pub fn add_page(&mut self, path: &str, lastmod: Option<&str>) {
        let path = with_trailing_slash(path);
        if self.exclude.contains(&path) {
            tracing::debug!(path = %path, "Page excluded from sitemap");
            return;
        }
        let entry = self.pages.entry(path).or_default();
        if lastmod.is_some() {
            *entry = lastmod.map(str::to_owned);
        }
    }

    /// Number of pages in the sitemap.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check whether the sitemap has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Absolute page URLs, sorted by path.
    pub fn urls(&self) -> Vec<String> {
        self.pages
            .keys()
            .map(|path| self.environment.page_url(path))
            .collect()
    }

    /// Absolute URL of the sitemap file itself.
    pub fn location(&self) -> String {
        sitemap_url(&self.environment)
    }

    /// Generate sitemap XML.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(4096);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        let _ = writeln!(xml, r#"<urlset xmlns="{SITEMAP_NS}">"#);

        for (path, lastmod) in &self.pages {
            let loc = self.environment.page_url(path);
            xml.push_str("  <url>\n");
            let _ = writeln!(xml, "    <loc>{}</loc>", escape(loc.as_str()));
            if let Some(lastmod) = lastmod {
                let _ = writeln!(xml, "    <lastmod>{}</lastmod>", escape(lastmod.as_str()));
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// Absolute URL of `sitemap.xml` for an environment.
pub(crate) fn sitemap_url(environment: &ResolvedEnvironment) -> String {
    format!(
        "{}{}/sitemap.xml",
        environment.site_url.trim_end_matches('/'),
        environment.path_prefix
    )
}

#[cfg(test)]
mod tests {
    use flexdocs_config::Environment;
    use pretty_assertions::assert_eq;

    use super::*;

    fn production() -> ResolvedEnvironment {
        ResolvedEnvironment {
            name: Environment::NetlifyProduction,
            site_url: "https://x.example".to_owned(),
            path_prefix: "/docs".to_owned(),
        }
    }

    #[test]
    fn test_empty_sitemap() {
        let sitemap = Sitemap::new(production(), &[]);
        let xml = sitemap.to_xml();
        assert!(sitemap.is_empty());
        assert!(xml.contains(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert!(xml.contains("</urlset>"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_urls_have_prefix_and_trailing_slash() {
        let mut sitemap = Sitemap::new(production(), &[]);
        sitemap.add_page("/", None);
        sitemap.add_page("/guides/setup", None);
        sitemap.add_page("/guides/", None);

        assert_eq!(
            sitemap.urls(),
            [
                "https://x.example/docs/",
                "https://x.example/docs/guides/",
                "https://x.example/docs/guides/setup/",
            ]
        );
    }

    #[test]
    fn test_excluded_pages() {
        let exclude = vec!["/styleguide".to_owned()];
        let mut sitemap = Sitemap::new(production(), &exclude);
        sitemap.add_page("/styleguide/", None);
        sitemap.add_page("/styleguide", None);
        sitemap.add_page("/styleguide/colors/", None);

        assert_eq!(sitemap.urls(), ["https://x.example/docs/styleguide/colors/"]);
    }

    #[test]
    fn test_duplicate_pages_collapse() {
        let mut sitemap = Sitemap::new(production(), &[]);
        sitemap.add_page("/a/", Some("2019-01-01"));
        sitemap.add_page("/a", None);
        assert_eq!(sitemap.len(), 1);
        assert!(sitemap.to_xml().contains("<lastmod>2019-01-01</lastmod>"));
    }

    #[test]
    fn test_xml_entries() {
        let mut sitemap = Sitemap::new(production(), &[]);
        sitemap.add_page("/q&a/", Some("2019-02-03"));
        let xml = sitemap.to_xml();
        assert!(xml.contains("<loc>https://x.example/docs/q%26a/</loc>"));
        assert!(xml.contains("<lastmod>2019-02-03</lastmod>"));
    }

    #[test]
    fn test_locations_are_percent_encoded() {
        let mut sitemap = Sitemap::new(production(), &[]);
        sitemap.add_page("/Getting Started/first steps/", None);
        sitemap.add_page("/käyttöönotto/", None);

        assert_eq!(
            sitemap.urls(),
            [
                "https://x.example/docs/Getting%20Started/first%20steps/",
                "https://x.example/docs/k%C3%A4ytt%C3%B6%C3%B6notto/",
            ]
        );
        let xml = sitemap.to_xml();
        assert!(
            xml.lines()
                .filter(|line| line.contains("<loc>"))
                .all(|line| !line.trim().contains(' '))
        );
    }

    #[test]
    fn test_location() {
        let sitemap = Sitemap::new(production(), &[]);
        assert_eq!(sitemap.location(), "https://x.example/docs/sitemap.xml");
    }
}
