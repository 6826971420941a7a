//! Site build driver.
//!
//! Loads every article of the docs directory and writes the build outputs:
//!
//! - `site.json`: environment, article metadata and outlines
//! - `sitemap.xml`: canonical page URLs (when enabled)
//! - `robots.txt`: crawl policy for the environment

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use flexdocs_config::{Config, ResolvedEnvironment, TocConfig};
use rayon::prelude::*;
use serde::Serialize;

use crate::article::Article;
use crate::error::SiteError;
use crate::robots::robots_txt;
use crate::scanner::Scanner;
use crate::sitemap::Sitemap;

/// Manifest file name.
const MANIFEST_FILENAME: &str = "site.json";
/// Sitemap file name.
const SITEMAP_FILENAME: &str = "sitemap.xml";
/// Robots file name.
const ROBOTS_FILENAME: &str = "robots.txt";

/// Settings for loading and building a site.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    /// Site title.
    pub title: String,
    /// Markdown source directory.
    pub source_dir: PathBuf,
    /// Outline cutoffs.
    pub toc: TocConfig,
    /// Whether `sitemap.xml` is written.
    pub sitemap_enabled: bool,
    /// Page paths left out of the sitemap.
    pub sitemap_exclude: Vec<String>,
}

impl SiteSettings {
    /// Take the settings from a loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            title: config.site.title.clone(),
            source_dir: config.docs_resolved.source_dir.clone(),
            toc: config.toc,
            sitemap_enabled: config.sitemap.enabled,
            sitemap_exclude: config.sitemap.exclude.clone(),
        }
    }
}

/// Loaded site: every article of the docs directory.
#[derive(Debug, Serialize)]
pub struct Site {
    /// Site title.
    pub title: String,
    /// Environment the site was built for.
    pub environment: ResolvedEnvironment,
    /// Articles sorted by page path.
    pub articles: Vec<Article>,
}

impl Site {
    /// Distinct categories, sorted.
    pub fn categories(&self) -> BTreeSet<&str> {
        self.articles
            .iter()
            .filter_map(|article| article.category.as_deref())
            .collect()
    }

    /// Find an article by page path.
    pub fn article(&self, path: &str) -> Option<&Article> {
        self.articles.iter().find(|article| article.path == path)
    }
}

/// Summary of a finished build.
#[derive(Debug)]
pub struct BuildReport {
    /// Number of articles processed.
    pub article_count: usize,
    /// Number of sitemap entries (0 when disabled).
    pub sitemap_urls: usize,
    /// Files written, in write order.
    pub files: Vec<PathBuf>,
}

/// Builds site metadata for one resolved environment.
pub struct SiteBuilder {
    settings: SiteSettings,
    environment: ResolvedEnvironment,
}

impl SiteBuilder {
    /// Create a new builder.
    pub fn new(settings: SiteSettings, environment: ResolvedEnvironment) -> Self {
        Self {
            settings,
            environment,
        }
    }

    /// Environment this builder targets.
    pub fn environment(&self) -> &ResolvedEnvironment {
        &self.environment
    }

    /// Scan the docs directory and load every article.
    ///
    /// Documents are parsed in parallel, each with its own slug ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the source directory is missing, a file can't be
    /// read, has malformed front matter, or two documents resolve to the same
    /// page path.
    pub fn load(&self) -> Result<Site, SiteError> {
        let start = Instant::now();
        let source_dir = &self.settings.source_dir;
        if !source_dir.is_dir() {
            return Err(SiteError::SourceNotFound(source_dir.clone()));
        }
        let refs = Scanner::new(source_dir.clone()).scan();
        let toc = self.settings.toc;

        let mut articles = refs
            .par_iter()
            .map(|doc| {
                let source =
                    fs::read_to_string(&doc.abs_path).map_err(|source| SiteError::Read {
                        path: doc.rel_path.clone(),
                        source,
                    })?;
                Article::from_source(&doc.rel_path, &source, toc)
            })
            .collect::<Result<Vec<_>, SiteError>>()?;

        check_unique_paths(&articles)?;
        articles.sort_by(|a, b| a.path.cmp(&b.path));

        tracing::info!(
            articles = articles.len(),
            environment = %self.environment.name,
            elapsed_ms = start.elapsed().as_millis(),
            "Site loaded"
        );

        Ok(Site {
            title: self.settings.title.clone(),
            environment: self.environment.clone(),
            articles,
        })
    }

    /// Build the sitemap for a loaded site.
    ///
    /// Lists the home page, one index page per category and every article.
    pub fn sitemap(&self, site: &Site) -> Sitemap {
        let mut sitemap = Sitemap::new(self.environment.clone(), &self.settings.sitemap_exclude);
        sitemap.add_page("/", None);
        for category in site.categories() {
            sitemap.add_page(&format!("/{category}/"), None);
        }
        for article in &site.articles {
            sitemap.add_page(&article.path, article.updated.as_deref());
        }
        sitemap
    }

    /// Load the site and write the build outputs into `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or an output file can't be written.
    pub fn build(&self, output_dir: &Path) -> Result<BuildReport, SiteError> {
        let site = self.load()?;
        fs::create_dir_all(output_dir)?;

        let mut files = Vec::new();

        let manifest_path = output_dir.join(MANIFEST_FILENAME);
        fs::write(&manifest_path, serde_json::to_string_pretty(&site)?)?;
        files.push(manifest_path);

        let sitemap_urls = if self.settings.sitemap_enabled {
            let sitemap = self.sitemap(&site);
            let sitemap_path = output_dir.join(SITEMAP_FILENAME);
            fs::write(&sitemap_path, sitemap.to_xml())?;
            files.push(sitemap_path);
            sitemap.len()
        } else {
            0
        };

        let robots_path = output_dir.join(ROBOTS_FILENAME);
        fs::write(
            &robots_path,
            robots_txt(&self.environment, self.settings.sitemap_enabled),
        )?;
        files.push(robots_path);

        tracing::info!(
            output = %output_dir.display(),
            sitemap_urls,
            "Build outputs written"
        );

        Ok(BuildReport {
            article_count: site.articles.len(),
            sitemap_urls,
            files,
        })
    }
}

/// Reject two documents resolving to the same page path.
fn check_unique_paths(articles: &[Article]) -> Result<(), SiteError> {
    let mut seen: HashMap<&str, &Path> = HashMap::with_capacity(articles.len());
    for article in articles {
        if let Some(first) = seen.insert(&article.path, &article.source) {
            return Err(SiteError::DuplicatePath {
                path: article.path.clone(),
                first: first.to_path_buf(),
                second: article.source.clone(),
            });
        }
    }
    Ok(())
}
