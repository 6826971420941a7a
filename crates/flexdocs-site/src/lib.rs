//! Article metadata, sitemap and site build driver for flexdocs.
//!
//! A build walks the docs source directory, turns every Markdown file into
//! an [`Article`] (front matter, anchor ids, side and in-content outlines)
//! and writes the site manifest, `sitemap.xml` and `robots.txt` for the
//! resolved deployment environment.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use flexdocs_config::{BuildContext, Config};
//! use flexdocs_site::{SiteBuilder, SiteSettings};
//!
//! let config = Config::load(None, None)?;
//! let environment = config.resolve_environment(&BuildContext::from_env())?;
//! let builder = SiteBuilder::new(SiteSettings::from_config(&config), environment);
//! let report = builder.build(Path::new("public"))?;
//! println!("{} articles", report.article_count);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod article;
mod builder;
mod error;
mod frontmatter;
mod robots;
mod scanner;
mod sitemap;

pub use article::{Article, reading_time_minutes};
pub use builder::{BuildReport, Site, SiteBuilder, SiteSettings};
pub use error::SiteError;
pub use frontmatter::{Frontmatter, split_frontmatter};
pub use robots::robots_txt;
pub use sitemap::Sitemap;
