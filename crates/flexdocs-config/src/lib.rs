//! Configuration management for flexdocs.
//!
//! Parses `flexdocs.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. CLI settings can be
//! applied during load via [`CliSettings`].
//!
//! The [`environment`] module resolves the deployment environment (site URL
//! and path prefix) from build-time variables; the `[environment]` section
//! only configures the local URLs and the prefix it uses.
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.title`
//! - `environment.development_url`
//! - `environment.production_url`

pub mod environment;
mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use environment::{
    BuildContext, Environment, EnvironmentError, EnvironmentResolver, ResolvedEnvironment,
    resolve, with_trailing_slash,
};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override build output directory.
    pub output_dir: Option<PathBuf>,
    /// Override sitemap generation flag.
    pub sitemap_enabled: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "flexdocs.toml";

/// Largest accepted outline cutoff (keeps every heading level 1-6).
const MAX_OUTLINE_DEPTH: u8 = 7;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site configuration.
    pub site: SiteConfig,
    /// Documentation paths (relative strings from TOML).
    docs: DocsConfigRaw,
    /// Local environment URLs and path prefix.
    pub environment: EnvironmentConfig,
    /// Sitemap configuration.
    pub sitemap: SitemapConfig,
    /// Table of contents configuration.
    pub toc: TocConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Documentation".to_owned(),
        }
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
}

/// Resolved documentation paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
    /// Output directory for generated files.
    pub output_dir: PathBuf,
}

/// Local environment URLs and path prefix.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Site URL of the local development server.
    pub development_url: String,
    /// Site URL of the local production server.
    pub production_url: String,
    /// Path prefix for production-like builds.
    pub path_prefix: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            development_url: environment::DEFAULT_DEVELOPMENT_URL.to_owned(),
            production_url: environment::DEFAULT_PRODUCTION_URL.to_owned(),
            path_prefix: environment::DEFAULT_PATH_PREFIX.to_owned(),
        }
    }
}

impl EnvironmentConfig {
    /// Build the resolver for this configuration.
    #[must_use]
    pub fn resolver(&self) -> EnvironmentResolver {
        EnvironmentResolver {
            local_development_url: self.development_url.clone(),
            local_production_url: self.production_url.clone(),
            path_prefix: self.path_prefix.clone(),
        }
    }
}

/// Sitemap configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Whether `sitemap.xml` is generated.
    pub enabled: bool,
    /// Page paths left out of the sitemap.
    pub exclude: Vec<String>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            exclude: vec!["/styleguide".to_owned()],
        }
    }
}

/// Table of contents configuration.
///
/// Headings with `depth < max_depth` make it into an outline.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    /// Cutoff for the side navigation outline.
    pub side_max_depth: u8,
    /// Cutoff for the in-content outline.
    pub content_max_depth: u8,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            side_max_depth: 3,
            content_max_depth: 4,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`environment.production_url`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
    /// Deployment environment could not be resolved.
    #[error("{0}")]
    Environment(#[from] EnvironmentError),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Require an outline cutoff that keeps at least one heading level.
fn require_depth(depth: u8, field: &str) -> Result<(), ConfigError> {
    if !(2..=MAX_OUTLINE_DEPTH).contains(&depth) {
        return Err(ConfigError::Validation(format!(
            "{field} must be between 2 and {MAX_OUTLINE_DEPTH}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `flexdocs.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Resolve the deployment environment for this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Environment` if the context does not map to a
    /// known environment.
    pub fn resolve_environment(
        &self,
        context: &BuildContext,
    ) -> Result<ResolvedEnvironment, ConfigError> {
        Ok(self.environment.resolver().resolve(context)?)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.docs_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(sitemap_enabled) = settings.sitemap_enabled {
            self.sitemap.enabled = sitemap_enabled;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            docs: DocsConfigRaw::default(),
            environment: EnvironmentConfig::default(),
            sitemap: SitemapConfig::default(),
            toc: TocConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                output_dir: base.join("public"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before validation
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        self.validate_environment()?;
        self.validate_toc()?;
        Ok(())
    }

    /// Validate local URLs and path prefix shape.
    fn validate_environment(&self) -> Result<(), ConfigError> {
        let env = &self.environment;
        require_non_empty(&env.development_url, "environment.development_url")?;
        require_http_url(&env.development_url, "environment.development_url")?;
        require_non_empty(&env.production_url, "environment.production_url")?;
        require_http_url(&env.production_url, "environment.production_url")?;

        let prefix = &env.path_prefix;
        if !prefix.is_empty() && (!prefix.starts_with('/') || prefix.ends_with('/')) {
            return Err(ConfigError::Validation(
                "environment.path_prefix must start with / and must not end with /".to_owned(),
            ));
        }
        Ok(())
    }

    /// Validate outline cutoffs.
    fn validate_toc(&self) -> Result<(), ConfigError> {
        require_depth(self.toc.side_max_depth, "toc.side_max_depth")?;
        require_depth(self.toc.content_max_depth, "toc.content_max_depth")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.title = expand::expand_env(&self.site.title, "site.title")?;
        self.environment.development_url = expand::expand_env(
            &self.environment.development_url,
            "environment.development_url",
        )?;
        self.environment.production_url = expand::expand_env(
            &self.environment.production_url,
            "environment.production_url",
        )?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            output_dir: resolve(self.docs.output_dir.as_deref(), "public"),
        };
    }
}
