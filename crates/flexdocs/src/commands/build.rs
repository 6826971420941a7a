//! `flexdocs build` command implementation.

use std::path::PathBuf;

use clap::Args;
use flexdocs_config::{CliSettings, Config};
use flexdocs_site::{SiteBuilder, SiteSettings};

use super::{MODES, resolve_environment};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover flexdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for generated files (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Local runtime mode (overrides NODE_ENV).
    #[arg(long, value_parser = MODES)]
    mode: Option<String>,

    /// Skip sitemap.xml generation.
    #[arg(long)]
    no_sitemap: bool,

    /// Enable verbose output (per-build timing and warnings).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, environment resolution or the
    /// build fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            sitemap_enabled: self.no_sitemap.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let environment = resolve_environment(&config, self.mode.as_deref())?;

        output.highlight(&format!("Building for {}", environment.name));
        output.field("Site URL", &environment.site_url);
        output.field(
            "Path prefix",
            if environment.path_prefix.is_empty() {
                "(none)"
            } else {
                environment.path_prefix.as_str()
            },
        );
        output.field("Source", &config.docs_resolved.source_dir.display().to_string());
        output.field("Output", &config.docs_resolved.output_dir.display().to_string());

        let builder = SiteBuilder::new(SiteSettings::from_config(&config), environment);
        let report = builder.build(&config.docs_resolved.output_dir)?;

        if report.article_count == 0 {
            output.warning("No Markdown documents found");
        }
        for file in &report.files {
            output.info(&format!("  wrote {}", file.display()));
        }
        output.success(&format!(
            "Built {} articles ({} sitemap URLs) to {}",
            report.article_count,
            report.sitemap_urls,
            config.docs_resolved.output_dir.display()
        ));
        Ok(())
    }
}
