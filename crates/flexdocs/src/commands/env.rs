//! `flexdocs env` command implementation.

use std::path::PathBuf;

use clap::Args;
use flexdocs_config::Config;

use super::{MODES, resolve_environment};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the env command.
#[derive(Args)]
pub(crate) struct EnvArgs {
    /// Path to configuration file (default: auto-discover flexdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Local runtime mode (overrides NODE_ENV).
    #[arg(long, value_parser = MODES)]
    mode: Option<String>,

    /// Print the resolved environment as JSON.
    #[arg(long)]
    json: bool,
}

impl EnvArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        let environment = resolve_environment(&config, self.mode.as_deref())?;

        if self.json {
            output.result(&serde_json::to_string_pretty(&environment)?);
            return Ok(());
        }

        output.highlight(environment.name.as_str());
        output.field("Site URL", &environment.site_url);
        output.field("Path prefix", &environment.path_prefix);
        output.field("Home page", &environment.page_url("/"));
        output.field(
            "Indexing",
            if environment.name.allows_indexing() {
                "allowed"
            } else {
                "disallowed"
            },
        );
        Ok(())
    }
}
