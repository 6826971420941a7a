//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod env;
pub(crate) mod outline;

pub(crate) use build::BuildArgs;
pub(crate) use env::EnvArgs;
pub(crate) use outline::OutlineArgs;

use flexdocs_config::{BuildContext, Config, ConfigError, ResolvedEnvironment};

/// Runtime modes accepted by `--mode`.
pub(crate) const MODES: [&str; 2] = ["development", "production"];

/// Resolve the environment from process variables, with `--mode` taking
/// precedence over `NODE_ENV`.
pub(crate) fn resolve_environment(
    config: &Config,
    mode: Option<&str>,
) -> Result<ResolvedEnvironment, ConfigError> {
    let mut context = BuildContext::from_env();
    if let Some(mode) = mode {
        context = context.with_runtime_environment(mode);
    }
    config.resolve_environment(&context)
}
