//! Deployment environment resolution.
//!
//! Maps the build-time variables of the process into one of five known
//! environments, the canonical site URL and the URL path prefix the site is
//! mounted under.
//!
//! | environment              | site URL                | path prefix |
//! |--------------------------|-------------------------|-------------|
//! | `local-development`      | `http://localhost:8000` | (none)      |
//! | `local-production`       | `http://localhost:9000` | `/docs`     |
//! | `netlify-production`     | `PRODUCTION_SITE_URL`   | `/docs`     |
//! | `netlify-deploy-preview` | `DEPLOY_PRIME_URL`      | `/docs`     |
//! | `netlify-branch-deploy`  | `DEPLOY_PRIME_URL`      | `/docs`     |
//!
//! A managed deployment is signalled by `CONTEXT`, which the hosting
//! provider sets for every build it runs.

use std::fmt;
use std::str::FromStr;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// Variable holding the local runtime mode (`development` or `production`).
pub const RUNTIME_ENV_VAR: &str = "NODE_ENV";
/// Variable holding the production site URL.
pub const PRODUCTION_SITE_URL_VAR: &str = "PRODUCTION_SITE_URL";
/// Variable set by the deployment provider with the deploy context name.
pub const CI_CONTEXT_VAR: &str = "CONTEXT";
/// Variable set by the deployment provider with the deploy URL.
pub const CI_DEPLOY_URL_VAR: &str = "DEPLOY_PRIME_URL";

/// Default site URL of the local development server.
pub const DEFAULT_DEVELOPMENT_URL: &str = "http://localhost:8000";
/// Default site URL of the local production server.
pub const DEFAULT_PRODUCTION_URL: &str = "http://localhost:9000";
/// Default path prefix for production-like builds.
pub const DEFAULT_PATH_PREFIX: &str = "/docs";

/// Unreserved URL characters: A-Z a-z 0-9 - . _ ~
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Build-time variables read once at process start.
///
/// Empty values are stored as `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildContext {
    /// Local runtime mode (`NODE_ENV`).
    pub runtime_environment_name: Option<String>,
    /// Production site URL (`PRODUCTION_SITE_URL`).
    pub production_site_url: Option<String>,
    /// Deploy context name, set only under managed deployments (`CONTEXT`).
    pub ci_context_name: Option<String>,
    /// Deploy URL of the current build (`DEPLOY_PRIME_URL`).
    pub ci_deploy_url: Option<String>,
}

impl BuildContext {
    /// Read the context from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the context from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).filter(|value| !value.is_empty());
        Self {
            runtime_environment_name: read(RUNTIME_ENV_VAR),
            production_site_url: read(PRODUCTION_SITE_URL_VAR),
            ci_context_name: read(CI_CONTEXT_VAR),
            ci_deploy_url: read(CI_DEPLOY_URL_VAR),
        }
    }

    /// Replace the runtime mode.
    #[must_use]
    pub fn with_runtime_environment(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.runtime_environment_name = (!name.is_empty()).then_some(name);
        self
    }

    /// Check whether the build runs under a managed deployment.
    pub fn is_managed_deployment(&self) -> bool {
        self.ci_context_name.is_some()
    }
}

/// Known deployment environments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Environment {
    /// Local development server.
    LocalDevelopment,
    /// Local production build.
    LocalProduction,
    /// Production deploy.
    NetlifyProduction,
    /// Pull request preview deploy.
    NetlifyDeployPreview,
    /// Non-default branch deploy.
    NetlifyBranchDeploy,
}

impl Environment {
    /// All environments.
    pub const ALL: [Self; 5] = [
        Self::LocalDevelopment,
        Self::LocalProduction,
        Self::NetlifyProduction,
        Self::NetlifyDeployPreview,
        Self::NetlifyBranchDeploy,
    ];

    /// Canonical environment name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LocalDevelopment => "local-development",
            Self::LocalProduction => "local-production",
            Self::NetlifyProduction => "netlify-production",
            Self::NetlifyDeployPreview => "netlify-deploy-preview",
            Self::NetlifyBranchDeploy => "netlify-branch-deploy",
        }
    }

    /// Check whether this environment is a managed deployment.
    pub fn is_managed(self) -> bool {
        !matches!(self, Self::LocalDevelopment | Self::LocalProduction)
    }

    /// Check whether search engines may index this environment.
    ///
    /// Previews and branch deploys must stay out of search results.
    pub fn allows_indexing(self) -> bool {
        !matches!(self, Self::NetlifyDeployPreview | Self::NetlifyBranchDeploy)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = EnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| EnvironmentError::Unknown { name: s.to_owned() })
    }
}

/// Environment resolution error.
///
/// Fatal to the build: there is no safe default site URL.
#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    /// The derived name is not a known environment.
    #[error("Cannot resolve unknown environment: {name}")]
    Unknown {
        /// The derived environment name.
        name: String,
    },
    /// Neither a deploy context nor a runtime mode is set.
    #[error("Cannot resolve environment: neither CONTEXT nor NODE_ENV is set")]
    RuntimeUnset,
    /// The environment's site URL source is missing.
    #[error("Cannot construct site URL for {environment}: {variable} is not set")]
    MissingSiteUrl {
        /// The resolved environment.
        environment: Environment,
        /// Variable the URL is read from.
        variable: &'static str,
    },
}

/// Result of environment resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedEnvironment {
    /// Environment name.
    pub name: Environment,
    /// Canonical absolute site URL.
    pub site_url: String,
    /// Path prefix the site is mounted under (empty or `/segment`).
    pub path_prefix: String,
}

impl ResolvedEnvironment {
    /// Prefix a site-relative path with the path prefix.
    #[must_use]
    pub fn prefixed_path(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.path_prefix)
        } else {
            format!("{}/{path}", self.path_prefix)
        }
    }

    /// Absolute URL of a page, always ending with a slash.
    ///
    /// Path segments are percent-encoded; the path prefix is used as is.
    ///
    /// ```
    /// use flexdocs_config::{BuildContext, resolve};
    ///
    /// let context = BuildContext {
    ///     ci_context_name: Some("production".to_owned()),
    ///     production_site_url: Some("https://x.example".to_owned()),
    ///     ..BuildContext::default()
    /// };
    /// let env = resolve(&context).unwrap();
    /// assert_eq!(env.page_url("/guides/setup"), "https://x.example/docs/guides/setup/");
    /// ```
    #[must_use]
    pub fn page_url(&self, path: &str) -> String {
        let site_url = self.site_url.trim_end_matches('/');
        let path = encode_path(path);
        format!("{site_url}{}", with_trailing_slash(&self.prefixed_path(&path)))
    }
}

/// Percent-encode every segment of a site-relative path.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT_ENCODE_SET).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Append a trailing slash unless already present.
#[must_use]
pub fn with_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_owned()
    } else {
        format!("{path}/")
    }
}

/// Resolves a [`BuildContext`] with configurable local URLs and prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvironmentResolver {
    /// Site URL of `local-development`.
    pub local_development_url: String,
    /// Site URL of `local-production`.
    pub local_production_url: String,
    /// Path prefix for managed deployments and `local-production`.
    pub path_prefix: String,
}

impl Default for EnvironmentResolver {
    fn default() -> Self {
        Self {
            local_development_url: DEFAULT_DEVELOPMENT_URL.to_owned(),
            local_production_url: DEFAULT_PRODUCTION_URL.to_owned(),
            path_prefix: DEFAULT_PATH_PREFIX.to_owned(),
        }
    }
}

impl EnvironmentResolver {
    /// Resolve the environment name, site URL and path prefix.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError`] if the context does not map to a known
    /// environment or the environment's URL source is missing.
    pub fn resolve(&self, context: &BuildContext) -> Result<ResolvedEnvironment, EnvironmentError> {
        let name = environment_name(context)?;

        let site_url = match name {
            Environment::LocalDevelopment => self.local_development_url.clone(),
            Environment::LocalProduction => self.local_production_url.clone(),
            Environment::NetlifyProduction => context.production_site_url.clone().ok_or(
                EnvironmentError::MissingSiteUrl {
                    environment: name,
                    variable: PRODUCTION_SITE_URL_VAR,
                },
            )?,
            Environment::NetlifyDeployPreview | Environment::NetlifyBranchDeploy => {
                context.ci_deploy_url.clone().ok_or(EnvironmentError::MissingSiteUrl {
                    environment: name,
                    variable: CI_DEPLOY_URL_VAR,
                })?
            }
        };

        let path_prefix = if context.is_managed_deployment() || name == Environment::LocalProduction
        {
            self.path_prefix.clone()
        } else {
            String::new()
        };

        Ok(ResolvedEnvironment {
            name,
            site_url,
            path_prefix,
        })
    }
}

/// Resolve a context with the default local URLs and path prefix.
///
/// # Errors
///
/// See [`EnvironmentResolver::resolve`].
pub fn resolve(context: &BuildContext) -> Result<ResolvedEnvironment, EnvironmentError> {
    EnvironmentResolver::default().resolve(context)
}

/// Derive the environment name from the context.
fn environment_name(context: &BuildContext) -> Result<Environment, EnvironmentError> {
    let name = match (&context.ci_context_name, &context.runtime_environment_name) {
        (Some(ci_context), _) => format!("netlify-{ci_context}"),
        (None, Some(runtime)) => format!("local-{runtime}"),
        (None, None) => return Err(EnvironmentError::RuntimeUnset),
    };
    name.parse()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn context(vars: &[(&str, &str)]) -> BuildContext {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        BuildContext::from_lookup(|name| vars.get(name).cloned())
    }

    fn resolved(name: Environment, site_url: &str, path_prefix: &str) -> ResolvedEnvironment {
        ResolvedEnvironment {
            name,
            site_url: site_url.to_owned(),
            path_prefix: path_prefix.to_owned(),
        }
    }

    #[test]
    fn test_local_development() {
        let env = resolve(&context(&[("NODE_ENV", "development")])).unwrap();
        assert_eq!(
            env,
            resolved(Environment::LocalDevelopment, "http://localhost:8000", "")
        );
    }

    #[test]
    fn test_local_production() {
        let env = resolve(&context(&[("NODE_ENV", "production")])).unwrap();
        assert_eq!(
            env,
            resolved(Environment::LocalProduction, "http://localhost:9000", "/docs")
        );
    }

    #[test]
    fn test_netlify_production() {
        let env = resolve(&context(&[
            ("CONTEXT", "production"),
            ("PRODUCTION_SITE_URL", "https://x.example"),
            ("NODE_ENV", "production"),
        ]))
        .unwrap();
        assert_eq!(
            env,
            resolved(Environment::NetlifyProduction, "https://x.example", "/docs")
        );
    }

    #[test]
    fn test_netlify_deploy_preview() {
        let env = resolve(&context(&[
            ("CONTEXT", "deploy-preview"),
            ("DEPLOY_PRIME_URL", "https://deploy-preview-42--x.netlify.app"),
        ]))
        .unwrap();
        assert_eq!(
            env,
            resolved(
                Environment::NetlifyDeployPreview,
                "https://deploy-preview-42--x.netlify.app",
                "/docs"
            )
        );
    }

    #[test]
    fn test_netlify_branch_deploy() {
        let env = resolve(&context(&[
            ("CONTEXT", "branch-deploy"),
            ("DEPLOY_PRIME_URL", "https://staging--x.netlify.app"),
            ("NODE_ENV", "development"),
        ]))
        .unwrap();
        assert_eq!(
            env,
            resolved(
                Environment::NetlifyBranchDeploy,
                "https://staging--x.netlify.app",
                "/docs"
            )
        );
    }

    #[test]
    fn test_unknown_ci_context() {
        let err = resolve(&context(&[("CONTEXT", "unexpected-value")])).unwrap_err();
        assert!(matches!(err, EnvironmentError::Unknown { .. }));
        assert!(err.to_string().contains("netlify-unexpected-value"));
    }

    #[test]
    fn test_unknown_runtime() {
        let err = resolve(&context(&[("NODE_ENV", "test")])).unwrap_err();
        assert!(matches!(err, EnvironmentError::Unknown { .. }));
        assert!(err.to_string().contains("local-test"));
    }

    #[test]
    fn test_runtime_unset() {
        let err = resolve(&context(&[])).unwrap_err();
        assert!(matches!(err, EnvironmentError::RuntimeUnset));
        assert!(err.to_string().contains("NODE_ENV"));
    }

    #[test]
    fn test_empty_values_are_absent() {
        let ctx = context(&[("CONTEXT", ""), ("NODE_ENV", "development")]);
        assert!(!ctx.is_managed_deployment());
        assert_eq!(resolve(&ctx).unwrap().name, Environment::LocalDevelopment);
    }

    #[test]
    fn test_missing_production_url() {
        let err = resolve(&context(&[("CONTEXT", "production")])).unwrap_err();
        assert!(matches!(
            err,
            EnvironmentError::MissingSiteUrl {
                environment: Environment::NetlifyProduction,
                variable: "PRODUCTION_SITE_URL",
            }
        ));
        assert!(err.to_string().contains("netlify-production"));
    }

    #[test]
    fn test_missing_deploy_url() {
        let err = resolve(&context(&[
            ("CONTEXT", "deploy-preview"),
            ("DEPLOY_PRIME_URL", ""),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            EnvironmentError::MissingSiteUrl {
                variable: "DEPLOY_PRIME_URL",
                ..
            }
        ));
    }

    #[test]
    fn test_custom_resolver() {
        let resolver = EnvironmentResolver {
            local_development_url: "http://127.0.0.1:3000".to_owned(),
            local_production_url: "http://127.0.0.1:3001".to_owned(),
            path_prefix: "/handbook".to_owned(),
        };
        let dev = resolver.resolve(&context(&[("NODE_ENV", "development")])).unwrap();
        assert_eq!(dev.site_url, "http://127.0.0.1:3000");
        assert_eq!(dev.path_prefix, "");

        let prod = resolver.resolve(&context(&[("NODE_ENV", "production")])).unwrap();
        assert_eq!(prod.site_url, "http://127.0.0.1:3001");
        assert_eq!(prod.path_prefix, "/handbook");
    }

    #[test]
    fn test_with_runtime_environment_override() {
        let ctx = context(&[("NODE_ENV", "development")]).with_runtime_environment("production");
        assert_eq!(resolve(&ctx).unwrap().name, Environment::LocalProduction);
    }

    #[test]
    fn test_environment_round_trips_through_str() {
        for env in Environment::ALL {
            assert_eq!(env.as_str().parse::<Environment>().unwrap(), env);
            assert_eq!(env.to_string(), env.as_str());
        }
    }

    #[test]
    fn test_environment_flags() {
        assert!(!Environment::LocalProduction.is_managed());
        assert!(Environment::NetlifyBranchDeploy.is_managed());
        assert!(Environment::NetlifyProduction.allows_indexing());
        assert!(Environment::LocalDevelopment.allows_indexing());
        assert!(!Environment::NetlifyDeployPreview.allows_indexing());
        assert!(!Environment::NetlifyBranchDeploy.allows_indexing());
    }

    #[test]
    fn test_page_url() {
        let env = resolved(Environment::NetlifyProduction, "https://x.example", "/docs");
        assert_eq!(env.page_url("/"), "https://x.example/docs/");
        assert_eq!(env.page_url("/a/b"), "https://x.example/docs/a/b/");
        assert_eq!(env.page_url("/a/b/"), "https://x.example/docs/a/b/");
        assert_eq!(env.page_url("a"), "https://x.example/docs/a/");

        let dev = resolved(Environment::LocalDevelopment, "http://localhost:8000/", "");
        assert_eq!(dev.page_url("/"), "http://localhost:8000/");
        assert_eq!(dev.page_url("/guide"), "http://localhost:8000/guide/");
    }

    #[test]
    fn test_page_url_encodes_segments() {
        let env = resolved(Environment::NetlifyProduction, "https://x.example", "/docs");
        assert_eq!(
            env.page_url("/Getting Started/käyttö"),
            "https://x.example/docs/Getting%20Started/k%C3%A4ytt%C3%B6/"
        );
        assert_eq!(env.page_url("/q&a/v1.2_x~y/"), "https://x.example/docs/q%26a/v1.2_x~y/");
    }

    #[test]
    fn test_prefixed_path() {
        let env = resolved(Environment::LocalProduction, "http://localhost:9000", "/docs");
        assert_eq!(env.prefixed_path("/guide/"), "/docs/guide/");
        let dev = resolved(Environment::LocalDevelopment, "http://localhost:8000", "");
        assert_eq!(dev.prefixed_path("/guide/"), "/guide/");
        assert_eq!(dev.prefixed_path("guide"), "/guide");
    }
}
