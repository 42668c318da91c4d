//! GitHub access used by the review pipeline.
//!
//! Exposes [`ProviderConfig`] and the concrete [`github::GitHubClient`] that:
//!   * downloads pull request diffs
//!   * looks up the optional per-repository review config
//!   * posts review comments back to the PR conversation.

pub mod types;
pub use types::*;

pub mod github;

use std::time::Duration;

use tracing::debug;

use crate::errors::{GitContextEngineConfigError, GitContextEngineResult};

/// Default REST API base.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// User agent sent with every request; GitHub rejects anonymous agents.
const USER_AGENT: &str = "git-context-engine/0.1";

/// Runtime configuration for the GitHub client.
///
/// Usually injected from environment at startup.
#[derive(Clone)]
pub struct ProviderConfig {
    /// API base, e.g. "https://api.github.com".
    pub base_api: String,
    /// Access token (PAT or app installation token).
    pub token: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_api", &self.base_api)
            .field("token", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl github::GitHubClient {
    /// Constructs a client from generic configuration.
    ///
    /// The underlying HTTP client follows redirects (diff URLs redirect to
    /// the patch host) and carries a stable user agent.
    pub fn from_config(cfg: ProviderConfig) -> GitContextEngineResult<Self> {
        debug!(
            "Initializing GitHub client: base_api={}, timeout_secs={}",
            cfg.base_api, cfg.timeout_secs
        );

        if cfg.token.trim().is_empty() {
            return Err(GitContextEngineConfigError::MissingToken.into());
        }
        let base = cfg.base_api.trim().trim_end_matches('/').to_string();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(GitContextEngineConfigError::InvalidBaseUrl(cfg.base_api).into());
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;

        Ok(github::GitHubClient::new(http, base, cfg.token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GitContextEngineError;

    fn cfg(base: &str, token: &str) -> ProviderConfig {
        ProviderConfig {
            base_api: base.into(),
            token: token.into(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn empty_token_is_rejected() {
        let err = github::GitHubClient::from_config(cfg(GITHUB_API_BASE, " ")).unwrap_err();
        assert!(matches!(
            err,
            GitContextEngineError::Config(GitContextEngineConfigError::MissingToken)
        ));
    }

    #[test]
    fn base_url_needs_http_scheme() {
        let err = github::GitHubClient::from_config(cfg("api.github.com", "t")).unwrap_err();
        assert!(matches!(
            err,
            GitContextEngineError::Config(GitContextEngineConfigError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn debug_hides_token() {
        let shown = format!("{:?}", cfg(GITHUB_API_BASE, "ghp_secret"));
        assert!(!shown.contains("ghp_secret"));
    }
}
