//! GitHub REST access for the pull request review bot.
//!
//! Everything here is request-scoped: a [`git_providers::github::GitHubClient`]
//! is built once at startup and shared; each call performs one HTTP exchange.

pub mod errors;
pub mod git_providers;

pub use errors::{
    GitContextEngineConfigError, GitContextEngineError, GitContextEngineProviderError,
    GitContextEngineResult,
};
pub use git_providers::github::GitHubClient;
pub use git_providers::{
    ConfigLookup, DEFAULT_CONFIG_BRANCH, GITHUB_API_BASE, ProviderConfig, REVIEW_CONFIG_PATH,
    ReviewConfig,
};
