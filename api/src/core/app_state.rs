use std::fmt;

use ai_llm_service::{AiLlmError, LlmModelConfig, OpenAiService, config::default_config};
use git_context_engine::{
    DEFAULT_CONFIG_BRANCH, GITHUB_API_BASE, GitContextEngineError, GitHubClient, ProviderConfig,
};
use pr_reviewer::{PipelineSettings, ReviewGenerator, ReviewPipeline, pipeline::DEFAULT_DIFF_WARN_BYTES};
use thiserror::Error;
use tracing::info;

const DEFAULT_API_ADDRESS: &str = "0.0.0.0:8000";
const DEFAULT_GITHUB_TIMEOUT_SECS: u64 = 30;

/// Startup configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid number in {var}: expected {expected}")]
    InvalidNumber {
        var: &'static str,
        expected: &'static str,
    },

    #[error(transparent)]
    Llm(#[from] AiLlmError),

    #[error(transparent)]
    GitHub(#[from] GitContextEngineError),
}

/// Immutable process configuration, read once at startup.
#[derive(Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub api_address: String,
    /// Shared secret for `X-Hub-Signature-256`.
    pub webhook_secret: String,
    /// GitHub API settings (base URL, token, timeout).
    pub github: ProviderConfig,
    /// Chat-completion model settings.
    pub llm: LlmModelConfig,
    /// Config lookup and diff size settings.
    pub pipeline: PipelineSettings,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_address", &self.api_address)
            .field("webhook_secret", &"<redacted>")
            .field("github", &self.github)
            .field("llm", &self.llm)
            .field("pipeline", &self.pipeline)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Required: `GITHUB_WEBHOOK_SECRET`, `GITHUB_TOKEN`, `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let webhook_secret = must_env("GITHUB_WEBHOOK_SECRET")?;
        let token = must_env("GITHUB_TOKEN")?;
        let llm = default_config::config_openai_review()?;

        let github = ProviderConfig {
            base_api: opt_env("GITHUB_API_BASE").unwrap_or_else(|| GITHUB_API_BASE.into()),
            token,
            timeout_secs: opt_env_parse("GITHUB_TIMEOUT_SECS", "u64")?
                .unwrap_or(DEFAULT_GITHUB_TIMEOUT_SECS),
        };

        let pipeline = PipelineSettings {
            fallback_repository: opt_env("REVIEW_REPOSITORY"),
            config_branch: opt_env("REVIEW_CONFIG_BRANCH")
                .unwrap_or_else(|| DEFAULT_CONFIG_BRANCH.into()),
            diff_warn_bytes: opt_env_parse("REVIEW_DIFF_WARN_BYTES", "usize")?
                .unwrap_or(DEFAULT_DIFF_WARN_BYTES),
        };

        Ok(Self {
            api_address: opt_env("API_ADDRESS").unwrap_or_else(|| DEFAULT_API_ADDRESS.into()),
            webhook_secret,
            github,
            llm,
            pipeline,
        })
    }
}

/// Shared state for all HTTP handlers.
pub struct AppState {
    pub pipeline: ReviewPipeline,
}

impl AppState {
    pub fn new(pipeline: ReviewPipeline) -> Self {
        Self { pipeline }
    }

    /// Builds the HTTP clients and the review pipeline from config.
    pub fn build(config: AppConfig) -> Result<Self, ConfigError> {
        let github = GitHubClient::from_config(config.github)?;
        let llm = OpenAiService::new(config.llm)?;

        info!(
            model = llm.model(),
            config_branch = %config.pipeline.config_branch,
            fallback_repository = config.pipeline.fallback_repository.as_deref().unwrap_or("-"),
            "review pipeline ready"
        );

        Ok(Self::new(ReviewPipeline::new(
            config.webhook_secret,
            github,
            ReviewGenerator::new(llm),
            config.pipeline,
        )))
    }
}

fn must_env(name: &'static str) -> Result<String, ConfigError> {
    opt_env(name).ok_or(ConfigError::MissingVar(name))
}

fn opt_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn opt_env_parse<T: std::str::FromStr>(
    name: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    opt_env(name)
        .map(|v| {
            v.parse::<T>()
                .map_err(|_| ConfigError::InvalidNumber { var: name, expected })
        })
        .transpose()
}
