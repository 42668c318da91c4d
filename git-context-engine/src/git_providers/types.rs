//! Data model for values fetched from GitHub during a review.

use serde::{Deserialize, Serialize};

/// Repository path of the optional per-repository review configuration.
pub const REVIEW_CONFIG_PATH: &str = ".github/reviewbot.json";

/// Branch used for the config lookup when none is configured.
pub const DEFAULT_CONFIG_BRANCH: &str = "main";

/// Repository-specific review settings read from [`REVIEW_CONFIG_PATH`].
///
/// Both keys are optional; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Text placed at the very beginning of the prompt.
    pub prompt_prefix: Option<String>,
    /// Ordered issue categories replacing the built-in checklist.
    pub focus_areas: Vec<String>,
}

/// Outcome of a best-effort config lookup.
///
/// Every variant except [`ConfigLookup::Found`] resolves to
/// [`ReviewConfig::default`]; the distinction only feeds logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLookup {
    Found(ReviewConfig),
    /// GitHub answered 404: the repository has no config file on that ref.
    NotFound,
    /// Non-200 status other than 404, or a transport failure.
    FetchError(String),
    /// The file exists but its content could not be decoded or parsed.
    Invalid(String),
}

impl ConfigLookup {
    /// Resolves the lookup into the config to use.
    pub fn into_config(self) -> ReviewConfig {
        match self {
            ConfigLookup::Found(cfg) => cfg,
            _ => ReviewConfig::default(),
        }
    }

    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigLookup::Found(_) => "found",
            ConfigLookup::NotFound => "not_found",
            ConfigLookup::FetchError(_) => "fetch_error",
            ConfigLookup::Invalid(_) => "invalid",
        }
    }
}
