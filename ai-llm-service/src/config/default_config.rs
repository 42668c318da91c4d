//! Review model config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `OPENAI_API_KEY`   = API key (mandatory)
//! - `OPENAI_BASE_URL`  = API base (default `https://api.openai.com`)
//! - `OPENAI_MODEL`     = model name (default `gpt-4o-mini`)
//! - `LLM_MAX_TOKENS`   = output bound (default `1000`)
//! - `LLM_TEMPERATURE`  = sampling temperature (default `0.2`, range `0.0..=2.0`)
//! - `LLM_TIMEOUT_SECS` = HTTP timeout (default `120`)

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{
        AiLlmError, env_opt_f32, env_opt_u32, env_opt_u64, must_env, validate_http_endpoint,
        validate_range_f32,
    },
};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_REVIEW_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Constructs the config for the review model.
///
/// Reviews favour determinism, so the default temperature is low and the
/// output is bounded by `max_tokens`.
///
/// # Errors
///
/// - [`crate::error_handler::ConfigError::MissingVar`] if `OPENAI_API_KEY` is unset or empty
/// - [`crate::error_handler::ConfigError::InvalidNumber`] for unparsable numbers
/// - [`crate::error_handler::ConfigError::InvalidFormat`] if `OPENAI_BASE_URL` is not http(s)
/// - [`crate::error_handler::ConfigError::OutOfRange`] if the temperature is outside `0.0..=2.0`
pub fn config_openai_review() -> Result<LlmModelConfig, AiLlmError> {
    let api_key = must_env("OPENAI_API_KEY")?;

    let endpoint = std::env::var("OPENAI_BASE_URL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());
    validate_http_endpoint("OPENAI_BASE_URL", &endpoint)?;

    let model = std::env::var("OPENAI_MODEL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_REVIEW_MODEL.to_string());

    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?.unwrap_or(DEFAULT_MAX_TOKENS);
    let temperature = env_opt_f32("LLM_TEMPERATURE")?.unwrap_or(DEFAULT_TEMPERATURE);
    validate_range_f32("temperature", temperature, 0.0, 2.0)?;
    let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(LlmModelConfig {
        model,
        endpoint,
        api_key,
        max_tokens: Some(max_tokens),
        temperature: Some(temperature),
        top_p: None,
        timeout_secs: Some(timeout_secs),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handler::ConfigError;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "OPENAI_API_KEY",
        "OPENAI_BASE_URL",
        "OPENAI_MODEL",
        "LLM_MAX_TOKENS",
        "LLM_TEMPERATURE",
        "LLM_TIMEOUT_SECS",
    ];

    fn reset(pairs: &[(&str, &str)]) {
        // SAFETY: tests touching the environment run serially.
        unsafe {
            for v in VARS {
                std::env::remove_var(v);
            }
            for (k, v) in pairs {
                std::env::set_var(k, v);
            }
        }
    }

    #[test]
    #[serial]
    fn defaults_apply_when_only_key_is_set() {
        reset(&[("OPENAI_API_KEY", "sk-abc")]);
        let cfg = config_openai_review().unwrap();

        assert_eq!(cfg.endpoint, DEFAULT_OPENAI_BASE_URL);
        assert_eq!(cfg.model, DEFAULT_REVIEW_MODEL);
        assert_eq!(cfg.max_tokens, Some(DEFAULT_MAX_TOKENS));
        assert_eq!(cfg.temperature, Some(DEFAULT_TEMPERATURE));
        assert_eq!(cfg.timeout_secs, Some(DEFAULT_TIMEOUT_SECS));
        reset(&[]);
    }

    #[test]
    #[serial]
    fn missing_key_is_a_config_error() {
        reset(&[("OPENAI_API_KEY", "   ")]);
        let err = config_openai_review().unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::MissingVar("OPENAI_API_KEY"))
        ));
        reset(&[]);
    }

    #[test]
    #[serial]
    fn temperature_out_of_range_is_rejected() {
        reset(&[("OPENAI_API_KEY", "sk-abc"), ("LLM_TEMPERATURE", "3.5")]);
        let err = config_openai_review().unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::OutOfRange { field: "temperature", .. })
        ));
        reset(&[]);
    }

    #[test]
    #[serial]
    fn overrides_are_read() {
        reset(&[
            ("OPENAI_API_KEY", "sk-abc"),
            ("OPENAI_BASE_URL", "http://localhost:4000"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("LLM_MAX_TOKENS", "256"),
        ]);
        let cfg = config_openai_review().unwrap();
        assert_eq!(cfg.endpoint, "http://localhost:4000");
        assert_eq!(cfg.model, "gpt-4o");
        assert_eq!(cfg.max_tokens, Some(256));
        reset(&[]);
    }
}
