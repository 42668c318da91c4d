//! Chat-completion client used by the review pipeline.
//!
//! - [`config`]: model configuration ([`LlmModelConfig`]) and env loading.
//! - [`services::open_ai_service`]: non-streaming client for OpenAI-compatible
//!   `/v1/chat/completions` endpoints.
//! - [`error_handler`]: unified [`AiLlmError`] plus env/validation helpers.
//! - [`telemetry`]: tracing layer and filter helpers for the binary.

pub mod config;
pub mod error_handler;
pub mod services;
pub mod telemetry;

pub use config::llm_model_config::LlmModelConfig;
pub use error_handler::{AiLlmError, Result};
pub use services::open_ai_service::OpenAiService;
