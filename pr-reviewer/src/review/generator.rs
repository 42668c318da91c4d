use ai_llm_service::{AiLlmError, OpenAiService};
use git_context_engine::ReviewConfig;
use tracing::debug;

use crate::review::prompt::build_review_prompt;

/// Turns a diff into review text with one chat-completion call.
#[derive(Debug, Clone)]
pub struct ReviewGenerator {
    llm: OpenAiService,
}

impl ReviewGenerator {
    pub fn new(llm: OpenAiService) -> Self {
        Self { llm }
    }

    /// Builds the prompt and returns the model's trimmed reply.
    pub async fn generate(&self, diff: &str, cfg: &ReviewConfig) -> Result<String, AiLlmError> {
        let prompt = build_review_prompt(diff, cfg);
        debug!(
            model = self.llm.model(),
            prompt_len = prompt.len(),
            "requesting review"
        );
        self.llm.generate(&prompt, None).await
    }
}
