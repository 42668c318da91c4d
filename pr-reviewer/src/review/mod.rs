//! Prompt assembly and the LLM call that produces the review text.

pub mod generator;
pub mod prompt;

pub use generator::ReviewGenerator;
pub use prompt::{DEFAULT_FOCUS_AREAS, NO_ISSUES_SENTINEL, build_review_prompt};
