//! Pull request review pipeline.
//!
//! Single entry point: [`ReviewPipeline::handle`], called once per webhook
//! delivery by the HTTP layer.
//!
//! 1) **Signature**: `X-Hub-Signature-256` checked against the shared secret
//! 2) **Filters**: only `pull_request` with opened/reopened/synchronize
//! 3) **Diff**: downloaded from the payload's `diff_url`
//! 4) **Config**: optional `.github/reviewbot.json`, defaults on any failure
//! 5) **Review**: one chat-completion call over the assembled prompt
//! 6) **Comment**: posted to the payload's `comments_url`
//!
//! Refusals and no-ops are values ([`DeliveryOutcome`]); only upstream
//! failures are errors ([`ReviewError`]).

pub mod errors;
pub mod pipeline;
pub mod review;
pub mod webhook;

pub use errors::{ReviewError, ReviewResult};
pub use pipeline::{
    COMMENT_HEADER, Delivery, DeliveryOutcome, PipelineSettings, ReviewPipeline, ReviewPosted,
};
pub use review::ReviewGenerator;
pub use webhook::{IgnoreReason, Rejection};
