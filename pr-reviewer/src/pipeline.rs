//! The per-delivery review sequence.
//!
//! signature → event filter → action filter → diff → config → LLM → comment.
//! Every step is awaited before the next one starts; there are no retries.

use std::time::Instant;

use git_context_engine::{ConfigLookup, DEFAULT_CONFIG_BRANCH, GitHubClient};
use tracing::{debug, info, instrument, warn};

use crate::{
    errors::ReviewResult,
    review::ReviewGenerator,
    webhook::{EventDecision, IgnoreReason, PullRequestTarget, Rejection, classify, verify_signature},
};

/// First line of every posted comment.
pub const COMMENT_HEADER: &str = "🤖 **AI Code Review Bot says:**";

/// Diff size above which a warning is logged when no limit is configured.
pub const DEFAULT_DIFF_WARN_BYTES: usize = 100_000;

/// Knobs that do not belong to any single client.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Repository used for the config lookup when the payload names none.
    pub fallback_repository: Option<String>,
    /// Ref the config file is read from.
    pub config_branch: String,
    /// Diffs larger than this are still sent, but logged as oversized.
    pub diff_warn_bytes: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            fallback_repository: None,
            config_branch: DEFAULT_CONFIG_BRANCH.to_string(),
            diff_warn_bytes: DEFAULT_DIFF_WARN_BYTES,
        }
    }
}

/// One inbound webhook request, as seen by the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Delivery<'a> {
    pub event: Option<&'a str>,
    pub signature: Option<&'a str>,
    pub delivery_id: Option<&'a str>,
    pub body: &'a [u8],
}

/// What happened to a delivery that did not hit an upstream failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Accepted(ReviewPosted),
    Ignored(IgnoreReason),
    Rejected(Rejection),
}

/// Summary of a posted review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPosted {
    pub comments_url: String,
    pub config_source: &'static str,
    pub review_len: usize,
}

/// Shared, immutable pipeline state. Build once, share via `Arc`.
pub struct ReviewPipeline {
    webhook_secret: String,
    github: GitHubClient,
    generator: ReviewGenerator,
    settings: PipelineSettings,
}

impl ReviewPipeline {
    pub fn new(
        webhook_secret: String,
        github: GitHubClient,
        generator: ReviewGenerator,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            webhook_secret,
            github,
            generator,
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Runs the whole sequence for one delivery.
    ///
    /// # Errors
    /// Only upstream failures (diff download, LLM call, comment post) are
    /// returned as errors. Refused and ignored deliveries come back as
    /// [`DeliveryOutcome`] values and never reach the network.
    #[instrument(
        name = "review_delivery",
        skip_all,
        fields(delivery = delivery.delivery_id.unwrap_or("-"), event = delivery.event.unwrap_or("-"))
    )]
    pub async fn handle(&self, delivery: Delivery<'_>) -> ReviewResult<DeliveryOutcome> {
        if !verify_signature(&self.webhook_secret, delivery.body, delivery.signature) {
            warn!(
                has_signature = delivery.signature.is_some(),
                "webhook signature rejected"
            );
            return Ok(DeliveryOutcome::Rejected(Rejection::Unauthorized));
        }

        let target = match classify(delivery.event, delivery.body) {
            Ok(EventDecision::Review(t)) => t,
            Ok(EventDecision::Ignore(reason)) => {
                info!(%reason, "delivery ignored");
                return Ok(DeliveryOutcome::Ignored(reason));
            }
            Err(rejection) => {
                warn!(%rejection, "delivery rejected");
                return Ok(DeliveryOutcome::Rejected(rejection));
            }
        };

        self.review(target).await
    }

    async fn review(&self, target: PullRequestTarget) -> ReviewResult<DeliveryOutcome> {
        let started = Instant::now();
        info!(
            action = %target.action,
            pr = ?target.number,
            repository = target.repository.as_deref().unwrap_or("-"),
            "starting review"
        );

        let diff = self.github.fetch_pr_diff(&target.diff_url).await?;
        if diff.trim().is_empty() {
            warn!(diff_url = %target.diff_url, "pull request diff is empty");
            return Ok(DeliveryOutcome::Rejected(Rejection::Malformed(
                "pull request diff is empty".into(),
            )));
        }
        if diff.len() > self.settings.diff_warn_bytes {
            warn!(
                bytes = diff.len(),
                limit = self.settings.diff_warn_bytes,
                "diff exceeds size hint; sending unmodified"
            );
        }

        let lookup = self.lookup_config(&target).await;
        let config_source = lookup.as_ref().map_or("skipped", ConfigLookup::kind);
        match &lookup {
            Some(ConfigLookup::FetchError(e)) | Some(ConfigLookup::Invalid(e)) => {
                warn!(config = config_source, error = %e, "review config unusable; using defaults")
            }
            _ => debug!(config = config_source, "review config resolved"),
        }
        let cfg = lookup.map(ConfigLookup::into_config).unwrap_or_default();

        let review = self.generator.generate(&diff, &cfg).await?;
        let body = format!("{COMMENT_HEADER}\n\n{review}");

        self.github
            .post_issue_comment(&target.comments_url, &body)
            .await?;

        info!(
            pr = ?target.number,
            config = config_source,
            review_len = review.len(),
            latency_ms = started.elapsed().as_millis(),
            "review posted"
        );

        Ok(DeliveryOutcome::Accepted(ReviewPosted {
            comments_url: target.comments_url,
            config_source,
            review_len: review.len(),
        }))
    }

    async fn lookup_config(&self, target: &PullRequestTarget) -> Option<ConfigLookup> {
        let repo = target
            .repository
            .as_deref()
            .or(self.settings.fallback_repository.as_deref())?;
        Some(
            self.github
                .fetch_review_config(repo, &self.settings.config_branch)
                .await,
        )
    }
}
