//! Event and action filtering for incoming deliveries.

use std::fmt;

use serde::Deserialize;

/// The only event type that triggers a review.
pub const PULL_REQUEST_EVENT: &str = "pull_request";

/// Pull request actions that trigger a review.
pub const HANDLED_ACTIONS: [&str; 3] = ["opened", "reopened", "synchronize"];

/// Subset of GitHub's webhook payload the bot reads.
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    pub action: Option<String>,
    pub pull_request: Option<PullRequestPayload>,
    pub repository: Option<RepositoryPayload>,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestPayload {
    pub number: Option<u64>,
    pub diff_url: Option<String>,
    pub comments_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryPayload {
    pub full_name: Option<String>,
}

/// Everything the pipeline needs about the pull request under review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestTarget {
    pub action: String,
    pub number: Option<u64>,
    pub diff_url: String,
    pub comments_url: String,
    /// `owner/name` when the payload carries it.
    pub repository: Option<String>,
}

/// Why a well-formed delivery was accepted without doing anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    Event(String),
    Action(String),
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreReason::Event(e) => write!(f, "Event '{e}' not handled"),
            IgnoreReason::Action(a) => write!(f, "Action '{a}' not handled"),
        }
    }
}

/// Why a delivery was refused before any outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Signature missing or wrong.
    Unauthorized,
    /// Required header/field missing, unparsable body, or empty diff.
    Malformed(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Unauthorized => f.write_str("invalid signature"),
            Rejection::Malformed(msg) => f.write_str(msg),
        }
    }
}

/// Result of running the event and action filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDecision {
    Review(PullRequestTarget),
    Ignore(IgnoreReason),
}

/// Applies the event filter, then the action filter, then extracts the PR
/// fields.
///
/// Non-`pull_request` events are ignored without looking at the body.
pub fn classify(event: Option<&str>, body: &[u8]) -> Result<EventDecision, Rejection> {
    let event = match event.map(str::trim) {
        Some(e) if !e.is_empty() => e,
        _ => return Err(Rejection::Malformed("missing X-GitHub-Event header".into())),
    };
    if event != PULL_REQUEST_EVENT {
        return Ok(EventDecision::Ignore(IgnoreReason::Event(event.to_string())));
    }

    let payload: WebhookPayload = serde_json::from_slice(body)
        .map_err(|e| Rejection::Malformed(format!("invalid JSON payload: {e}")))?;

    let action = payload
        .action
        .ok_or_else(|| Rejection::Malformed("missing field `action`".into()))?;
    if !HANDLED_ACTIONS.contains(&action.as_str()) {
        return Ok(EventDecision::Ignore(IgnoreReason::Action(action)));
    }

    let pr = payload
        .pull_request
        .ok_or_else(|| Rejection::Malformed("missing field `pull_request`".into()))?;
    let diff_url = non_empty(pr.diff_url)
        .ok_or_else(|| Rejection::Malformed("missing field `pull_request.diff_url`".into()))?;
    let comments_url = non_empty(pr.comments_url).ok_or_else(|| {
        Rejection::Malformed("missing field `pull_request.comments_url`".into())
    })?;

    Ok(EventDecision::Review(PullRequestTarget {
        action,
        number: pr.number,
        diff_url,
        comments_url,
        repository: payload.repository.and_then(|r| non_empty(r.full_name)),
    }))
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}
