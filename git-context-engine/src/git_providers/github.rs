//! GitHub provider (REST v3) for diffs, repository config and PR comments.
//!
//! Endpoints used:
//!   * GET  <pull_request.diff_url>                      (diff media type)
//!   * GET  /repos/{owner}/{repo}/contents/{path}?ref={ref}
//!   * POST <pull_request.comments_url>                  (issue comments)

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{GitContextEngineError, GitContextEngineProviderError, GitContextEngineResult};
use crate::git_providers::types::*;

/// GitHub HTTP client wrapper.
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    base_api: String, // "https://api.github.com"
    token: String,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_api", &self.base_api)
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Constructs a GitHub client with a shared HTTP instance and auth token.
    pub fn new(http: Client, base_api: String, token: String) -> Self {
        debug!("Creating GitHubClient with base_api={}", base_api);
        Self {
            http,
            base_api,
            token,
        }
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Downloads the unified diff of a pull request.
    ///
    /// `diff_url` is taken verbatim from the webhook payload. Redirects are
    /// followed by the underlying client.
    pub async fn fetch_pr_diff(&self, diff_url: &str) -> GitContextEngineResult<String> {
        debug!("GitHub fetch_pr_diff: {}", diff_url);

        let resp = self
            .http
            .get(diff_url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/vnd.github.v3.diff")
            .send()
            .await?;

        let resp = ensure_success(resp, "fetch_pr_diff").await?;
        let text = resp.text().await?;

        debug!(bytes = text.len(), "GitHub diff downloaded");
        Ok(text)
    }

    /// Looks up [`REVIEW_CONFIG_PATH`] in `repo` ("owner/name") at `branch`.
    ///
    /// Never fails: every problem is folded into a [`ConfigLookup`] variant.
    pub async fn fetch_review_config(&self, repo: &str, branch: &str) -> ConfigLookup {
        let url = match self.contents_url(repo, REVIEW_CONFIG_PATH) {
            Ok(u) => u,
            Err(e) => return ConfigLookup::FetchError(e.to_string()),
        };
        debug!("GitHub fetch_review_config: url={}, ref={}", url, branch);

        let resp = match self
            .http
            .get(&url)
            .query(&[("ref", branch)])
            .header("Authorization", self.auth_header())
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return ConfigLookup::FetchError(e.to_string()),
        };

        match resp.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return ConfigLookup::NotFound,
            other => return ConfigLookup::FetchError(format!("status {}", other.as_u16())),
        }

        let file: GitHubContentFile = match resp.json().await {
            Ok(f) => f,
            Err(e) => return ConfigLookup::Invalid(format!("contents response: {e}")),
        };

        match decode_config_content(&file) {
            Ok(cfg) => ConfigLookup::Found(cfg),
            Err(reason) => ConfigLookup::Invalid(reason),
        }
    }

    /// Posts `body` as a conversation comment on the pull request.
    ///
    /// `comments_url` is the PR's issue-comments endpoint from the payload.
    pub async fn post_issue_comment(
        &self,
        comments_url: &str,
        body: &str,
    ) -> GitContextEngineResult<()> {
        debug!(
            "GitHub post_issue_comment: url={}, len={}",
            comments_url,
            body.len()
        );

        let resp = self
            .http
            .post(comments_url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/vnd.github+json")
            .json(&GitHubIssueCommentCreate { body })
            .send()
            .await?;

        let resp = ensure_success(resp, "post_issue_comment").await?;
        let _ = resp.bytes().await;

        info!("posted review comment to {}", comments_url);
        Ok(())
    }

    fn contents_url(&self, repo: &str, path: &str) -> GitContextEngineResult<String> {
        let (owner, name) = split_owner_repo(repo)?;
        let encoded_path = path
            .split('/')
            .map(|seg| urlencoding::encode(seg).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        Ok(format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_api,
            urlencoding::encode(&owner),
            urlencoding::encode(&name),
            encoded_path
        ))
    }
}

/// Turns a non-2xx response into a provider error (with `Retry-After` for 429).
async fn ensure_success(resp: Response, op: &str) -> GitContextEngineResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let retry_after = resp
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    let url = resp.url().to_string();
    warn!(%status, %url, op, "GitHub request failed");

    Err(GitContextEngineProviderError::from_status(status.as_u16(), retry_after).into())
}

fn decode_config_content(file: &GitHubContentFile) -> Result<ReviewConfig, String> {
    if let Some(enc) = file.encoding.as_deref() {
        if enc != "base64" {
            return Err(format!("unsupported encoding `{enc}`"));
        }
    }
    let packed: String = file
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let raw = STANDARD
        .decode(packed.as_bytes())
        .map_err(|e| format!("base64: {e}"))?;
    serde_json::from_slice::<ReviewConfig>(&raw).map_err(|e| format!("json: {e}"))
}

/// Splits "owner/repo" into its parts.
fn split_owner_repo(project: &str) -> GitContextEngineResult<(String, String)> {
    let mut parts = project.trim().splitn(2, '/');
    let owner = parts.next().unwrap_or_default();
    let repo = parts.next().unwrap_or_default();

    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return Err(GitContextEngineError::Validation(format!(
            "expected repository as \"owner/repo\", got \"{project}\""
        )));
    }
    Ok((owner.to_string(), repo.to_string()))
}

#[derive(Debug, Deserialize)]
struct GitHubContentFile {
    content: String,
    #[serde(default)]
    encoding: Option<String>,
}

#[derive(Debug, Serialize)]
struct GitHubIssueCommentCreate<'a> {
    body: &'a str,
}
