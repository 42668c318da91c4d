use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State, http::HeaderMap};
use pr_reviewer::{Delivery, DeliveryOutcome};
use tracing::{error, instrument};

use crate::{
    core::app_state::AppState, error_handler::AppResult,
    routes::github_webhook::github_webhook_response::GitHubWebhookResponse,
};

pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";
pub const EVENT_HEADER: &str = "x-github-event";
pub const DELIVERY_HEADER: &str = "x-github-delivery";

/// POST /webhook
///
/// Receives GitHub deliveries. The raw body is kept as bytes so the
/// signature is checked over exactly what GitHub signed.
#[instrument(name = "github_webhook_route", skip_all)]
pub async fn github_webhook_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<GitHubWebhookResponse>> {
    let delivery = Delivery {
        event: header_str(&headers, EVENT_HEADER),
        signature: header_str(&headers, SIGNATURE_HEADER),
        delivery_id: header_str(&headers, DELIVERY_HEADER),
        body: &body,
    };

    let outcome = state.pipeline.handle(delivery).await.map_err(|err| {
        error!(error = %err, "review pipeline failed");
        err
    })?;

    match outcome {
        DeliveryOutcome::Accepted(_) => Ok(Json(GitHubWebhookResponse::posted())),
        DeliveryOutcome::Ignored(reason) => Ok(Json(GitHubWebhookResponse::skipped(reason))),
        DeliveryOutcome::Rejected(rejection) => Err(rejection.into()),
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|h| h.to_str().ok())
}
