use serde::Serialize;

/// Body returned for every delivery that did not fail.
///
/// Serialized untagged: `{"status": ...}` or `{"msg": ...}`.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum GitHubWebhookResponse {
    /// A review comment was posted.
    Posted { status: &'static str },
    /// The delivery was valid but not something we act on.
    Skipped { msg: String },
}

impl GitHubWebhookResponse {
    pub fn posted() -> Self {
        Self::Posted {
            status: "review posted",
        }
    }

    pub fn skipped(reason: impl ToString) -> Self {
        Self::Skipped {
            msg: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_shapes() {
        assert_eq!(
            serde_json::to_value(GitHubWebhookResponse::posted()).unwrap(),
            json!({ "status": "review posted" })
        );
        assert_eq!(
            serde_json::to_value(GitHubWebhookResponse::skipped("Action 'closed' not handled"))
                .unwrap(),
            json!({ "msg": "Action 'closed' not handled" })
        );
    }
}
