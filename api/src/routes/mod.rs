pub mod github_webhook;
pub mod health;
