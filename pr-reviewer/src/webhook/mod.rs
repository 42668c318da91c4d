pub mod event;
pub mod signature;

pub use event::{EventDecision, IgnoreReason, PullRequestTarget, Rejection, classify};
pub use signature::{sign, verify_signature};
