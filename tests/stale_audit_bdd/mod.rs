//! Support modules for the stale audit BDD tests.

pub(crate) mod fixtures;
#[path = "../support/runtime.rs"]
pub(crate) mod runtime;
pub(crate) mod state;

pub(crate) use fixtures::{commit_json, issue_comment_json, pull_request_json, user_json};
pub(crate) use state::{AuditState, run_audit};
