//! Filter separating human engagement from procedural comment noise.

use crate::github::IssueComment;

/// Substrings that mark a comment as automated or procedural.
const NOISE_MARKERS: [&str; 3] = ["PTAL", "CLA assistant ", "new-api-needs-documentation"];

/// Prefixes of ping-style comments that only redirect attention.
const NOISE_PREFIXES: [&str; 4] = ["@", "Tagging ", "cc", "ping "];

/// Returns true when the comment body counts as engagement.
///
/// Matching is case-sensitive. A comment without a body is relevant.
#[must_use]
pub fn is_relevant_body(body: &str) -> bool {
    !NOISE_MARKERS.iter().any(|marker| body.contains(marker))
        && !NOISE_PREFIXES.iter().any(|prefix| body.starts_with(prefix))
}

/// Returns true when `comment` counts as engagement.
#[must_use]
pub fn is_relevant(comment: &IssueComment) -> bool {
    comment.body.as_deref().is_none_or(is_relevant_body)
}
