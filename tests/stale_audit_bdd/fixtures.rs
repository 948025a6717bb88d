//! JSON payloads shaped like GitHub REST responses.

use serde_json::{Value, json};

pub(crate) fn pull_request_json(
    number: u64,
    draft: bool,
    labels: &[&str],
    assignees: &[&str],
) -> Value {
    let labels: Vec<Value> = labels.iter().map(|name| json!({ "name": name })).collect();
    let assignees: Vec<Value> = assignees
        .iter()
        .map(|login| json!({ "login": login }))
        .collect();

    json!({
        "number": number,
        "title": format!("Community change {number}"),
        "html_url": format!("https://github.com/dotnet/runtime/pull/{number}"),
        "created_at": "2025-01-01T09:30:00Z",
        "draft": draft,
        "labels": labels,
        "assignees": assignees,
        "head": { "sha": format!("sha{number}") }
    })
}

pub(crate) fn commit_json(sha: &str, date: &str) -> Value {
    json!({
        "sha": sha,
        "commit": {
            "author": { "name": "Contributor", "date": format!("{date}T08:00:00Z") },
            "committer": { "name": "GitHub", "date": format!("{date}T08:00:00Z") }
        }
    })
}

pub(crate) fn issue_comment_json(id: u64, date: &str, body: &str) -> Value {
    json!({
        "id": id,
        "created_at": format!("{date}T12:00:00Z"),
        "body": body,
        "user": { "login": "maintainer" }
    })
}

pub(crate) fn user_json(login: &str, name: &str) -> Value {
    json!({ "login": login, "name": name })
}
