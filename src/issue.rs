use anyhow::{Context, Result};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::path::Path;

/// Labels attached to every issue. Their order is shuffled per issue.
pub const LABELS: &[&str] = &[
    "good first issue",
    "first-timers-only",
    "auto-review",
    "no-code",
    "easy",
    "GSOC",
    "hacktoberfest",
    "GSOC-2024",
];

const TITLE_PREFIX: &str = "Create a Python video from the script #";
const BODY_LEAD_IN: &str =
    "Check out this Python script and create a short video explaining how it works:";

/// JSON body of `POST /repos/{owner}/{repo}/issues`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct IssuePayload {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}

/// Final path segment of `url` when it mentions `extension`.
///
/// Query strings and fragments are not part of the path and are ignored.
pub fn display_name<'a>(url: &'a str, extension: &str) -> Option<&'a str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/')
        .next()
        .filter(|segment| !extension.is_empty() && segment.contains(extension))
}

pub fn issue_title(url: &str, sequence: u64, extension: &str) -> String {
    match display_name(url, extension) {
        Some(name) => format!("{TITLE_PREFIX}{name}"),
        None => format!("{TITLE_PREFIX}{sequence}"),
    }
}

pub fn issue_body(url: &str, template: &str) -> String {
    format!("{BODY_LEAD_IN}\n\n{url}\n\n{template}")
}

pub fn shuffled_labels<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    let mut labels: Vec<String> = LABELS.iter().map(|label| label.to_string()).collect();
    labels.shuffle(rng);
    labels
}

/// Builds the issue for the script at `url`, the `sequence`-th of the rotation (1-based).
pub fn compose_issue<R: Rng + ?Sized>(
    url: &str,
    sequence: u64,
    template: &str,
    extension: &str,
    rng: &mut R,
) -> IssuePayload {
    IssuePayload {
        title: issue_title(url, sequence, extension),
        body: issue_body(url, template),
        labels: shuffled_labels(rng),
    }
}

pub fn load_template(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read issue template {}", path.display()))
}
