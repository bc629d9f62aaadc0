use super::GitHubClient;
use crate::config::Config;
use crate::issue::{self, IssuePayload};
use anyhow::{Context, Result};
use serde::Deserialize;

/// The part of the create-issue response we care about.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CreatedIssue {
    pub number: u64,
    pub html_url: String,
}

pub async fn create_issue(client: &GitHubClient, payload: &IssuePayload) -> Result<CreatedIssue> {
    let response = client
        .post(&client.issues_url())
        .json(payload)
        .send()
        .await
        .context("Issue request failed")?;

    if !response.status().is_success() {
        return Err(anyhow::anyhow!(
            "Failed to create issue: HTTP {}",
            response.status()
        ));
    }

    response
        .json::<CreatedIssue>()
        .await
        .context("Unexpected create-issue response format")
}

/// Composes and posts the issue for `script_url`. Single attempt, no retry.
///
/// Returns `None` when anything goes wrong, after logging why.
pub async fn submit_issue(
    client: &GitHubClient,
    config: &Config,
    script_url: &str,
    sequence: u64,
) -> Option<CreatedIssue> {
    let template = match issue::load_template(&config.template_file) {
        Ok(template) => template,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "Failed to create GitHub issue");
            return None;
        }
    };
    let payload = issue::compose_issue(
        script_url,
        sequence,
        &template,
        &config.script_extension,
        &mut rand::thread_rng(),
    );
    tracing::debug!(title = %payload.title, labels = ?payload.labels, "Composed issue");

    match create_issue(client, &payload).await {
        Ok(created) => {
            tracing::info!(url = %created.html_url, number = created.number, "Issue created successfully");
            Some(created)
        }
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "Failed to create GitHub issue");
            None
        }
    }
}
