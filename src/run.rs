use crate::config::Config;
use crate::github::{self, GitHubClient};
use crate::output;
use crate::storage::{self, FileStateStorage, StateStorage};

/// What a single invocation ended up doing.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// An issue was created for the script at `index`.
    ///
    /// `state_saved` is false when the issue exists but the new index could
    /// not be written, in which case the next run picks the same script again.
    Created {
        index: usize,
        sequence: u64,
        issue_url: String,
        state_saved: bool,
    },
    /// The listing failed or matched no scripts. Nothing was posted or saved.
    NoScripts,
    /// Submission failed. The state was left untouched.
    SubmissionFailed { index: usize },
}

/// Stored index actually used for this run.
///
/// A value at or past `file_count` (the directory shrank, or the rotation
/// completed a lap) restarts the rotation from 0.
pub fn effective_last_index(last_index: u64, file_count: usize) -> u64 {
    if last_index >= file_count as u64 { 0 } else { last_index }
}

/// Position of the next script: `last_index mod file_count`.
///
/// Returns `None` when there are no files to choose from.
pub fn select_index(last_index: u64, file_count: usize) -> Option<usize> {
    last_index
        .checked_rem(file_count as u64)
        .map(|index| index as usize)
}

/// Creates the issue for the next script in the rotation.
///
/// Remote and state-file failures are logged and reflected in the returned
/// outcome. Only building the HTTP client or writing the summary line can
/// produce an `Err`.
pub async fn run(
    config: &Config,
    stdout_additional: Option<&mut dyn std::io::Write>,
) -> anyhow::Result<RunOutcome> {
    let client = GitHubClient::new(config)?;
    let storage = FileStateStorage::new(&config.state_file);
    run_with(&client, &storage, config, stdout_additional).await
}

/// Runs once if the configuration could be resolved.
///
/// An incomplete configuration is logged as a failed run and yields `None`.
pub async fn run_from(
    config: anyhow::Result<Config>,
    stdout_additional: Option<&mut dyn std::io::Write>,
) -> anyhow::Result<Option<RunOutcome>> {
    match config {
        Ok(config) => run(&config, stdout_additional).await.map(Some),
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "Configuration incomplete, no issue created");
            Ok(None)
        }
    }
}

pub async fn run_with(
    client: &GitHubClient,
    state: &dyn StateStorage,
    config: &Config,
    mut stdout_additional: Option<&mut dyn std::io::Write>,
) -> anyhow::Result<RunOutcome> {
    let script_urls = github::contents::list_script_urls(
        client,
        &config.scripts_dir,
        &config.script_extension,
    )
    .await
    .unwrap_or_default();
    if script_urls.is_empty() {
        tracing::error!("Script URLs could not be fetched, exiting");
        output::println("No scripts available, nothing to do.", &mut stdout_additional)?;
        return Ok(RunOutcome::NoScripts);
    }

    let last_index = effective_last_index(storage::read_last_index(state), script_urls.len());
    let index = select_index(last_index, script_urls.len()).unwrap_or(0);
    let script_url = &script_urls[index];
    let sequence = last_index.saturating_add(1);
    tracing::info!(index, sequence, url = %script_url, "Processing script");

    let outcome = match github::issues::submit_issue(client, config, script_url, sequence).await {
        Some(created) => {
            let state_saved = storage::write_last_index(state, sequence);
            output::println(
                &format!("Issue created: {}", created.html_url),
                &mut stdout_additional,
            )?;
            RunOutcome::Created {
                index,
                sequence,
                issue_url: created.html_url,
                state_saved,
            }
        }
        None => {
            tracing::error!("Failed to create the issue, state file left unchanged");
            output::println("Issue creation failed.", &mut stdout_additional)?;
            RunOutcome::SubmissionFailed { index }
        }
    };
    Ok(outcome)
}
