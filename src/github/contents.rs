use super::GitHubClient;
use anyhow::{Context, Result};
use serde::Deserialize;

/// One entry of the `/contents/{dir}` listing.
///
/// Directories and submodules come back with a null `download_url`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RemoteFile {
    pub name: String,
    pub download_url: Option<String>,
}

/// Download URLs of the entries whose name ends with `extension`, in listing order.
pub fn script_urls<'a>(
    files: &'a [RemoteFile],
    extension: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    files
        .iter()
        .filter(move |file| file.name.ends_with(extension))
        .filter_map(|file| file.download_url.as_deref())
}

/// Fetches the first page of the directory listing.
pub async fn fetch_contents(client: &GitHubClient, dir: &str) -> Result<Vec<RemoteFile>> {
    let url = client.contents_url(dir);
    let response = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("Request to {url} failed"))?;

    if !response.status().is_success() {
        return Err(anyhow::anyhow!(
            "Failed to list {dir}: HTTP {}",
            response.status()
        ));
    }

    response
        .json::<Vec<RemoteFile>>()
        .await
        .context("Unexpected contents listing format")
}

/// Lists the script download URLs, or `None` when the listing is unavailable.
pub async fn list_script_urls(
    client: &GitHubClient,
    dir: &str,
    extension: &str,
) -> Option<Vec<String>> {
    match fetch_contents(client, dir).await {
        Ok(files) => {
            let urls: Vec<String> = script_urls(&files, extension)
                .map(str::to_string)
                .collect();
            tracing::info!(count = urls.len(), dir, "Fetched scripts from GitHub");
            Some(urls)
        }
        Err(err) => {
            tracing::error!(dir, error = %format!("{err:#}"), "Failed to fetch script files from GitHub");
            None
        }
    }
}
