pub mod contents;
pub mod issues;

use crate::config::Config;
use anyhow::{Context, Result};

const USER_AGENT: &str = "scriptcue";
const ACCEPT: &str = "application/vnd.github.v3+json";
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Thin wrapper around `reqwest::Client` bound to one repository.
#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
    owner: String,
    repo: String,
    token: String,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(GitHubClient {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            token: config.access_token.clone(),
        })
    }

    /// `GET /repos/{owner}/{repo}/contents/{dir}`
    pub fn contents_url(&self, dir: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_url,
            self.owner,
            self.repo,
            dir.trim_matches('/')
        )
    }

    /// `POST /repos/{owner}/{repo}/issues`
    pub fn issues_url(&self) -> String {
        format!("{}/repos/{}/{}/issues", self.base_url, self.owner, self.repo)
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.http
            .get(url)
            .bearer_auth(&self.token)
            .header("Accept", ACCEPT)
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.http
            .post(url)
            .bearer_auth(&self.token)
            .header("Accept", ACCEPT)
    }
}
