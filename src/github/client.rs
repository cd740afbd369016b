use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use super::models::{TreeEntry, TreeResponse};
use crate::config::RepoConfig;
use crate::http;

#[async_trait]
pub trait GithubClient: Send + Sync {
    /// Full recursive file listing of the configured branch.
    async fn list_tree(&self) -> Result<Vec<TreeEntry>>;
    /// Raw content of one repository file, parsed as JSON.
    async fn fetch_raw_json(&self, path: &str) -> Result<serde_json::Value>;
}

pub struct HttpGithubClient {
    client: Client,
    repo: RepoConfig,
    tree_timeout: Duration,
    raw_timeout: Duration,
}

impl HttpGithubClient {
    pub fn new(client: Client, repo: RepoConfig, tree_timeout: Duration, raw_timeout: Duration) -> Self {
        Self {
            client,
            repo,
            tree_timeout,
            raw_timeout,
        }
    }
}

#[async_trait]
impl GithubClient for HttpGithubClient {
    async fn list_tree(&self) -> Result<Vec<TreeEntry>> {
        let RepoConfig {
            owner, repo, branch, api_base, ..
        } = &self.repo;
        let url = format!("{api_base}/repos/{owner}/{repo}/git/trees/{branch}");
        let resp = self
            .client
            .get(&url)
            .query(&[("recursive", "1")])
            .timeout(self.tree_timeout)
            .send()
            .await
            .context("failed to fetch repository tree")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("GitHub API error {status} listing {owner}/{repo}: {body}");
        }

        let listing: TreeResponse = resp.json().await.context("failed to parse tree listing")?;
        if listing.truncated {
            tracing::warn!(repo = %self.repo.full_name(), "Tree listing truncated by GitHub");
        }
        Ok(listing.tree)
    }

    async fn fetch_raw_json(&self, path: &str) -> Result<serde_json::Value> {
        let url = self.repo.raw_url(path);
        http::get_json(&self.client, &url, self.raw_timeout).await
    }
}
