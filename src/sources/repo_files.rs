use serde_json::Value;

use super::RawRecord;
use crate::github::client::GithubClient;
use crate::github::models::TreeEntry;

const PATH_HINTS: &[&str] = &["prompt", "data"];

/// JSON blobs whose path hints at prompt data, in listing order.
pub fn candidate_paths(entries: &[TreeEntry]) -> Vec<String> {
    entries
        .iter()
        .filter(|entry| entry.is_blob())
        .filter(|entry| entry.path.ends_with(".json"))
        .filter(|entry| {
            let lower = entry.path.to_lowercase();
            PATH_HINTS.iter().any(|hint| lower.contains(hint))
        })
        .map(|entry| entry.path.clone())
        .collect()
}

/// Search the repository for the first JSON file holding a non-empty array.
pub async fn search(github: &dyn GithubClient) -> Option<Vec<RawRecord>> {
    let entries = match github.list_tree().await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "Failed to list repository files");
            return None;
        }
    };

    let candidates = candidate_paths(&entries);
    tracing::info!(count = candidates.len(), files = ?candidates, "Candidate data files");

    for path in &candidates {
        match github.fetch_raw_json(path).await {
            Ok(Value::Array(items)) if !items.is_empty() => {
                tracing::info!(path = %path, count = items.len(), "Found records in repository file");
                return Some(items);
            }
            Ok(_) => {
                tracing::debug!(path = %path, "Repository file is not a non-empty list");
            }
            Err(e) => {
                tracing::debug!(path = %path, error = %format!("{e:#}"), "Failed to read repository file");
            }
        }
    }

    None
}
