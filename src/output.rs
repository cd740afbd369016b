use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::HarvestConfig;
use crate::error::HarvestError;
use crate::http;
use crate::normalize::PromptRecord;

/// Create the output directory and its images subdirectory.
pub fn prepare_dirs(config: &HarvestConfig) -> Result<(), HarvestError> {
    for dir in [config.output_dir.clone(), config.images_dir()] {
        std::fs::create_dir_all(&dir).map_err(|source| HarvestError::OutputDir {
            path: dir.clone(),
            source,
        })?;
    }
    tracing::info!(path = %config.output_dir.display(), "Output directory ready");
    Ok(())
}

/// Overwrite `path` with the records as indented UTF-8 JSON.
pub fn write_records(path: &Path, records: &[PromptRecord]) -> Result<(), HarvestError> {
    let content = serde_json::to_string_pretty(records)?;
    std::fs::write(path, content).map_err(|source| HarvestError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), count = records.len(), "Wrote records");
    Ok(())
}

/// Print the first record so a human can eyeball the output shape.
pub fn print_sample(records: &[PromptRecord]) -> Result<(), HarvestError> {
    if let Some(sample) = records.first() {
        println!("\nSample record:");
        println!("{}", serde_json::to_string_pretty(sample)?);
    }
    Ok(())
}

/// File name for a downloaded thumbnail: the last URL path segment, or
/// `<id>.jpg` when the URL has none.
pub fn image_file_name(url: &str, id: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or_default();
    let after_scheme = without_query
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(without_query);

    match after_scheme.split_once('/') {
        Some((_, path)) => {
            let segment = path.rsplit('/').next().unwrap_or_default();
            let safe = segment.chars().all(|c| c.is_ascii_alphanumeric() || "._-".contains(c));
            if !segment.is_empty() && segment != "." && segment != ".." && safe {
                return segment.to_string();
            }
            format!("{id}.jpg")
        }
        None => format!("{id}.jpg"),
    }
}

/// `name`, or `<id>_<name>` (then `<id>_<n>_<name>`) when an earlier image
/// of this run already took it.
fn unique_file_name(name: String, id: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(&name) {
        return name;
    }
    let prefixed = format!("{id}_{name}");
    if !taken.contains(&prefixed) {
        return prefixed;
    }
    (2..)
        .map(|n| format!("{id}_{n}_{name}"))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or(prefixed)
}

/// Download each record's thumbnail into `images_dir`. Failures are logged
/// and skipped. Returns the paths written, one distinct file per image.
pub async fn download_images(
    client: &reqwest::Client,
    records: &[PromptRecord],
    images_dir: &Path,
    timeout: Duration,
) -> Vec<PathBuf> {
    let mut saved = Vec::new();
    let mut taken = HashSet::new();

    for record in records {
        let url = record.thumbnail_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            continue;
        }

        let filename = unique_file_name(image_file_name(url, &record.id), &record.id, &taken);
        tracing::info!(file = %filename, "Downloading image");

        let bytes = match http::get_bytes(client, url, timeout).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(url = %url, error = %format!("{e:#}"), "Image download failed");
                continue;
            }
        };

        let path = images_dir.join(&filename);
        match std::fs::write(&path, &bytes) {
            Ok(()) => {
                taken.insert(filename);
                saved.push(path);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to save image");
            }
        }
    }

    saved
}
