use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};

use crate::config::HarvestConfig;
use crate::error::HarvestError;
use crate::github::client::GithubClient;
use crate::normalize;
use crate::output;
use crate::sources::{Acquired, SourceKind, data_file, repo_files, web_scrape};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written {
        path: PathBuf,
        source: SourceKind,
        count: usize,
        images: usize,
    },
    /// No strategy produced any records; nothing was written.
    NoData,
}

/// One harvest run: prepare directories, acquire, normalize, write.
pub async fn run(
    config: &HarvestConfig,
    http_client: &reqwest::Client,
    github: &dyn GithubClient,
) -> Result<Outcome, HarvestError> {
    output::prepare_dirs(config)?;

    let harvested_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    let Some(acquired) = acquire(config, http_client, github, &harvested_at).await else {
        tracing::warn!("No prompt data from any source; check the site structure manually");
        println!("\nNo prompt data found. Nothing was written.");
        return Ok(Outcome::NoData);
    };
    tracing::info!(source = %acquired.kind, count = acquired.records.len(), "Acquired raw records");

    let records = normalize::normalize_all(&acquired.records, config, &harvested_at);

    let path = config.output_file();
    output::write_records(&path, &records)?;

    let images = if acquired.kind == SourceKind::WebScrape && config.download_images {
        output::download_images(http_client, &records, &config.images_dir(), config.page_timeout)
            .await
            .len()
    } else {
        0
    };

    println!("\nSaved {} prompts to {}", records.len(), path.display());
    output::print_sample(&records)?;

    Ok(Outcome::Written {
        path,
        source: acquired.kind,
        count: records.len(),
        images,
    })
}

/// Try each acquisition strategy in order; the first that yields records wins.
async fn acquire(
    config: &HarvestConfig,
    http_client: &reqwest::Client,
    github: &dyn GithubClient,
    harvested_at: &str,
) -> Option<Acquired> {
    tracing::info!("Strategy 1: probing data files");
    if let Some(payload) = data_file::probe(http_client, &config.data_file_urls, config.probe_timeout).await {
        let records = data_file::extract_records(payload);
        if !records.is_empty() {
            return Some(Acquired {
                kind: SourceKind::DataFile,
                records,
            });
        }
        tracing::info!("Data file carried no records");
    }

    tracing::info!("Strategy 2: scraping site");
    match web_scrape::fetch_page(http_client, &config.site_url, config.page_timeout).await {
        Ok(html) => match web_scrape::parse_cards(&html, config, harvested_at) {
            Ok(records) if !records.is_empty() => {
                return Some(Acquired {
                    kind: SourceKind::WebScrape,
                    records,
                });
            }
            Ok(_) => tracing::info!("No cards found on site"),
            Err(e) => tracing::warn!(error = %format!("{e:#}"), "Failed to parse site"),
        },
        Err(e) => tracing::warn!(url = %config.site_url, error = %format!("{e:#}"), "Failed to scrape site"),
    }

    tracing::info!("Strategy 3: searching repository files");
    repo_files::search(github).await.map(|records| Acquired {
        kind: SourceKind::RepoFiles,
        records,
    })
}
