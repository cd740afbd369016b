mod config;
mod error;
mod github;
mod http;
mod normalize;
mod output;
mod pipeline;
mod sources;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::HarvestConfig;
use crate::github::client::HttpGithubClient;
use crate::pipeline::Outcome;

#[derive(Parser)]
#[command(
    name = "prompt-harvest",
    about = "Harvest prompt cards from Banana Prompt Quicker into a gallery import file"
)]
struct Cli {
    /// Output directory (default: ./output, or HARVEST_OUTPUT_DIR)
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Skip downloading thumbnails of scraped cards
    #[arg(long)]
    no_images: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("prompt_harvest=info,reqwest=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true).with_bracketed_fields(false))
        .init();

    let mut config = HarvestConfig::from_env();
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if cli.no_images {
        config.download_images = false;
    }

    println!("Banana Prompt Quicker harvester");
    println!("Output directory: {}", config.output_dir.display());

    let http_client = http::build_client(&config)?;
    let github = HttpGithubClient::new(
        http_client.clone(),
        config.repo.clone(),
        config.page_timeout,
        config.probe_timeout,
    );

    match pipeline::run(&config, &http_client, &github).await? {
        Outcome::Written { path, source, count, images } => {
            tracing::info!(path = %path.display(), source = %source, count, images, "Harvest complete");
        }
        Outcome::NoData => {
            tracing::info!("Harvest finished without data");
        }
    }

    Ok(())
}
