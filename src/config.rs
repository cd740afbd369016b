use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_SITE_URL: &str = "https://glidea.github.io/banana-prompt-quicker/";
const DEFAULT_OWNER: &str = "glidea";
const DEFAULT_REPO: &str = "banana-prompt-quicker";
const DEFAULT_BRANCH: &str = "main";
const DEFAULT_OUTPUT_DIR: &str = "output";

/// Repository-relative paths where a pre-built prompt export may live.
const DATA_FILE_PATHS: &[&str] = &[
    "data/prompts.json",
    "src/data/prompts.json",
    "public/data/prompts.json",
    "prompts.json",
];

pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                              AppleWebKit/537.36 (KHTML, like Gecko) \
                              Chrome/120.0.0.0 Safari/537.36";
pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
pub const ACCEPT_LANGUAGE: &str = "zh-CN,zh;q=0.9,en;q=0.8";

/// Upstream repository identity.
#[derive(Debug, Clone)]
pub struct RepoConfig {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Base of the hosting API, e.g. `https://api.github.com`.
    pub api_base: String,
    /// Base for raw file content, always ending in `/`.
    pub raw_base: String,
}

impl RepoConfig {
    pub fn github(owner: &str, repo: &str, branch: &str) -> Self {
        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            branch: branch.to_string(),
            api_base: "https://api.github.com".to_string(),
            raw_base: format!("https://raw.githubusercontent.com/{owner}/{repo}/{branch}/"),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    pub fn raw_url(&self, path: &str) -> String {
        format!("{}{}", self.raw_base, path.trim_start_matches('/'))
    }
}

/// Everything a harvest run needs. Built once in `main` and passed down.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub site_url: String,
    pub repo: RepoConfig,
    /// Ordered candidate URLs for the data-file prober.
    pub data_file_urls: Vec<String>,
    pub output_dir: PathBuf,
    pub output_file_name: String,
    pub images_dir_name: String,
    /// Value written to every record's `source` field.
    pub source_name: String,
    /// Prefix for ids of HTML-scraped cards.
    pub id_prefix: String,
    pub default_author: String,
    pub download_images: bool,
    pub connect_timeout: Duration,
    /// Data-file candidates and raw repository files.
    pub probe_timeout: Duration,
    /// Site root page, tree listing and image downloads.
    pub page_timeout: Duration,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        let repo = RepoConfig::github(DEFAULT_OWNER, DEFAULT_REPO, DEFAULT_BRANCH);
        let data_file_urls: Vec<String> = DATA_FILE_PATHS.iter().map(|p| repo.raw_url(p)).collect();

        Self {
            site_url: DEFAULT_SITE_URL.to_string(),
            repo,
            data_file_urls,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_file_name: "banana_prompts.json".to_string(),
            images_dir_name: "images".to_string(),
            source_name: DEFAULT_REPO.to_string(),
            id_prefix: "banana".to_string(),
            default_author: "Banana社区".to_string(),
            download_images: true,
            connect_timeout: Duration::from_secs(10),
            probe_timeout: Duration::from_secs(10),
            page_timeout: Duration::from_secs(30),
        }
    }
}

impl HarvestConfig {
    pub fn from_env() -> Self {
        Self::from_raw_values(
            std::env::var("HARVEST_OUTPUT_DIR").ok().as_deref(),
            std::env::var("HARVEST_SITE_URL").ok().as_deref(),
            std::env::var("HARVEST_DOWNLOAD_IMAGES").ok().as_deref(),
        )
    }

    /// Build a config from raw string values (as they would come from env vars).
    /// Used directly in tests to avoid mutating process-global environment.
    pub fn from_raw_values(
        output_dir: Option<&str>,
        site_url: Option<&str>,
        download_images: Option<&str>,
    ) -> Self {
        let mut config = Self::default();

        if let Some(dir) = output_dir.filter(|s| !s.is_empty()) {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(url) = site_url.filter(|s| !s.is_empty()) {
            config.site_url = url.to_string();
        }
        if let Some(flag) = download_images {
            match flag.trim().to_ascii_lowercase().as_str() {
                "0" | "false" | "no" | "off" => config.download_images = false,
                "1" | "true" | "yes" | "on" => config.download_images = true,
                _ => {}
            }
        }

        config
    }

    pub fn output_file(&self) -> PathBuf {
        self.output_dir.join(&self.output_file_name)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.output_dir.join(&self.images_dir_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_candidates_follow_raw_base() {
        let config = HarvestConfig::default();
        assert_eq!(config.data_file_urls.len(), 4);
        assert_eq!(
            config.data_file_urls[0],
            "https://raw.githubusercontent.com/glidea/banana-prompt-quicker/main/data/prompts.json"
        );
        assert_eq!(
            config.data_file_urls[3],
            "https://raw.githubusercontent.com/glidea/banana-prompt-quicker/main/prompts.json"
        );
    }

    #[test]
    fn test_default_paths() {
        let config = HarvestConfig::default();
        assert_eq!(config.output_file(), PathBuf::from("output/banana_prompts.json"));
        assert_eq!(config.images_dir(), PathBuf::from("output/images"));
    }

    #[test]
    fn test_from_raw_values_defaults() {
        let config = HarvestConfig::from_raw_values(None, None, None);
        assert_eq!(config.site_url, DEFAULT_SITE_URL);
        assert!(config.download_images);
        assert_eq!(config.probe_timeout, Duration::from_secs(10));
        assert_eq!(config.page_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_from_raw_values_output_dir() {
        let config = HarvestConfig::from_raw_values(Some("/tmp/harvest"), None, None);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/harvest"));
    }

    #[test]
    fn test_from_raw_values_empty_output_dir_ignored() {
        let config = HarvestConfig::from_raw_values(Some(""), None, None);
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn test_from_raw_values_disable_images() {
        let config = HarvestConfig::from_raw_values(None, None, Some("false"));
        assert!(!config.download_images);
        let config = HarvestConfig::from_raw_values(None, None, Some("0"));
        assert!(!config.download_images);
    }

    #[test]
    fn test_from_raw_values_garbage_flag_keeps_default() {
        let config = HarvestConfig::from_raw_values(None, None, Some("maybe"));
        assert!(config.download_images);
    }

    #[test]
    fn test_raw_url_strips_leading_slash() {
        let repo = RepoConfig::github("o", "r", "main");
        assert_eq!(
            repo.raw_url("/data/x.json"),
            "https://raw.githubusercontent.com/o/r/main/data/x.json"
        );
        assert_eq!(repo.full_name(), "o/r");
    }
}
