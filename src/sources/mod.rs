pub mod data_file;
pub mod repo_files;
pub mod web_scrape;

use std::fmt;

/// A record as found upstream, before normalization. Always expected to be a
/// JSON object, but nothing upstream guarantees it.
pub type RawRecord = serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    DataFile,
    WebScrape,
    RepoFiles,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::DataFile => "data-file",
            SourceKind::WebScrape => "web-scrape",
            SourceKind::RepoFiles => "repo-files",
        };
        f.write_str(name)
    }
}

/// Records from whichever strategy succeeded first.
#[derive(Debug, Clone)]
pub struct Acquired {
    pub kind: SourceKind,
    pub records: Vec<RawRecord>,
}
