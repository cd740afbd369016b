use std::io;
use std::path::PathBuf;

/// Errors that abort a harvest run.
///
/// Everything else (a dead candidate URL, a malformed card, a failed image
/// download) is logged where it happens and never reaches this type.
#[derive(thiserror::Error, Debug)]
pub enum HarvestError {
    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("serialization: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("http client: {0}")]
    Client(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_dir_displays_path() {
        let err = HarvestError::OutputDir {
            path: PathBuf::from("/readonly/output"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert_eq!(
            err.to_string(),
            "failed to create output directory /readonly/output: permission denied"
        );
    }

    #[test]
    fn write_displays_path() {
        let err = HarvestError::Write {
            path: PathBuf::from("out/banana_prompts.json"),
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
        };
        assert_eq!(err.to_string(), "failed to write out/banana_prompts.json: disk full");
    }
}
