use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CertPruneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] globset::Error),

    #[error("Path \"{}\" does not look like a Let's Encrypt folder", .0.display())]
    InvalidLayout(PathBuf),

    #[error("Failed to enumerate {pattern}: {source}")]
    Enumerate {
        pattern: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("Cannot resolve live certificate {}: {source}", .path.display())]
    BrokenLiveLink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CertPruneError>;
