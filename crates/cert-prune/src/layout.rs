use crate::error::{CertPruneError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Subdirectories every Let's Encrypt working tree carries.
pub const CERT_SUBDIRS: [&str; 4] = ["live", "archive", "csr", "keys"];

/// Returns whether `path` looks like a Let's Encrypt folder.
///
/// The root and each of [`CERT_SUBDIRS`] must be directories. Symlinks to
/// directories are accepted since metadata is read through them.
pub fn is_cert_dir<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    is_dir(path) && CERT_SUBDIRS.iter().all(|sub| is_dir(&path.join(sub)))
}

fn is_dir(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

/// A validated certificate tree rooted at a canonical absolute path.
#[derive(Debug, Clone)]
pub struct CertLayout {
    root: PathBuf,
}

impl CertLayout {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !is_cert_dir(path) {
            return Err(CertPruneError::InvalidLayout(path.to_path_buf()));
        }

        let root = fs::canonicalize(path)?;
        log::debug!("Using certificate root {}", root.display());

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
