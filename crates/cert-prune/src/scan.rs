//! Enumeration of the PEM files a pruning pass works on.
//!
//! Patterns are written relative to the certificate root, e.g.
//! `archive/*/*.pem`. The first segment names the directory that is walked,
//! and the walk is pinned to exactly the depth of the remaining segments, so
//! `*` never crosses a directory boundary.

use crate::error::{CertPruneError, Result};
use globset::GlobBuilder;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PemPattern(&'static str);

impl PemPattern {
    pub const LIVE: PemPattern = PemPattern("live/*/*.pem");
    pub const ARCHIVE: PemPattern = PemPattern("archive/*/*.pem");
    pub const CSR: PemPattern = PemPattern("csr/*.pem");
    pub const KEYS: PemPattern = PemPattern("keys/*.pem");

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    fn base_dir(&self) -> &'static str {
        self.0.split('/').next().unwrap_or(self.0)
    }

    fn depth(&self) -> usize {
        self.0.split('/').count() - 1
    }
}

impl fmt::Display for PemPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Lists the entries under `root` matching `pattern`, sorted by path.
///
/// Intermediate directories are entered even when they are symlinks, so a
/// symlinked `live/<domain>` is listed like a real one. Leaf entries are
/// never followed: symlinks come back as-is, including dangling ones, and
/// directories are never returned. Any error while walking is fatal:
/// without a complete listing no retention decision is safe.
pub fn find_files<P: AsRef<Path>>(root: P, pattern: PemPattern) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    let matcher = GlobBuilder::new(pattern.as_str())
        .literal_separator(true)
        .build()?
        .compile_matcher();

    let mut dirs = vec![root.join(pattern.base_dir())];
    for _ in 1..pattern.depth() {
        let mut next = Vec::new();
        for dir in &dirs {
            for entry in list_dir(dir, true) {
                let entry = entry.map_err(|source| enumerate_error(root, pattern, source))?;
                if entry.file_type().is_dir() {
                    next.push(entry.into_path());
                }
            }
        }
        dirs = next;
    }

    let mut files = Vec::new();

    for dir in &dirs {
        for entry in list_dir(dir, false) {
            let entry = entry.map_err(|source| enumerate_error(root, pattern, source))?;

            if entry.file_type().is_dir() {
                continue;
            }

            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if matcher.is_match(relative) {
                files.push(entry.into_path());
            }
        }
    }

    log::debug!("{} matched {} files", pattern, files.len());

    Ok(files)
}

fn list_dir(dir: &Path, follow_links: bool) -> walkdir::IntoIter {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(follow_links)
        .sort_by_file_name()
        .into_iter()
}

fn enumerate_error(root: &Path, pattern: PemPattern, source: walkdir::Error) -> CertPruneError {
    CertPruneError::Enumerate {
        pattern: root.join(pattern.as_str()).display().to_string(),
        source,
    }
}

/// Makes `path` absolute and free of symlinks in every component except the
/// last one, so an archive file compares equal to a resolved live target
/// without following the archive file itself.
pub fn normalize_path<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let path = path.as_ref();
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no file name", path.display()),
        )
    })?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    Ok(fs::canonicalize(parent)?.join(file_name))
}
