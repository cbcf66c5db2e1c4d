use crate::config::LinkPolicy;
use crate::error::{CertPruneError, Result};
use crate::layout::CertLayout;
use crate::scan::{find_files, PemPattern};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Canonical paths of the archive files that live symlinks point at.
#[derive(Debug, Clone, Default)]
pub struct RetentionSet {
    paths: HashSet<PathBuf>,
    unresolved: Vec<PathBuf>,
}

impl RetentionSet {
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Live entries that were skipped because they could not be resolved.
    pub fn unresolved(&self) -> &[PathBuf] {
        &self.unresolved
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }
}

/// Resolves every `live/*/*.pem` entry to its canonical target.
///
/// With [`LinkPolicy::Abort`] the first unresolvable entry fails the run.
/// With [`LinkPolicy::Skip`] it is logged and recorded in
/// [`RetentionSet::unresolved`], and whatever it used to point at is no
/// longer protected.
pub fn collect_live_set(layout: &CertLayout, policy: LinkPolicy) -> Result<RetentionSet> {
    let mut set = RetentionSet::default();

    for path in find_files(layout.root(), PemPattern::LIVE)? {
        match fs::canonicalize(&path) {
            Ok(target) => {
                log::debug!("{} -> {}", path.display(), target.display());
                set.paths.insert(target);
            }
            Err(source) => match policy {
                LinkPolicy::Abort => {
                    return Err(CertPruneError::BrokenLiveLink { path, source });
                }
                LinkPolicy::Skip => {
                    log::error!("Cannot resolve {}: {}", path.display(), source);
                    set.unresolved.push(path);
                }
            },
        }
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::CERT_SUBDIRS;
    use std::os::unix::fs::symlink;
    use tempfile::TempDir;

    fn create_layout() -> (TempDir, CertLayout) {
        let temp_dir = TempDir::new().unwrap();
        for sub in CERT_SUBDIRS {
            fs::create_dir(temp_dir.path().join(sub)).unwrap();
        }
        fs::create_dir(temp_dir.path().join("live/example.com")).unwrap();
        fs::create_dir(temp_dir.path().join("archive/example.com")).unwrap();
        let layout = CertLayout::open(temp_dir.path()).unwrap();
        (temp_dir, layout)
    }

    #[test]
    fn test_collects_relative_symlink_targets() {
        let (_temp_dir, layout) = create_layout();
        let root = layout.root();
        fs::write(root.join("archive/example.com/cert1.pem"), b"cert").unwrap();
        fs::write(root.join("archive/example.com/privkey1.pem"), b"key").unwrap();
        symlink(
            "../../archive/example.com/cert1.pem",
            root.join("live/example.com/cert.pem"),
        )
        .unwrap();
        symlink(
            "../../archive/example.com/privkey1.pem",
            root.join("live/example.com/privkey.pem"),
        )
        .unwrap();

        let set = collect_live_set(&layout, LinkPolicy::Abort).unwrap();

        assert_eq!(set.len(), 2);
        assert!(set.contains(&root.join("archive/example.com/cert1.pem")));
        assert!(set.contains(&root.join("archive/example.com/privkey1.pem")));
        assert!(set.unresolved().is_empty());
    }

    #[test]
    fn test_follows_symlink_chains() {
        let (_temp_dir, layout) = create_layout();
        let root = layout.root();
        fs::write(root.join("archive/example.com/cert2.pem"), b"cert").unwrap();
        symlink(
            root.join("archive/example.com/cert2.pem"),
            root.join("archive/example.com/current.pem"),
        )
        .unwrap();
        symlink(
            root.join("archive/example.com/current.pem"),
            root.join("live/example.com/cert.pem"),
        )
        .unwrap();

        let set = collect_live_set(&layout, LinkPolicy::Abort).unwrap();

        assert!(set.contains(&root.join("archive/example.com/cert2.pem")));
        assert!(!set.contains(&root.join("archive/example.com/current.pem")));
    }

    #[test]
    fn test_duplicate_targets_collapse() {
        let (_temp_dir, layout) = create_layout();
        let root = layout.root();
        fs::write(root.join("archive/example.com/fullchain1.pem"), b"cert").unwrap();
        for name in ["fullchain.pem", "chain.pem"] {
            symlink(
                root.join("archive/example.com/fullchain1.pem"),
                root.join("live/example.com").join(name),
            )
            .unwrap();
        }

        let set = collect_live_set(&layout, LinkPolicy::Abort).unwrap();
        assert_eq!(set.len(), 1);
        let target = root.join("archive/example.com/fullchain1.pem");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![target.as_path()]);
    }

    #[test]
    fn test_broken_link_aborts() {
        let (_temp_dir, layout) = create_layout();
        let root = layout.root();
        let link = root.join("live/example.com/cert.pem");
        symlink(root.join("archive/example.com/cert9.pem"), &link).unwrap();

        match collect_live_set(&layout, LinkPolicy::Abort) {
            Err(CertPruneError::BrokenLiveLink { path, .. }) => assert_eq!(path, link),
            other => panic!("Expected BrokenLiveLink, got {:?}", other),
        }
    }

    #[test]
    fn test_broken_link_skipped() {
        let (_temp_dir, layout) = create_layout();
        let root = layout.root();
        fs::write(root.join("archive/example.com/chain1.pem"), b"chain").unwrap();
        symlink(
            root.join("archive/example.com/chain1.pem"),
            root.join("live/example.com/chain.pem"),
        )
        .unwrap();
        let broken = root.join("live/example.com/cert.pem");
        symlink(root.join("archive/example.com/cert9.pem"), &broken).unwrap();

        let set = collect_live_set(&layout, LinkPolicy::Skip).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.unresolved(), &[broken]);
    }

    #[test]
    fn test_empty_live_dir() {
        let (_temp_dir, layout) = create_layout();
        let set = collect_live_set(&layout, LinkPolicy::Abort).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
    }
}
