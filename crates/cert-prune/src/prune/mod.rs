pub mod aged;
pub mod archive;
pub mod live;

pub use aged::{is_expired, AgePruner, FileClass};
pub use archive::prune_archive;
pub use live::{collect_live_set, RetentionSet};

use crate::config::Config;
use crate::error::Result;
use crate::layout::CertLayout;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

/// Counters for a single pruning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassStats {
    pub deleted: usize,
    pub errors: usize,
}

/// Outcome of a full run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub certificates: PassStats,
    pub csrs: PassStats,
    pub keys: PassStats,
    pub unresolved_links: usize,
}

impl RunSummary {
    pub fn total_deleted(&self) -> usize {
        self.certificates.deleted + self.csrs.deleted + self.keys.deleted
    }

    pub fn total_errors(&self) -> usize {
        self.certificates.errors + self.csrs.errors + self.keys.errors + self.unresolved_links
    }
}

/// Removes files on behalf of the pruning passes.
pub trait FileRemover {
    fn remove(&mut self, path: &Path) -> io::Result<()>;
}

/// Deletes straight from the filesystem.
#[derive(Debug, Default)]
pub struct FsRemover;

impl FileRemover for FsRemover {
    fn remove(&mut self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

/// Runs every pass against `config.root` and deletes from disk.
pub fn run(config: &Config) -> Result<RunSummary> {
    let layout = CertLayout::open(&config.root)?;
    run_with(&layout, config, &mut FsRemover, Utc::now())
}

/// Runs every pass against an already validated layout.
///
/// The live set is collected before the archive is touched. Ages are
/// measured against `now` for both CSRs and keys.
pub fn run_with(
    layout: &CertLayout,
    config: &Config,
    remover: &mut dyn FileRemover,
    now: DateTime<Utc>,
) -> Result<RunSummary> {
    let retention = collect_live_set(layout, config.link_policy)?;
    for path in retention.iter() {
        log::debug!("retaining {}", path.display());
    }
    log::info!(
        "{} certificates referenced from {}",
        retention.len(),
        layout.root().join("live").display()
    );

    let certificates = prune_archive(layout, &retention, remover)?;
    let csrs = AgePruner::new(FileClass::Csr, config.max_age(), now).prune(layout, remover)?;
    let keys = AgePruner::new(FileClass::Key, config.max_age(), now).prune(layout, remover)?;

    Ok(RunSummary {
        certificates,
        csrs,
        keys,
        unresolved_links: retention.unresolved().len(),
    })
}

fn delete_file(remover: &mut dyn FileRemover, path: &Path, stats: &mut PassStats) {
    log::debug!("deleting {}", path.display());

    match remover.remove(path) {
        Ok(()) => stats.deleted += 1,
        Err(e) => {
            log::error!("Failed to delete {}: {}", path.display(), e);
            stats.errors += 1;
        }
    }
}
