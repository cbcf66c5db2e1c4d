use super::{delete_file, FileRemover, PassStats};
use crate::error::Result;
use crate::layout::CertLayout;
use crate::scan::{find_files, PemPattern};
use crate::util::format_age;
use chrono::{DateTime, TimeDelta, Utc};
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

/// Files that are only kept for a limited time after issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    Csr,
    Key,
}

impl FileClass {
    pub fn pattern(&self) -> PemPattern {
        match self {
            FileClass::Csr => PemPattern::CSR,
            FileClass::Key => PemPattern::KEYS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileClass::Csr => "CSRs",
            FileClass::Key => "Keys",
        }
    }
}

/// Returns whether a file last modified at `modified` is strictly older
/// than `max_age` at `now`. Files from the future never expire.
pub fn is_expired(modified: DateTime<Utc>, now: DateTime<Utc>, max_age: TimeDelta) -> bool {
    now.signed_duration_since(modified) > max_age
}

/// Converts a filesystem timestamp, returning `None` when it falls outside
/// the range `DateTime<Utc>` can represent.
pub fn modified_at(time: SystemTime) -> Option<DateTime<Utc>> {
    let epoch = DateTime::<Utc>::from_timestamp(0, 0)?;

    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => epoch.checked_add_signed(TimeDelta::from_std(after).ok()?),
        Err(e) => epoch.checked_sub_signed(TimeDelta::from_std(e.duration()).ok()?),
    }
}

pub struct AgePruner {
    class: FileClass,
    max_age: TimeDelta,
    now: DateTime<Utc>,
}

impl AgePruner {
    pub fn new(class: FileClass, max_age: TimeDelta, now: DateTime<Utc>) -> Self {
        Self {
            class,
            max_age,
            now,
        }
    }

    /// Deletes the files of this class older than the configured age.
    ///
    /// A file whose metadata cannot be read is logged and left alone.
    pub fn prune(&self, layout: &CertLayout, remover: &mut dyn FileRemover) -> Result<PassStats> {
        let mut stats = PassStats::default();

        for path in find_files(layout.root(), self.class.pattern())? {
            let modified = match fs::metadata(&path).and_then(|m| m.modified()) {
                Ok(t) => t,
                Err(e) => {
                    log::error!("Failed to stat {}: {}", path.display(), e);
                    stats.errors += 1;
                    continue;
                }
            };

            let Some(modified) = modified_at(modified) else {
                log::error!(
                    "Modification time of {} is out of range, skipping",
                    path.display()
                );
                stats.errors += 1;
                continue;
            };

            if !is_expired(modified, self.now, self.max_age) {
                log::debug!(
                    "keeping {} ({} old)",
                    path.display(),
                    format_age(self.now.signed_duration_since(modified))
                );
                continue;
            }

            delete_file(remover, &path, &mut stats);
        }

        log::info!(
            "{}: {} deleted, {} errors",
            self.class.as_str(),
            stats.deleted,
            stats.errors
        );

        Ok(stats)
    }
}
