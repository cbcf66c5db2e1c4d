use super::{delete_file, FileRemover, PassStats, RetentionSet};
use crate::error::Result;
use crate::layout::CertLayout;
use crate::scan::{find_files, normalize_path, PemPattern};

/// Deletes every `archive/*/*.pem` file no live symlink points at.
///
/// Archive files are compared by their own normalized path; a symlink in
/// the archive is judged as itself, not as whatever it points to. A file
/// whose path cannot be normalized is kept.
pub fn prune_archive(
    layout: &CertLayout,
    retention: &RetentionSet,
    remover: &mut dyn FileRemover,
) -> Result<PassStats> {
    let mut stats = PassStats::default();

    for path in find_files(layout.root(), PemPattern::ARCHIVE)? {
        let normalized = match normalize_path(&path) {
            Ok(p) => p,
            Err(e) => {
                log::error!("Failed to resolve {}: {}", path.display(), e);
                stats.errors += 1;
                continue;
            }
        };

        if retention.contains(&normalized) {
            log::debug!("keeping {}", path.display());
            continue;
        }

        delete_file(remover, &path, &mut stats);
    }

    log::info!("Archive: {} deleted, {} errors", stats.deleted, stats.errors);

    Ok(stats)
}
