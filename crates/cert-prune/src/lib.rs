pub mod config;
pub mod error;
pub mod layout;
pub mod prune;
pub mod scan;
pub mod util;

pub use config::{Config, LinkPolicy};
pub use error::{CertPruneError, Result};
pub use layout::{is_cert_dir, CertLayout};
pub use prune::{
    collect_live_set, prune_archive, run, AgePruner, FileClass, FileRemover, FsRemover,
    PassStats, RetentionSet, RunSummary,
};
pub use scan::{find_files, normalize_path, PemPattern};
