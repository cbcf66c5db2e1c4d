use chrono::TimeDelta;
use std::path::PathBuf;

pub const DEFAULT_CERT_PATH: &str = "/etc/letsencrypt";
pub const DEFAULT_RETENTION_DAYS: u32 = 60;

/// What to do when a `live/*/*.pem` entry cannot be resolved to a real file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkPolicy {
    /// Fail the run before anything is deleted.
    #[default]
    Abort,
    /// Log the entry and leave it out of the retention set.
    Skip,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub retention_days: u32,
    pub link_policy: LinkPolicy,
}

impl Config {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self {
            root: root.unwrap_or_else(|| PathBuf::from(DEFAULT_CERT_PATH)),
            retention_days: DEFAULT_RETENTION_DAYS,
            link_policy: LinkPolicy::default(),
        }
    }

    pub fn with_retention_days(mut self, days: u32) -> Self {
        self.retention_days = days;
        self
    }

    pub fn with_link_policy(mut self, policy: LinkPolicy) -> Self {
        self.link_policy = policy;
        self
    }

    /// Age past which CSRs and keys are deleted.
    pub fn max_age(&self) -> TimeDelta {
        TimeDelta::days(i64::from(self.retention_days))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}
