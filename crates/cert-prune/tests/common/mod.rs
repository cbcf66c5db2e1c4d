#![allow(dead_code)]

use std::fs::{self, File};
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

const DAY: u64 = 24 * 60 * 60;

/// A throwaway Let's Encrypt tree.
pub struct CertTree {
    pub temp_dir: TempDir,
}

impl CertTree {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().unwrap();
        for sub in ["live", "archive", "csr", "keys"] {
            fs::create_dir(temp_dir.path().join(sub)).unwrap();
        }
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Writes a PEM file whose modification time is `days` in the past.
    pub fn pem(&self, relative: &str, days: u64) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"-----BEGIN CERTIFICATE-----\n").unwrap();
        set_age(&path, days);
        path
    }

    /// Creates `live/<domain>/<name>` pointing at `target` with a relative
    /// link, the way certbot does.
    pub fn live_link(&self, domain: &str, name: &str, target: &str) -> PathBuf {
        let dir = self.path(&format!("live/{}", domain));
        fs::create_dir_all(&dir).unwrap();
        let link = dir.join(name);
        symlink(format!("../../archive/{}/{}", domain, target), &link).unwrap();
        link
    }

    pub fn exists(&self, relative: &str) -> bool {
        fs::symlink_metadata(self.path(relative)).is_ok()
    }
}

pub fn set_age(path: &Path, days: u64) {
    let mtime = SystemTime::now() - Duration::from_secs(days * DAY);
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();
}
