//! Shared utilities for configuration resolution tests.

use std::fs;
use std::path::PathBuf;

use ircd::config::{load_config, ConfigError, Resolved, SearchPath};
use tempfile::TempDir;

/// A throwaway directory holding a set of configuration files.
pub struct ConfigTree {
    dir: TempDir,
}

impl ConfigTree {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Write `body` wrapped in an `<ircd>` root element.
    pub fn file(self, name: &str, body: &str) -> Self {
        self.raw(name, &format!("<ircd>\n{}\n</ircd>\n", body))
    }

    /// Write `contents` verbatim.
    pub fn raw(self, name: &str, contents: &str) -> Self {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
        self
    }

    pub fn path(&self, name: &str) -> PathBuf {
        fs::canonicalize(self.dir.path().join(name)).unwrap()
    }

    pub fn locator(&self) -> SearchPath {
        SearchPath::new(self.dir.path(), self.dir.path())
    }

    pub fn load(&self, name: &str) -> Result<Resolved, ConfigError> {
        load_config(Some(name), &self.locator())
    }
}

#[allow(dead_code)]
pub fn masks(resolved: &Resolved) -> Vec<&str> {
    resolved.settings.auth.iter().map(|r| r.mask.as_str()).collect()
}
