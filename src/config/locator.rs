//! Logical file name lookup.
//!
//! # Search order
//! 1. the name as given (absolute, or relative to the working directory)
//! 2. relative to the install directory
//! 3. relative to `config/` under the working directory
//! 4. relative to `config/` under the install directory
//!
//! Only regular files are accepted. The first hit wins.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Subdirectory searched for configuration files.
pub const SETTINGS_DIR: &str = "config";

/// Resolves a logical file name to an absolute path.
pub trait FileLocator {
    fn find(&self, name: &str) -> Option<PathBuf>;
}

/// Fixed search path rooted at a working directory and an install directory.
#[derive(Debug, Clone)]
pub struct SearchPath {
    working_dir: PathBuf,
    install_dir: PathBuf,
}

impl SearchPath {
    pub fn new(working_dir: impl Into<PathBuf>, install_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            install_dir: install_dir.into(),
        }
    }

    /// Search path for the running process: the current directory and the
    /// directory holding the executable.
    pub fn from_env() -> std::io::Result<Self> {
        let working_dir = env::current_dir()?;
        let install_dir = env::current_exe()?
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| working_dir.clone());
        Ok(Self::new(working_dir, install_dir))
    }

    fn candidates(&self, name: &str) -> [PathBuf; 4] {
        [
            self.working_dir.join(name),
            self.install_dir.join(name),
            self.working_dir.join(SETTINGS_DIR).join(name),
            self.install_dir.join(SETTINGS_DIR).join(name),
        ]
    }
}

impl FileLocator for SearchPath {
    fn find(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }

        self.candidates(name).into_iter().find_map(|candidate| {
            let metadata = fs::metadata(&candidate).ok()?;
            if !metadata.is_file() {
                return None;
            }
            fs::canonicalize(&candidate).ok()
        })
    }
}
