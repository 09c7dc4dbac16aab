// Shared helpers for integration tests that run commands in a temp directory

use std::env;
use std::path::{Path, PathBuf};

/// RAII guard that changes the working directory and restores it on drop
pub struct ChangeDir {
    original: PathBuf,
}

impl ChangeDir {
    pub fn new(path: &Path) -> Self {
        let original = env::current_dir().unwrap();
        env::set_current_dir(path).unwrap();
        Self { original }
    }
}

impl Drop for ChangeDir {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.original);
    }
}
