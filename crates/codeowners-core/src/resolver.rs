// Locate or create the rules file in a directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Places GitHub reads CODEOWNERS from, in lookup order
pub const STANDARD_LOCATIONS: &[&str] = &[".github", ".", "docs"];

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Invalid file name '{0}'")]
    InvalidName(String),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub trait FileResolver {
    fn find_file(&self, name: &str) -> Option<PathBuf>;
    fn create_file(&self, name: &str, content: &str) -> Result<PathBuf, ResolveError>;
}

/// Resolves files inside a single directory
#[derive(Debug, Clone)]
pub struct FsResolver {
    dir: PathBuf,
}

impl FsResolver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn validate_name(name: &str) -> Result<(), ResolveError> {
    let plain = Path::new(name).file_name().map(|f| f == name).unwrap_or(false);
    if name.is_empty() || !plain {
        return Err(ResolveError::InvalidName(name.to_string()));
    }
    Ok(())
}

impl FileResolver for FsResolver {
    fn find_file(&self, name: &str) -> Option<PathBuf> {
        validate_name(name).ok()?;
        let path = self.dir.join(name);
        path.is_file().then_some(path)
    }

    fn create_file(&self, name: &str, content: &str) -> Result<PathBuf, ResolveError> {
        validate_name(name)?;
        if self.dir.exists() && !self.dir.is_dir() {
            return Err(ResolveError::NotADirectory(self.dir.clone()));
        }

        let path = self.dir.join(name);
        fs::create_dir_all(&self.dir)
            .and_then(|_| fs::write(&path, content))
            .map_err(|source| ResolveError::Create { path: path.clone(), source })?;

        tracing::debug!(path = %path.display(), "created rules file");
        Ok(path)
    }
}

/// Return the existing file named `name`, or create it empty
pub fn locate_or_create(resolver: &dyn FileResolver, name: &str) -> Result<PathBuf, ResolveError> {
    if let Some(existing) = resolver.find_file(name) {
        return Ok(existing);
    }
    resolver.create_file(name, "")
}

/// Find the rules file GitHub would use for the repository at `root`
pub fn discover_rules_file(root: &Path, name: &str) -> Option<PathBuf> {
    STANDARD_LOCATIONS
        .iter()
        .map(|dir| if *dir == "." { root.to_path_buf() } else { root.join(dir) })
        .find_map(|dir| FsResolver::new(dir).find_file(name))
}
