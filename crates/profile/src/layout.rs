//! On-disk layout of the storage profile.

use std::fs;
use std::path::{Path, PathBuf};

use common::{ShellError, ShellResult};

/// Name of the cache directory inside the profile directory.
pub const CACHE_DIR: &str = "cache";

/// Resolve the directory that holds the profile and downloads.
///
/// This is the directory of the running executable.
pub fn resolve_base_dir() -> ShellResult<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| ShellError::internal(format!("executable has no parent: {}", exe.display())))
}

/// Paths making up a storage profile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileLayout {
    base: PathBuf,
    profile: PathBuf,
    cache: PathBuf,
    downloads: PathBuf,
}

impl ProfileLayout {
    pub fn new(base: impl Into<PathBuf>, profile_name: &str, downloads_name: &str) -> Self {
        let base = base.into();
        let profile = base.join(profile_name);
        let cache = profile.join(CACHE_DIR);
        let downloads = base.join(downloads_name);

        Self {
            base,
            profile,
            cache,
            downloads,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Persistent storage (cookies, local storage).
    pub fn profile(&self) -> &Path {
        &self.profile
    }

    /// HTTP cache directory. Created by the engine, not by [`ensure`](Self::ensure).
    pub fn cache(&self) -> &Path {
        &self.cache
    }

    pub fn downloads(&self) -> &Path {
        &self.downloads
    }

    /// Create the profile and downloads directories if absent.
    ///
    /// Returns the directories that did not exist before the call. Any
    /// filesystem error is returned to the caller.
    pub fn ensure(&self) -> ShellResult<Vec<PathBuf>> {
        let mut created = Vec::new();

        for dir in [&self.profile, &self.downloads] {
            if !dir.is_dir() {
                created.push(dir.clone());
            }
            fs::create_dir_all(dir)?;
        }

        Ok(created)
    }
}
