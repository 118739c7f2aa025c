//! Engine profile settings and binding.

use std::path::{Path, PathBuf};

use common::ShellResult;

use crate::layout::ProfileLayout;

/// HTTP cache mode requested from the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HttpCacheMode {
    /// Cache is kept in memory only.
    Memory,
    /// Cache is written below the profile's cache directory.
    #[default]
    Disk,
    /// No HTTP cache.
    Disabled,
}

/// Settings for a storage profile.
#[derive(Clone, Debug)]
pub struct ProfileSettings {
    /// Profile name, also the profile directory name.
    pub name: String,
    /// Downloads directory name.
    pub downloads_dir: String,
    /// HTTP cache mode.
    pub cache_mode: HttpCacheMode,
    /// Whether JavaScript is enabled.
    pub javascript_enabled: bool,
    /// Whether local storage is enabled.
    pub local_storage_enabled: bool,
    /// Whether scripts may open new windows.
    pub javascript_can_open_windows: bool,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            name: "e621-persistent-profile".to_string(),
            downloads_dir: "downloads".to_string(),
            cache_mode: HttpCacheMode::Disk,
            javascript_enabled: true,
            local_storage_enabled: true,
            javascript_can_open_windows: true,
        }
    }
}

/// Everything the engine needs to bind its profile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineProfile {
    pub name: String,
    pub storage_path: PathBuf,
    pub cache_path: PathBuf,
    pub cache_mode: HttpCacheMode,
    pub download_path: PathBuf,
    pub javascript_enabled: bool,
    pub local_storage_enabled: bool,
    pub javascript_can_open_windows: bool,
}

/// A created storage profile.
///
/// Lives for the whole process; nothing is removed on drop.
#[derive(Debug)]
pub struct StorageProfile {
    layout: ProfileLayout,
    engine: EngineProfile,
    created: Vec<PathBuf>,
}

impl StorageProfile {
    /// Create the profile below `base`.
    ///
    /// Directory creation failures are returned; callers treat them as fatal.
    pub fn create(base: impl Into<PathBuf>, settings: &ProfileSettings) -> ShellResult<Self> {
        let layout = ProfileLayout::new(base, &settings.name, &settings.downloads_dir);
        let created = layout.ensure()?;

        for dir in &created {
            tracing::info!("Created profile directory: {}", dir.display());
        }

        let engine = EngineProfile {
            name: settings.name.clone(),
            storage_path: layout.profile().to_path_buf(),
            cache_path: layout.cache().to_path_buf(),
            cache_mode: settings.cache_mode,
            download_path: layout.downloads().to_path_buf(),
            javascript_enabled: settings.javascript_enabled,
            local_storage_enabled: settings.local_storage_enabled,
            javascript_can_open_windows: settings.javascript_can_open_windows,
        };

        tracing::info!(
            "Storage profile '{}' bound to {} (cache: {}, {:?})",
            engine.name,
            engine.storage_path.display(),
            engine.cache_path.display(),
            engine.cache_mode
        );

        Ok(Self {
            layout,
            engine,
            created,
        })
    }

    pub fn layout(&self) -> &ProfileLayout {
        &self.layout
    }

    /// Engine binding for this profile.
    pub fn engine(&self) -> &EngineProfile {
        &self.engine
    }

    pub fn download_dir(&self) -> &Path {
        self.layout.downloads()
    }

    /// Directories created by [`create`](Self::create).
    pub fn created_dirs(&self) -> &[PathBuf] {
        &self.created
    }

    /// Whether this is the first launch with this profile.
    pub fn is_fresh(&self) -> bool {
        self.created.iter().any(|dir| dir == self.layout.profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = ProfileSettings::default();
        assert_eq!(settings.cache_mode, HttpCacheMode::Disk);
        assert!(settings.javascript_enabled);
        assert!(settings.local_storage_enabled);
        assert!(settings.javascript_can_open_windows);
    }

    #[test]
    fn test_create_binds_engine_profile() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ProfileSettings {
            name: "test-profile".to_string(),
            ..ProfileSettings::default()
        };

        let profile = StorageProfile::create(dir.path(), &settings).unwrap();
        let engine = profile.engine();

        assert_eq!(engine.storage_path, dir.path().join("test-profile"));
        assert_eq!(engine.cache_path, dir.path().join("test-profile").join("cache"));
        assert_eq!(engine.download_path, dir.path().join("downloads"));
        assert_eq!(engine.cache_mode, HttpCacheMode::Disk);
        assert!(profile.is_fresh());
    }

    #[test]
    fn test_second_launch_reuses_directories() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ProfileSettings::default();

        let first = StorageProfile::create(dir.path(), &settings).unwrap();
        assert_eq!(first.created_dirs().len(), 2);

        std::fs::write(first.download_dir().join("kept.png"), b"data").unwrap();

        let second = StorageProfile::create(dir.path(), &settings).unwrap();
        assert!(second.created_dirs().is_empty());
        assert!(!second.is_fresh());
        assert!(second.download_dir().join("kept.png").exists());
    }
}
