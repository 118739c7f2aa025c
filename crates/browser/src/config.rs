//! Shell configuration.

use std::path::PathBuf;

use presence::PresenceConfig;
use profile::{HttpCacheMode, ProfileSettings};
use ui::{DownloadResolver, ShellOptions, ToolbarLayout};

use crate::VERSION;

/// Window placement, in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            x: 100,
            y: 100,
            width: 1200,
            height: 1000,
        }
    }
}

/// Shell configuration.
///
/// Built once at startup and passed down; nothing reads global state.
#[derive(Clone, Debug)]
pub struct ShellConfig {
    /// Application name, shown in the title bar.
    pub app_name: String,
    /// Application version.
    pub version: String,
    /// Home page.
    pub home_url: String,
    /// Storage profile name.
    pub profile_name: String,
    /// Downloads directory name.
    pub downloads_dir: String,
    /// Directory holding profile and downloads. `None` uses the executable's directory.
    pub base_dir: Option<PathBuf>,
    /// Window placement.
    pub geometry: WindowGeometry,
    /// Toolbar geometry.
    pub toolbar: ToolbarLayout,
    /// HTTP cache mode.
    pub cache_mode: HttpCacheMode,
    /// Whether JavaScript is enabled.
    pub javascript_enabled: bool,
    /// Whether local storage is enabled.
    pub local_storage_enabled: bool,
    /// Whether scripts may open new windows.
    pub javascript_can_open_windows: bool,
    /// Window icon file names, tried in order next to the executable.
    pub icon_files: Vec<String>,
    /// Limit on numbered download name alternatives.
    pub max_download_probes: Option<u32>,
    /// Presence reporting.
    pub presence: PresenceConfig,
}

impl ShellConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Window title.
    pub fn window_title(&self) -> String {
        format!("{} {}", self.app_name, self.version)
    }

    /// Set home page.
    pub fn with_home_url(mut self, home_url: &str) -> Self {
        self.home_url = home_url.to_string();
        self
    }

    /// Set base directory.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Set presence configuration.
    pub fn with_presence(mut self, presence: PresenceConfig) -> Self {
        self.presence = presence;
        self
    }

    /// Set download probe limit.
    pub fn with_max_download_probes(mut self, max_probes: Option<u32>) -> Self {
        self.max_download_probes = max_probes;
        self
    }

    /// Storage profile settings.
    pub fn profile_settings(&self) -> ProfileSettings {
        ProfileSettings {
            name: self.profile_name.clone(),
            downloads_dir: self.downloads_dir.clone(),
            cache_mode: self.cache_mode,
            javascript_enabled: self.javascript_enabled,
            local_storage_enabled: self.local_storage_enabled,
            javascript_can_open_windows: self.javascript_can_open_windows,
        }
    }

    /// Window options for a profile whose downloads go to `download_dir`.
    pub fn shell_options(&self, download_dir: impl Into<PathBuf>) -> ShellOptions {
        ShellOptions {
            home_url: self.home_url.clone(),
            download_resolver: DownloadResolver::new(download_dir)
                .with_max_probes(self.max_download_probes),
            layout: self.toolbar,
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        let profile = ProfileSettings::default();

        Self {
            app_name: "E621 Client".to_string(),
            version: VERSION.to_string(),
            home_url: "https://e621.net/".to_string(),
            profile_name: profile.name,
            downloads_dir: profile.downloads_dir,
            base_dir: None,
            geometry: WindowGeometry::default(),
            toolbar: ToolbarLayout::default(),
            cache_mode: profile.cache_mode,
            javascript_enabled: profile.javascript_enabled,
            local_storage_enabled: profile.local_storage_enabled,
            javascript_can_open_windows: profile.javascript_can_open_windows,
            icon_files: vec!["icon.png".to_string(), "icon.ico".to_string()],
            max_download_probes: None,
            presence: PresenceConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ShellConfig::default();
        assert_eq!(config.home_url, "https://e621.net/");
        assert_eq!(config.profile_name, "e621-persistent-profile");
        assert_eq!(config.geometry.width, 1200);
        assert_eq!(config.geometry.height, 1000);
        assert!(config.max_download_probes.is_none());
        assert!(config.presence.enabled);
    }

    #[test]
    fn test_window_title() {
        let config = ShellConfig::default();
        assert_eq!(config.window_title(), format!("E621 Client {}", VERSION));
    }

    #[test]
    fn test_derived_settings() {
        let config = ShellConfig::new()
            .with_home_url("https://example.net/")
            .with_max_download_probes(Some(10));

        let settings = config.profile_settings();
        assert_eq!(settings.name, "e621-persistent-profile");
        assert_eq!(settings.cache_mode, HttpCacheMode::Disk);

        let options = config.shell_options("/tmp/downloads");
        assert_eq!(options.home_url, "https://example.net/");
        assert_eq!(options.download_resolver.directory(), std::path::Path::new("/tmp/downloads"));
        assert_eq!(options.download_resolver.max_probes(), Some(10));
    }
}
