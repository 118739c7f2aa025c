//! Single-site desktop browser shell.
//!
//! This crate wires the shell components together:
//! - Configuration
//! - Storage profile setup
//! - Presence reporting
//! - The toolbar front-end
//! - The native window and web view (feature `webview`)

#[cfg(feature = "webview")]
pub mod app;
pub mod config;
pub mod icon;
pub mod toolbar;
#[cfg(feature = "webview")]
pub mod webview;

pub use config::{ShellConfig, WindowGeometry};

use common::ShellResult;
use presence::{DiscordPresence, PresenceHandle, PresenceReporter};
use profile::{EngineProfile, HttpCacheMode, StorageProfile};

/// Shell version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Create the storage profile for `config`.
///
/// Directory creation failures are returned; startup should abort on them.
pub fn open_profile(config: &ShellConfig) -> ShellResult<StorageProfile> {
    let base = match &config.base_dir {
        Some(dir) => dir.clone(),
        None => profile::resolve_base_dir()?,
    };
    StorageProfile::create(base, &config.profile_settings())
}

/// Start presence reporting on the current tokio runtime.
///
/// Never fails: an unreachable service only stops the reporter.
pub fn start_presence(config: &ShellConfig) -> PresenceHandle {
    let client = DiscordPresence::new(config.presence.client_id.as_str());
    PresenceReporter::new(client, config.presence.clone()).spawn()
}

/// Engine profile settings the system web view cannot apply.
///
/// The web view always runs scripts, keeps local storage and caches HTTP
/// responses on disk under the profile directory.
pub fn ignored_engine_settings(engine: &EngineProfile) -> Vec<String> {
    let mut ignored = Vec::new();
    if !engine.javascript_enabled {
        ignored.push("JavaScript cannot be disabled".to_string());
    }
    if !engine.local_storage_enabled {
        ignored.push("local storage cannot be disabled".to_string());
    }
    if engine.cache_mode != HttpCacheMode::Disk {
        ignored.push(format!(
            "HTTP cache mode {:?} is not supported, responses are cached on disk",
            engine.cache_mode
        ));
    }
    ignored
}
