//! Browser UI shell.
//!
//! This crate provides the engine-independent part of the window:
//! - Address bar and input normalization
//! - Navigation controls and toolbar layout
//! - Navigation history tracking
//! - The browser surface abstraction
//! - Download filename resolution
//! - The window model tying them together

pub mod address_bar;
pub mod downloads;
pub mod history;
pub mod navigation;
pub mod surface;
pub mod window;

pub use address_bar::{normalize_input, UrlBar};
pub use downloads::{DownloadManager, DownloadRequest, DownloadResolver};
pub use history::NavigationHistory;
pub use navigation::{NavigationAction, NavigationBar, ToolbarLayout};
pub use surface::{BrowserSurface, SurfaceEvent};
pub use window::{ShellOptions, ShellWindow};
