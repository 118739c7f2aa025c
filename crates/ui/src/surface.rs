//! Browser surface abstraction.
//!
//! The shell only needs a handful of operations from the web engine. Engines
//! implement [`BrowserSurface`] and report what happens on the page back to the
//! window as [`SurfaceEvent`]s.

use std::path::PathBuf;

use common::ShellResult;

use crate::downloads::DownloadRequest;

/// An embedded web view.
pub trait BrowserSurface {
    /// Load a URL.
    fn navigate(&mut self, url: &str) -> ShellResult<()>;

    /// Reload the current page.
    fn reload(&mut self) -> ShellResult<()>;

    /// Go one entry back in the page history.
    fn go_back(&mut self) -> ShellResult<()>;

    /// Go one entry forward in the page history.
    fn go_forward(&mut self) -> ShellResult<()>;

    /// Whether a back entry exists.
    fn can_go_back(&self) -> bool;

    /// Whether a forward entry exists.
    fn can_go_forward(&self) -> bool;

    /// Called once the engine has reported a new page URL.
    ///
    /// Engines that cannot be asked about their history use this to keep one.
    fn url_committed(&mut self, _url: &str) {}
}

/// Notifications delivered from the engine to the window.
#[derive(Debug)]
pub enum SurfaceEvent {
    /// The page URL changed.
    UrlChanged(String),
    /// The page started loading.
    LoadStarted,
    /// The page finished loading.
    LoadFinished,
    /// A download was resolved and accepted by the engine callback.
    DownloadStarted(DownloadRequest),
    /// A download finished.
    DownloadFinished {
        url: String,
        path: Option<PathBuf>,
        success: bool,
    },
}
