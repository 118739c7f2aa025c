//! Browser window.

use std::path::PathBuf;

use common::ShellResult;

use crate::address_bar::UrlBar;
use crate::downloads::{DownloadManager, DownloadRequest, DownloadResolver};
use crate::navigation::{NavigationAction, NavigationBar, ToolbarLayout};
use crate::surface::{BrowserSurface, SurfaceEvent};

/// Construction options for [`ShellWindow`].
#[derive(Clone, Debug)]
pub struct ShellOptions {
    /// Page loaded at startup and by the home button.
    pub home_url: String,
    /// Download name resolution. Engine callbacks that cannot reach the window
    /// resolve with a clone of this resolver.
    pub download_resolver: DownloadResolver,
    /// Toolbar geometry.
    pub layout: ToolbarLayout,
}

/// Browser window.
///
/// Owns the browser surface and the toolbar state. All methods run on the UI
/// thread.
pub struct ShellWindow<S: BrowserSurface> {
    /// Web view.
    surface: S,
    /// Navigation bar.
    navigation_bar: NavigationBar,
    /// Address bar.
    url_bar: UrlBar,
    /// Download name resolution.
    resolver: DownloadResolver,
    /// Download records.
    downloads: DownloadManager,
    /// Toolbar geometry.
    layout: ToolbarLayout,
    /// Home page.
    home_url: String,
}

impl<S: BrowserSurface> ShellWindow<S> {
    /// Create a window around `surface`.
    pub fn new(surface: S, options: ShellOptions) -> Self {
        let mut window = Self {
            surface,
            navigation_bar: NavigationBar::new(),
            url_bar: UrlBar::new(),
            resolver: options.download_resolver,
            downloads: DownloadManager::new(),
            layout: options.layout,
            home_url: options.home_url,
        };
        window.sync_navigation_bar();
        window
    }

    /// Get the surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Get the surface mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Get the address bar.
    pub fn url_bar(&self) -> &UrlBar {
        &self.url_bar
    }

    /// Get the navigation bar.
    pub fn navigation_bar(&self) -> &NavigationBar {
        &self.navigation_bar
    }

    pub fn layout(&self) -> ToolbarLayout {
        self.layout
    }

    pub fn home_url(&self) -> &str {
        &self.home_url
    }

    pub fn downloads(&self) -> &DownloadManager {
        &self.downloads
    }

    /// Handle a toolbar button.
    pub fn handle(&mut self, action: NavigationAction) -> ShellResult<()> {
        match action {
            NavigationAction::Back => {
                if self.surface.can_go_back() {
                    self.surface.go_back()?;
                } else {
                    tracing::debug!("Back ignored: no previous entry");
                }
            }
            NavigationAction::Forward => {
                if self.surface.can_go_forward() {
                    self.surface.go_forward()?;
                } else {
                    tracing::debug!("Forward ignored: no next entry");
                }
            }
            NavigationAction::Reload => self.surface.reload()?,
            NavigationAction::Home => self.go_home()?,
        }

        self.sync_navigation_bar();
        Ok(())
    }

    /// Navigate to the home page.
    pub fn go_home(&mut self) -> ShellResult<()> {
        self.surface.navigate(&self.home_url)
    }

    /// Navigate to what the user typed in the address bar.
    pub fn submit_url(&mut self, input: &str) -> ShellResult<()> {
        self.url_bar.set_input(input);

        match self.url_bar.submit()? {
            Some(url) => {
                tracing::info!("Navigating to: {}", url);
                self.surface.navigate(&url)
            }
            None => Ok(()),
        }
    }

    /// Called when the page URL changes.
    pub fn on_url_changed(&mut self, url: &str) {
        self.url_bar.set_url(url);
        self.surface.url_committed(url);
        self.sync_navigation_bar();
    }

    /// Called when the page started loading.
    pub fn on_load_started(&mut self) {
        self.navigation_bar.set_loading(true);
    }

    /// Called when the page finished loading.
    pub fn on_load_finished(&mut self) {
        self.navigation_bar.set_loading(false);
    }

    /// Resolve and accept a download raised by the engine.
    pub fn on_download_requested(&mut self, request: &mut DownloadRequest) -> ShellResult<()> {
        self.resolver.handle(request)?;
        self.downloads.start(request);
        Ok(())
    }

    /// Called when the engine reports a finished download.
    pub fn on_download_finished(&mut self, url: &str, path: Option<PathBuf>, success: bool) {
        match self.downloads.finish(url, path, success) {
            Some(download) if success => {
                tracing::info!("Download complete: {}", download.file_name);
            }
            Some(download) => {
                tracing::warn!("Download failed: {} ({})", download.file_name, url);
            }
            None => tracing::debug!("Finished download was not tracked: {}", url),
        }
    }

    /// Dispatch an engine notification.
    pub fn on_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::UrlChanged(url) => self.on_url_changed(&url),
            SurfaceEvent::LoadStarted => self.on_load_started(),
            SurfaceEvent::LoadFinished => self.on_load_finished(),
            SurfaceEvent::DownloadStarted(request) => {
                tracing::debug!("Download accepted by engine: {}", request.url());
                self.downloads.start(&request);
            }
            SurfaceEvent::DownloadFinished { url, path, success } => {
                self.on_download_finished(&url, path, success)
            }
        }
    }

    fn sync_navigation_bar(&mut self) {
        self.navigation_bar.set_can_go_back(self.surface.can_go_back());
        self.navigation_bar.set_can_go_forward(self.surface.can_go_forward());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::NavigationHistory;
    use std::fs;

    #[derive(Debug, PartialEq, Eq)]
    enum Call {
        Navigate(String),
        Reload,
        Back,
        Forward,
    }

    /// Surface that records calls and keeps a history like an engine would.
    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<Call>,
        history: NavigationHistory,
    }

    impl BrowserSurface for RecordingSurface {
        fn navigate(&mut self, url: &str) -> ShellResult<()> {
            self.calls.push(Call::Navigate(url.to_string()));
            Ok(())
        }

        fn reload(&mut self) -> ShellResult<()> {
            self.calls.push(Call::Reload);
            Ok(())
        }

        fn go_back(&mut self) -> ShellResult<()> {
            self.history.go_back();
            self.calls.push(Call::Back);
            Ok(())
        }

        fn go_forward(&mut self) -> ShellResult<()> {
            self.history.go_forward();
            self.calls.push(Call::Forward);
            Ok(())
        }

        fn can_go_back(&self) -> bool {
            self.history.can_go_back()
        }

        fn can_go_forward(&self) -> bool {
            self.history.can_go_forward()
        }

        fn url_committed(&mut self, url: &str) {
            self.history.commit(url);
        }
    }

    fn options_in(dir: &std::path::Path) -> ShellOptions {
        ShellOptions {
            home_url: "https://example.net/".to_string(),
            download_resolver: DownloadResolver::new(dir),
            layout: ToolbarLayout::default(),
        }
    }

    fn window_in(dir: &std::path::Path) -> ShellWindow<RecordingSurface> {
        ShellWindow::new(RecordingSurface::default(), options_in(dir))
    }

    #[test]
    fn test_submit_prepends_scheme() {
        let dir = tempfile::tempdir().unwrap();
        let mut window = window_in(dir.path());

        window.submit_url("example.com").unwrap();
        window.submit_url("http://example.com").unwrap();

        assert_eq!(
            window.surface().calls,
            vec![
                Call::Navigate("https://example.com".to_string()),
                Call::Navigate("http://example.com".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_submission_does_not_navigate() {
        let dir = tempfile::tempdir().unwrap();
        let mut window = window_in(dir.path());

        assert!(window.submit_url("not a host").is_err());
        window.submit_url("   ").unwrap();
        assert!(window.surface().calls.is_empty());
    }

    #[test]
    fn test_back_forward_without_history_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut window = window_in(dir.path());
        window.on_url_changed("https://example.net/");

        window.handle(NavigationAction::Back).unwrap();
        window.handle(NavigationAction::Forward).unwrap();

        assert!(window.surface().calls.is_empty());
        assert_eq!(window.url_bar().text(), "https://example.net/");
    }

    #[test]
    fn test_back_and_forward_with_history() {
        let dir = tempfile::tempdir().unwrap();
        let mut window = window_in(dir.path());
        window.on_url_changed("https://example.net/");
        window.on_url_changed("https://example.net/posts");
        assert!(window.navigation_bar().can_go_back());

        window.handle(NavigationAction::Back).unwrap();
        window.on_url_changed("https://example.net/");
        assert!(window.navigation_bar().can_go_forward());

        window.handle(NavigationAction::Forward).unwrap();
        assert_eq!(window.surface().calls, vec![Call::Back, Call::Forward]);
    }

    #[test]
    fn test_reload_and_home() {
        let dir = tempfile::tempdir().unwrap();
        let mut window = window_in(dir.path());

        window.handle(NavigationAction::Reload).unwrap();
        window.handle(NavigationAction::Home).unwrap();

        assert_eq!(
            window.surface().calls,
            vec![Call::Reload, Call::Navigate("https://example.net/".to_string())]
        );
    }

    #[test]
    fn test_url_change_updates_bar() {
        let dir = tempfile::tempdir().unwrap();
        let mut window = window_in(dir.path());
        window.submit_url("example.com/some/typed/path").unwrap();
        assert!(window.url_bar().cursor() > 0);

        window.on_event(SurfaceEvent::UrlChanged("https://example.com/some/typed/path?x=1".to_string()));

        assert_eq!(window.url_bar().text(), "https://example.com/some/typed/path?x=1");
        assert_eq!(window.url_bar().cursor(), 0);
    }

    #[test]
    fn test_load_events_toggle_loading() {
        let dir = tempfile::tempdir().unwrap();
        let mut window = window_in(dir.path());
        assert!(!window.navigation_bar().is_loading());

        window.on_event(SurfaceEvent::LoadStarted);
        assert!(window.navigation_bar().is_loading());

        window.on_event(SurfaceEvent::UrlChanged("https://example.net/posts".to_string()));
        window.on_event(SurfaceEvent::LoadFinished);
        assert!(!window.navigation_bar().is_loading());
        assert_eq!(window.url_bar().text(), "https://example.net/posts");
    }

    #[test]
    fn test_download_requested() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("image.png"), b"first").unwrap();
        let mut window = window_in(dir.path());

        let mut request = DownloadRequest::new("https://example.net/data/image.png");
        window.on_download_requested(&mut request).unwrap();

        assert!(request.is_accepted());
        assert_eq!(request.file_name(), Some("image_1.png"));
        assert_eq!(window.downloads().in_progress_count(), 1);

        window.on_event(SurfaceEvent::DownloadFinished {
            url: "https://example.net/data/image.png".to_string(),
            path: request.destination(),
            success: true,
        });
        assert_eq!(window.downloads().in_progress_count(), 0);
    }

    #[test]
    fn test_download_started_by_engine_callback() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("image.png"), b"first").unwrap();
        let options = options_in(dir.path());
        let engine_resolver = options.download_resolver.clone();
        let mut window = ShellWindow::new(RecordingSurface::default(), options);

        // The engine resolves in its own callback, then reports back.
        let mut request = DownloadRequest::new("https://example.net/data/image.png");
        let destination = engine_resolver.handle(&mut request).unwrap();
        assert_eq!(destination, dir.path().join("image_1.png"));

        window.on_event(SurfaceEvent::DownloadStarted(request));
        assert_eq!(window.downloads().in_progress_count(), 1);
        let download = &window.downloads().all()[0];
        assert_eq!(download.file_name, "image_1.png");
        assert_eq!(download.path, Some(destination.clone()));

        window.on_event(SurfaceEvent::DownloadFinished {
            url: "https://example.net/data/image.png".to_string(),
            path: Some(destination),
            success: true,
        });
        assert_eq!(window.downloads().in_progress_count(), 0);
    }
}
