//! `wry` browser surface.

use common::{ShellError, ShellResult};
use ui::{BrowserSurface, NavigationHistory};
use wry::WebView;

fn engine_error(err: wry::Error) -> ShellError {
    ShellError::engine(err.to_string())
}

/// Page web view.
///
/// `wry` cannot be asked whether a history entry exists, so the surface keeps
/// its own history from the URLs the window reports back.
pub struct WrySurface {
    webview: WebView,
    history: NavigationHistory,
}

impl WrySurface {
    pub fn new(webview: WebView) -> Self {
        Self {
            webview,
            history: NavigationHistory::new(),
        }
    }

    pub fn webview(&self) -> &WebView {
        &self.webview
    }

    /// URL the main frame shows after a finished load.
    ///
    /// A load that turned into a download leaves the previous page in
    /// place, so the view is asked first and `reported` is the fallback.
    pub fn committed_url(&self, reported: String) -> String {
        match self.webview.url() {
            Ok(url) if !url.is_empty() => url,
            _ => reported,
        }
    }
}

impl BrowserSurface for WrySurface {
    fn navigate(&mut self, url: &str) -> ShellResult<()> {
        self.webview.load_url(url).map_err(engine_error)
    }

    fn reload(&mut self) -> ShellResult<()> {
        self.webview
            .evaluate_script("location.reload()")
            .map_err(engine_error)
    }

    fn go_back(&mut self) -> ShellResult<()> {
        self.history.go_back();
        self.webview
            .evaluate_script("history.back()")
            .map_err(engine_error)
    }

    fn go_forward(&mut self) -> ShellResult<()> {
        self.history.go_forward();
        self.webview
            .evaluate_script("history.forward()")
            .map_err(engine_error)
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
