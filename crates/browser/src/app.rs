//! Desktop application: a `tao` window with a toolbar web view above the page.

use std::path::{Path, PathBuf};
use std::time::Duration;

use common::{ShellError, ShellResult};
use presence::PresenceHandle;
use profile::StorageProfile;
use tao::dpi::{LogicalPosition, LogicalSize};
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy};
use tao::window::{Icon, Window, WindowBuilder};
use ui::{DownloadRequest, DownloadResolver, ShellWindow, SurfaceEvent, ToolbarLayout};
use wry::{PageLoadEvent, WebContext, WebView, WebViewBuilder};

use crate::config::ShellConfig;
use crate::icon::load_icon;
use crate::toolbar::{parse_message, set_state_script, set_url_script, toolbar_html, ToolbarMessage};
use crate::webview::WrySurface;

/// Events delivered to the event loop from web view callbacks.
#[derive(Debug)]
enum UserEvent {
    Toolbar(ToolbarMessage),
    Surface(SurfaceEvent),
    /// The main frame started loading.
    PageStarted,
    /// The main frame finished loading the given URL.
    PageFinished(String),
}

fn engine_error(err: impl std::fmt::Display) -> ShellError {
    ShellError::engine(err.to_string())
}

/// Open the window and run the event loop until it is closed.
///
/// The presence handle is cancelled and awaited when the loop shuts down.
pub fn run(
    config: ShellConfig,
    profile: StorageProfile,
    presence: PresenceHandle,
) -> ShellResult<()> {
    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let mut builder = WindowBuilder::new()
        .with_title(config.window_title())
        .with_position(LogicalPosition::new(config.geometry.x, config.geometry.y))
        .with_inner_size(LogicalSize::new(config.geometry.width, config.geometry.height));

    if let Some(icon) = profile_icon(profile.layout().base(), &config.icon_files) {
        builder = builder.with_window_icon(Some(icon));
    }

    let window = builder.build(&event_loop).map_err(engine_error)?;

    let mut web_context = WebContext::new(Some(profile.engine().storage_path.clone()));
    let options = config.shell_options(profile.download_dir());
    let resolver = options.download_resolver.clone();

    let toolbar = WebViewBuilder::new()
        .with_html(toolbar_html(&config.toolbar))
        .with_ipc_handler(toolbar_ipc(proxy.clone()));

    let page = page_builder(&mut web_context, &config, &profile, resolver, proxy);

    let (toolbar, page) = mount(&window, &config.toolbar, toolbar, page)?;

    let mut shell = ShellWindow::new(WrySurface::new(page), options);
    let mut presence = Some(presence);
    // The reporter bounds its own clear by the same timeout.
    let presence_limit = config.presence.shutdown_timeout + Duration::from_secs(1);

    tracing::info!("Window ready: {}", config.window_title());

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        // The window and engine profile live as long as the web views.
        let _ = (&window, &web_context);

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => *control_flow = ControlFlow::Exit,

            #[cfg(not(target_os = "linux"))]
            Event::WindowEvent {
                event: WindowEvent::Resized(_),
                ..
            } => {
                if let Err(err) = resize(&window, &config.toolbar, &toolbar, shell.surface().webview()) {
                    tracing::warn!("Resize failed: {}", err);
                }
            }

            Event::UserEvent(UserEvent::Toolbar(message)) => {
                let result = match message {
                    ToolbarMessage::Navigate { url } => shell.submit_url(&url),
                    other => match other.action() {
                        Some(action) => shell.handle(action),
                        None => Ok(()),
                    },
                };
                if let Err(err) = result {
                    tracing::warn!("Toolbar action failed: {}", err);
                }
                push_state(&toolbar, &shell);
            }

            Event::UserEvent(UserEvent::Surface(event)) => {
                shell.on_event(event);
                push_state(&toolbar, &shell);
            }

            Event::UserEvent(UserEvent::PageStarted) => {
                shell.on_event(SurfaceEvent::LoadStarted);
                push_state(&toolbar, &shell);
            }

            Event::UserEvent(UserEvent::PageFinished(reported)) => {
                let url = shell.surface().committed_url(reported);
                shell.on_event(SurfaceEvent::UrlChanged(url.clone()));
                shell.on_event(SurfaceEvent::LoadFinished);

                if let Err(err) = toolbar.evaluate_script(&set_url_script(&url)) {
                    tracing::warn!("URL bar update failed: {}", err);
                }
                push_state(&toolbar, &shell);
            }

            Event::LoopDestroyed => {
                if let Some(handle) = presence.take() {
                    let reason = futures::executor::block_on(handle.shutdown_within(presence_limit));
                    tracing::info!("Presence reporter stopped: {:?}", reason);
                }
                tracing::info!("Shell shutdown complete");
            }

            _ => {}
        }
    })
}

fn push_state(toolbar: &WebView, shell: &ShellWindow<WrySurface>) {
    if let Err(err) = toolbar.evaluate_script(&set_state_script(shell.navigation_bar())) {
        tracing::debug!("Toolbar state update failed: {}", err);
    }
}

fn profile_icon(dir: &Path, names: &[String]) -> Option<Icon> {
    let icon = load_icon(dir, names)?;
    match Icon::from_rgba(icon.rgba, icon.width, icon.height) {
        Ok(icon) => Some(icon),
        Err(err) => {
            tracing::debug!("Ignoring window icon: {}", err);
            None
        }
    }
}

fn toolbar_ipc(
    proxy: EventLoopProxy<UserEvent>,
) -> impl Fn(wry::http::Request<String>) + 'static {
    move |request| match parse_message(request.body()) {
        Ok(message) => {
            let _ = proxy.send_event(UserEvent::Toolbar(message));
        }
        Err(err) => tracing::warn!("{}", err),
    }
}

fn page_builder<'a>(
    web_context: &'a mut WebContext,
    config: &ShellConfig,
    profile: &StorageProfile,
    resolver: DownloadResolver,
    proxy: EventLoopProxy<UserEvent>,
) -> WebViewBuilder<'a> {
    let engine = profile.engine();
    for setting in crate::ignored_engine_settings(engine) {
        tracing::warn!("Ignoring profile setting: {}", setting);
    }
    let allow_windows = engine.javascript_can_open_windows;

    let load_proxy = proxy.clone();
    let start_proxy = proxy.clone();
    let done_proxy = proxy;

    WebViewBuilder::with_web_context(web_context)
        .with_url(config.home_url.as_str())
        // Page load events only fire for the main frame, so subframes,
        // redirect hops and downloads never reach the URL bar.
        .with_on_page_load_handler(move |event, url| {
            let event = match event {
                PageLoadEvent::Started => UserEvent::PageStarted,
                PageLoadEvent::Finished => UserEvent::PageFinished(url),
            };
            let _ = load_proxy.send_event(event);
        })
        .with_download_started_handler(move |url, path: &mut PathBuf| {
            let mut request = DownloadRequest::new(url);
            match resolver.handle(&mut request) {
                Ok(destination) => {
                    *path = destination;
                    let _ = start_proxy.send_event(UserEvent::Surface(SurfaceEvent::DownloadStarted(request)));
                    true
                }
                Err(err) => {
                    tracing::error!("Download rejected: {}", err);
                    false
                }
            }
        })
        .with_download_completed_handler(move |url, path, success| {
            let _ = done_proxy.send_event(UserEvent::Surface(SurfaceEvent::DownloadFinished {
                url,
                path,
                success,
            }));
        })
        .with_new_window_req_handler(move |url| {
            tracing::debug!("New window requested: {} (allowed: {})", url, allow_windows);
            allow_windows
        })
}

/// Place the toolbar above the page.
#[cfg(target_os = "linux")]
fn mount(
    window: &Window,
    layout: &ToolbarLayout,
    toolbar: WebViewBuilder<'_>,
    page: WebViewBuilder<'_>,
) -> ShellResult<(WebView, WebView)> {
    use gtk::prelude::*;
    use tao::platform::unix::WindowExtUnix;
    use wry::WebViewBuilderExtUnix;

    let vbox = window
        .default_vbox()
        .ok_or_else(|| ShellError::engine("window has no GTK container"))?;
    vbox.set_spacing(layout.outer_spacing as i32);
    vbox.set_border_width(layout.outer_margin);

    let toolbar_box = gtk::Box::new(gtk::Orientation::Vertical, 0);
    toolbar_box.set_size_request(-1, layout.height() as i32);

    let page_box = gtk::Box::new(gtk::Orientation::Vertical, 0);
    page_box.set_vexpand(true);

    vbox.pack_start(&toolbar_box, false, false, 0);
    vbox.pack_start(&page_box, true, true, 0);
    vbox.show_all();

    let toolbar = toolbar.build_gtk(&toolbar_box).map_err(engine_error)?;
    let page = page.build_gtk(&page_box).map_err(engine_error)?;
    Ok((toolbar, page))
}

/// Place the toolbar above the page.
#[cfg(not(target_os = "linux"))]
fn mount(
    window: &Window,
    layout: &ToolbarLayout,
    toolbar: WebViewBuilder<'_>,
    page: WebViewBuilder<'_>,
) -> ShellResult<(WebView, WebView)> {
    let (toolbar_bounds, page_bounds) = bounds(window, layout);
    let toolbar = toolbar
        .with_bounds(toolbar_bounds)
        .build_as_child(window)
        .map_err(engine_error)?;
    let page = page
        .with_bounds(page_bounds)
        .build_as_child(window)
        .map_err(engine_error)?;
    Ok((toolbar, page))
}

#[cfg(not(target_os = "linux"))]
fn bounds(window: &Window, layout: &ToolbarLayout) -> (wry::Rect, wry::Rect) {
    let size = window.inner_size().to_logical::<u32>(window.scale_factor());
    let margin = layout.outer_margin;
    let width = size.width.saturating_sub(2 * margin);

    let toolbar = wry::Rect {
        position: wry::dpi::LogicalPosition::new(margin, margin).into(),
        size: wry::dpi::LogicalSize::new(width, layout.height()).into(),
    };
    let page = wry::Rect {
        position: wry::dpi::LogicalPosition::new(margin, layout.content_top()).into(),
        size: wry::dpi::LogicalSize::new(width, layout.content_height(size.height)).into(),
    };
    (toolbar, page)
}

#[cfg(not(target_os = "linux"))]
fn resize(window: &Window, layout: &ToolbarLayout, toolbar: &WebView, page: &WebView) -> ShellResult<()> {
    let (toolbar_bounds, page_bounds) = bounds(window, layout);
    toolbar.set_bounds(toolbar_bounds).map_err(engine_error)?;
    page.set_bounds(page_bounds).map_err(engine_error)
}
