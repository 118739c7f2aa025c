//! Toolbar front-end.
//!
//! The toolbar is a small HTML page rendered in its own web view above the
//! page. Buttons post JSON messages over IPC; the shell pushes the current URL
//! back with [`set_url_script`] and the button state with [`set_state_script`].

use common::{ShellError, ShellResult};
use serde::Deserialize;
use ui::{NavigationAction, NavigationBar, ToolbarLayout};

/// Message posted by the toolbar.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ToolbarMessage {
    Back,
    Forward,
    Reload,
    Home,
    Navigate { url: String },
}

impl ToolbarMessage {
    /// Button action, if the message came from a button.
    pub fn action(&self) -> Option<NavigationAction> {
        match self {
            ToolbarMessage::Back => Some(NavigationAction::Back),
            ToolbarMessage::Forward => Some(NavigationAction::Forward),
            ToolbarMessage::Reload => Some(NavigationAction::Reload),
            ToolbarMessage::Home => Some(NavigationAction::Home),
            ToolbarMessage::Navigate { .. } => None,
        }
    }
}

/// Parse an IPC message body.
pub fn parse_message(body: &str) -> ShellResult<ToolbarMessage> {
    serde_json::from_str(body)
        .map_err(|err| ShellError::engine(format!("bad toolbar message {:?}: {}", body, err)))
}

/// Script replacing the URL field text and moving the cursor to the start.
pub fn set_url_script(url: &str) -> String {
    // JSON string literals are valid JavaScript string literals.
    let literal = serde_json::to_string(url).unwrap_or_else(|_| "\"\"".to_string());
    format!("window.setUrl && window.setUrl({});", literal)
}

/// Script enabling the history buttons and showing the loading state.
pub fn set_state_script(bar: &NavigationBar) -> String {
    let state = serde_json::json!({
        "back": bar.can_go_back(),
        "forward": bar.can_go_forward(),
        "loading": bar.is_loading(),
    });
    format!("window.setState && window.setState({});", state)
}

/// Toolbar page.
pub fn toolbar_html(layout: &ToolbarLayout) -> String {
    let buttons: String = NavigationAction::ALL
        .iter()
        .map(|action| {
            format!(
                r#"<button id="{}" title="{}" onclick="send({{action:'{}'}})">{}</button>"#,
                action.id(),
                action.tooltip(),
                action.id(),
                action.glyph()
            )
        })
        .collect::<Vec<_>>()
        .join("\n  ");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<style>
  * {{ margin:0; padding:0; box-sizing:border-box; }}
  html, body {{ height:100%; overflow:hidden; }}
  body {{
    display:flex;
    align-items:center;
    gap:{padding}px;
    padding:{padding}px;
    height:{height}px;
    font-family:system-ui,sans-serif;
  }}
  button {{
    width:{button}px; height:{button}px;
    flex-shrink:0;
    font-size:15px;
    cursor:pointer;
  }}
  button:disabled {{ cursor:default; opacity:0.4; }}
  body.loading #reload {{ cursor:progress; }}
  #url {{
    flex:1;
    height:{button}px;
    padding:0 8px;
    font-size:13px;
  }}
</style>
</head>
<body>
  {buttons}
  <input id="url" type="text" spellcheck="false"
    onkeydown="if(event.key==='Enter'){{ send({{action:'navigate', url:this.value}}); }}" />
  <script>
    function send(msg) {{
      window.ipc.postMessage(JSON.stringify(msg));
    }}

    window.setUrl = function(url) {{
      const el = document.getElementById('url');
      el.value = url;
      el.setSelectionRange(0, 0);
      el.scrollLeft = 0;
    }};

    window.setState = function(state) {{
      document.getElementById('back').disabled = !state.back;
      document.getElementById('forward').disabled = !state.forward;
      document.body.classList.toggle('loading', state.loading);
    }};
  </script>
</body>
</html>"#,
        padding = layout.toolbar_padding,
        height = layout.height(),
        button = layout.button_size,
        buttons = buttons,
    )
}
