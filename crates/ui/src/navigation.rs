//! Navigation bar component.

/// Navigation bar state.
pub struct NavigationBar {
    /// Can go back.
    can_go_back: bool,
    /// Can go forward.
    can_go_forward: bool,
    /// Is loading.
    loading: bool,
}

impl NavigationBar {
    /// Create a new navigation bar.
    pub fn new() -> Self {
        Self {
            can_go_back: false,
            can_go_forward: false,
            loading: false,
        }
    }

    /// Set can go back.
    pub fn set_can_go_back(&mut self, can: bool) {
        self.can_go_back = can;
    }

    /// Check if can go back.
    pub fn can_go_back(&self) -> bool {
        self.can_go_back
    }

    /// Set can go forward.
    pub fn set_can_go_forward(&mut self, can: bool) {
        self.can_go_forward = can;
    }

    /// Check if can go forward.
    pub fn can_go_forward(&self) -> bool {
        self.can_go_forward
    }

    /// Set loading state.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Check if loading.
    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

impl Default for NavigationBar {
    fn default() -> Self {
        Self::new()
    }
}

/// Navigation action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationAction {
    Back,
    Forward,
    Reload,
    Home,
}

impl NavigationAction {
    /// Toolbar buttons, left to right.
    pub const ALL: [NavigationAction; 4] = [
        NavigationAction::Back,
        NavigationAction::Forward,
        NavigationAction::Reload,
        NavigationAction::Home,
    ];

    /// Button label.
    pub fn glyph(self) -> &'static str {
        match self {
            NavigationAction::Back => "←",
            NavigationAction::Forward => "→",
            NavigationAction::Reload => "↻",
            NavigationAction::Home => "🏠",
        }
    }

    /// Button tooltip.
    pub fn tooltip(self) -> &'static str {
        match self {
            NavigationAction::Back => "Back",
            NavigationAction::Forward => "Forward",
            NavigationAction::Reload => "Reload",
            NavigationAction::Home => "Home",
        }
    }

    /// Identifier used by toolbar front-ends.
    pub fn id(self) -> &'static str {
        match self {
            NavigationAction::Back => "back",
            NavigationAction::Forward => "forward",
            NavigationAction::Reload => "reload",
            NavigationAction::Home => "home",
        }
    }

    /// Parse a toolbar identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.id() == id)
    }
}

/// Toolbar geometry, in logical pixels.
///
/// The toolbar sits above the page with no outer margin or spacing so the
/// page fills the rest of the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToolbarLayout {
    pub outer_margin: u32,
    pub outer_spacing: u32,
    pub toolbar_padding: u32,
    pub button_size: u32,
}

impl ToolbarLayout {
    /// Total toolbar height.
    pub fn height(&self) -> u32 {
        self.button_size + 2 * self.toolbar_padding
    }

    /// Height left for the page in a window of `window_height`.
    pub fn content_height(&self, window_height: u32) -> u32 {
        window_height.saturating_sub(self.height() + self.outer_spacing + 2 * self.outer_margin)
    }

    /// Top of the page area.
    pub fn content_top(&self) -> u32 {
        self.outer_margin + self.height() + self.outer_spacing
    }
}

impl Default for ToolbarLayout {
    fn default() -> Self {
        Self {
            outer_margin: 0,
            outer_spacing: 0,
            toolbar_padding: 5,
            button_size: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_bar() {
        let mut bar = NavigationBar::new();

        assert!(!bar.can_go_back());
        assert!(!bar.can_go_forward());
        assert!(!bar.is_loading());

        bar.set_can_go_back(true);
        bar.set_loading(true);

        assert!(bar.can_go_back());
        assert!(bar.is_loading());
    }

    #[test]
    fn test_action_ids() {
        for action in NavigationAction::ALL {
            assert_eq!(NavigationAction::from_id(action.id()), Some(action));
        }
        assert_eq!(NavigationAction::from_id("stop"), None);
    }

    #[test]
    fn test_toolbar_layout() {
        let layout = ToolbarLayout::default();
        assert_eq!(layout.height(), 40);
        assert_eq!(layout.content_top(), 40);
        assert_eq!(layout.content_height(1000), 960);
        assert_eq!(layout.content_height(10), 0);
    }
}
