//! Navigation history tracked from committed URLs.
//!
//! Some engines only report the URL they are about to show and expose no way
//! to ask whether a back or forward entry exists. This history is fed with
//! every committed URL and remembers pending back/forward traversals so the
//! next commit moves the cursor instead of adding an entry.

/// Default maximum number of entries.
pub const DEFAULT_MAX_ENTRIES: usize = 50;

/// Navigation history.
pub struct NavigationHistory {
    /// History entries.
    entries: Vec<String>,
    /// Current index.
    current: Option<usize>,
    /// Index a back/forward traversal is heading to.
    pending: Option<usize>,
    /// Maximum history size.
    max_size: usize,
}

impl NavigationHistory {
    /// Create a new navigation history.
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_MAX_ENTRIES)
    }

    /// Create a history holding at most `max_size` entries.
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            current: None,
            pending: None,
            max_size: max_size.max(1),
        }
    }

    /// Record a committed URL.
    pub fn commit(&mut self, url: &str) {
        if let Some(target) = self.pending.take() {
            if self.entries.get(target).is_some_and(|entry| entry == url) {
                self.current = Some(target);
                return;
            }
        }

        if self.current().is_some_and(|entry| entry == url) {
            return;
        }

        self.push(url.to_string());
    }

    fn push(&mut self, url: String) {
        // Truncate forward history
        if let Some(current) = self.current {
            self.entries.truncate(current + 1);
        }

        self.entries.push(url);

        if self.entries.len() > self.max_size {
            self.entries.remove(0);
        }

        self.current = Some(self.entries.len() - 1);
    }

    /// Start a back traversal, returning the URL it targets.
    pub fn go_back(&mut self) -> Option<&str> {
        let target = self.current?.checked_sub(1)?;
        self.current = Some(target);
        self.pending = Some(target);
        self.entries.get(target).map(String::as_str)
    }

    /// Start a forward traversal, returning the URL it targets.
    pub fn go_forward(&mut self) -> Option<&str> {
        let target = self.current? + 1;
        if target >= self.entries.len() {
            return None;
        }
        self.current = Some(target);
        self.pending = Some(target);
        self.entries.get(target).map(String::as_str)
    }

    /// Check if can go back.
    pub fn can_go_back(&self) -> bool {
        self.current.is_some_and(|current| current > 0)
    }

    /// Check if can go forward.
    pub fn can_go_forward(&self) -> bool {
        self.current
            .is_some_and(|current| current + 1 < self.entries.len())
    }

    /// Get the current entry.
    pub fn current(&self) -> Option<&str> {
        self.current
            .and_then(|current| self.entries.get(current))
            .map(String::as_str)
    }

    /// Get all entries.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Clear history.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.current = None;
        self.pending = None;
    }
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new()
    }
}
