//! Presence configuration.

use std::time::Duration;

/// Presence reporter configuration.
#[derive(Clone, Debug)]
pub struct PresenceConfig {
    /// Whether presence reporting runs at all.
    pub enabled: bool,
    /// Application identifier registered with the presence service.
    pub client_id: String,
    /// Status line.
    pub state: String,
    /// Second line. The service rejects empty strings, so this defaults to blanks.
    pub details: String,
    /// Asset key of the large image.
    pub large_image: String,
    /// Hover text of the large image.
    pub large_text: String,
    /// Time between updates.
    pub interval: Duration,
    /// How long shutdown may spend clearing the status before giving up.
    pub shutdown_timeout: Duration,
}

impl PresenceConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set enabled.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set client identifier.
    pub fn with_client_id(mut self, client_id: &str) -> Self {
        self.client_id = client_id.to_string();
        self
    }

    /// Set update interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set shutdown timeout.
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            client_id: "1430473078936178698".to_string(),
            state: "Browsing e621.net".to_string(),
            details: "  ".to_string(),
            large_image: "icon".to_string(),
            large_text: "E621 Client".to_string(),
            interval: Duration::from_secs(15),
            shutdown_timeout: Duration::from_secs(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PresenceConfig::default();
        assert!(config.enabled);
        assert_eq!(config.interval, Duration::from_secs(15));
        assert!(!config.details.is_empty());
        assert!(config.details.trim().is_empty());
        assert_eq!(config.shutdown_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_config_builder() {
        let config = PresenceConfig::new()
            .with_enabled(false)
            .with_client_id("42")
            .with_interval(Duration::from_secs(1))
            .with_shutdown_timeout(Duration::from_millis(500));

        assert!(!config.enabled);
        assert_eq!(config.client_id, "42");
        assert_eq!(config.interval, Duration::from_secs(1));
        assert_eq!(config.shutdown_timeout, Duration::from_millis(500));
    }
}
