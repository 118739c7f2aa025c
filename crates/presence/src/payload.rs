//! Presence payload.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::PresenceConfig;

/// Seconds since the Unix epoch.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0)
}

/// Status pushed to the presence service on every update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresencePayload {
    pub state: String,
    pub details: String,
    pub large_image: String,
    pub large_text: String,
    /// Session start; the service renders elapsed time from it.
    pub start: i64,
}

impl PresencePayload {
    /// Build the payload for a session that started at `start`.
    pub fn from_config(config: &PresenceConfig, start: i64) -> Self {
        Self {
            state: config.state.clone(),
            details: config.details.clone(),
            large_image: config.large_image.clone(),
            large_text: config.large_text.clone(),
            start,
        }
    }
}
