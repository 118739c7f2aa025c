//! "Now browsing" presence reporting.
//!
//! A background task connects to a local presence service, then pushes the
//! same status payload at a fixed interval until it is cancelled or the
//! service fails. Failures end reporting for the rest of the session; they
//! never affect the browser window.

pub mod client;
pub mod config;
pub mod payload;
pub mod reporter;

pub use client::{DiscordPresence, PresenceClient};
pub use config::PresenceConfig;
pub use payload::PresencePayload;
pub use reporter::{PresenceHandle, PresenceReporter, ReporterStatus, StopReason};
