//! Persistent storage profile for the embedded browser engine.
//!
//! A profile is a named directory next to the executable that holds cookies,
//! local storage and the HTTP cache. Downloads land in a sibling directory.

pub mod layout;
pub mod settings;

pub use layout::{resolve_base_dir, ProfileLayout};
pub use settings::{EngineProfile, HttpCacheMode, ProfileSettings, StorageProfile};
