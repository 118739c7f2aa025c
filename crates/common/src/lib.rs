//! Common types shared by the shell crates.

pub mod error;

pub use error::{ShellError, ShellResult};
