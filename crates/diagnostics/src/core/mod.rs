//! Core types shared across the crate.
//!
//! ### [`error`] - Error handling
//! The [`LogError`] enum and the [`LogResult`] alias used by logger
//! factories and the subscriber installer.

pub mod error;

pub use error::{LogError, LogResult};
