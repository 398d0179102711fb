//! Configuration types
//!
//! - `base`: [`LoggingConfig`] and [`Level`]
//! - `sinks`: sink toggles and the reserved remote sink settings
//! - `presets`: environment and pre-configured setups

mod base;
mod presets;
mod sinks;

pub use base::{Level, LoggingConfig};
pub use sinks::{RemoteSinkSettings, Sinks};
