//! Configuration structures for packaging operations.
//!
//! Settings are assembled once per run (normally from `release.toml`, see
//! [`crate::config`]) and threaded through every pipeline step.

mod build;
mod builder;
mod core;
mod delivery;
mod version;

pub use build::{BuildConfigSettings, BuildSettings};
pub use builder::SettingsBuilder;
pub use self::core::Settings;
pub use delivery::{DeliveryDirs, DeliverySettings};
pub use version::ReleaseVersion;
