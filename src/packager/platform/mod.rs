//! Host detection and platform-dependent build behaviour.
//!
//! - [`arch`] - host OS family and architecture
//! - [`profile`] - the closed set of platform profiles
//! - [`build`] - the build driver (standard and dual-arch paths)
//! - [`process`] - external tool execution with timeout and retry
//! - [`tool_detection`] - locating external tools

mod arch;
mod build;
mod process;
mod profile;
mod tool_detection;

pub use arch::{Arch, HostInfo, OsFamily};
pub use build::BuildDriver;
pub use process::ToolRunner;
pub use profile::{ARCH_NARROW_FLAG, ARCH_TAG_32, ARCH_TAG_64, DeliveryFamily, PlatformProfile};
pub use tool_detection::locate_tool;
