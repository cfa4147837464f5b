pub mod config;
pub mod error;
pub mod git;
pub mod resolver;
pub mod version;

pub use config::Config;
pub use error::{GitVersionError, Result};
pub use resolver::{determine_version, determine_version_with_defaults, Resolution, VersionResolver};
