mod candidate;
mod config;
mod installed;
mod layout;
mod version;

pub use candidate::{PackageCandidate, ResolveOutcome, ResolvedPackage};
pub use config::{ArchiveOverrides, DeviceConfig, RestoreConfig};
pub use installed::{parse_installed_version, read_installed_version, InstalledVersion};
pub use layout::{ArchiveLayout, ArchiveRole};
pub use version::VersionKey;
