mod resolve;
mod scan;
mod stage;
mod validate;

pub use resolve::{resolve_upgrade, resolve_upgrade_with};
pub use scan::scan_media;
pub use stage::{stage_package, StagedUpgrade};
pub use validate::validate_package;
