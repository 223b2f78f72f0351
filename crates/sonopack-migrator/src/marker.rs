use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

pub fn marker_exists(path: &Path) -> bool {
    path.is_file()
}

pub fn write_marker(path: &Path, reason: &str) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let completed_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system time is before unix epoch")?
        .as_secs();
    let payload = format!("migration={reason}\ncompleted_at_unix={completed_at}\n");
    fs::write(path, payload)
        .with_context(|| format!("failed to write migration marker: {}", path.display()))?;
    Ok(())
}
