use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledVersion {
    pub revision: String,
    pub build: i64,
}

pub fn read_installed_version(path: &Path) -> Result<InstalledVersion> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read system version file: {}", path.display()))?;
    parse_installed_version(&raw)
        .with_context(|| format!("failed to parse system version file: {}", path.display()))
}

pub fn parse_installed_version(raw: &str) -> Result<InstalledVersion> {
    let mut revision = None;
    let mut build = None;

    for line in raw.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        match key.trim() {
            "revision" => revision = Some(value.trim().to_string()),
            "build" => {
                build = Some(
                    value
                        .trim()
                        .parse()
                        .context("build must be an integer")?,
                )
            }
            _ => {}
        }
    }

    Ok(InstalledVersion {
        revision: revision.context("missing revision")?,
        build: build.unwrap_or(-1),
    })
}
