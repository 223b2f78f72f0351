use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use sonopack_core::{PackageCandidate, VersionKey};
use tracing::debug;

pub fn scan_media(media_root: &Path) -> Result<Vec<PackageCandidate>> {
    if !media_root.exists() {
        return Ok(Vec::new());
    }

    let mut candidates = Vec::new();
    for entry in fs::read_dir(media_root)
        .with_context(|| format!("failed to scan media root: {}", media_root.display()))?
    {
        let entry = entry
            .with_context(|| format!("failed to read media entry in {}", media_root.display()))?;
        let file_type = entry
            .file_type()
            .with_context(|| format!("failed to read media entry in {}", media_root.display()))?;
        if !file_type.is_file() {
            continue;
        }

        let path = entry.path();
        if !has_zip_extension(&path) {
            continue;
        }
        let Some(raw_version) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let raw_version = raw_version.to_string();

        let version = VersionKey::parse(&raw_version);
        if version.is_none() {
            debug!(
                package = %path.display(),
                "zip name is not a package version; excluded from resolution"
            );
        }
        candidates.push(PackageCandidate {
            path,
            raw_version,
            version,
        });
    }

    Ok(candidates)
}

fn has_zip_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.eq_ignore_ascii_case("zip"))
        .unwrap_or(false)
}
