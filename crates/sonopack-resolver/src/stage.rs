use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info};
use zip::ZipArchive;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedUpgrade {
    pub upgrade_dir: PathBuf,
    pub payload: PathBuf,
    pub release_notes: PathBuf,
}

pub fn stage_package(
    zip_path: &Path,
    raw_version: &str,
    staging_root: &Path,
    upgrade_dir: &str,
) -> Result<StagedUpgrade> {
    fs::create_dir_all(staging_root)
        .with_context(|| format!("failed to create staging root: {}", staging_root.display()))?;

    let file_name = zip_path
        .file_name()
        .ok_or_else(|| anyhow!("upgrade package has no file name: {}", zip_path.display()))?;
    let local_zip = staging_root.join(file_name);
    fs::copy(zip_path, &local_zip).with_context(|| {
        format!(
            "failed to copy upgrade package into staging: {}",
            local_zip.display()
        )
    })?;

    let staged_dir = staging_root.join(upgrade_dir);
    if staged_dir.exists() {
        fs::remove_dir_all(&staged_dir).with_context(|| {
            format!(
                "failed to clear previously staged upgrade: {}",
                staged_dir.display()
            )
        })?;
    }

    let extracted = extract_archive(&local_zip, staging_root);
    if let Err(err) = fs::remove_file(&local_zip) {
        debug!(
            file = %local_zip.display(),
            error = %err,
            "failed to remove staging copy of upgrade package"
        );
    }
    extracted?;

    let payload = staged_dir.join(format!("{raw_version}.dat"));
    let release_notes = staged_dir.join("ReleaseNotes.xml");
    if !payload.is_file() {
        return Err(anyhow!(
            "staged upgrade is missing its payload: {}",
            payload.display()
        ));
    }
    if !release_notes.is_file() {
        return Err(anyhow!(
            "staged upgrade is missing its release notes: {}",
            release_notes.display()
        ));
    }

    info!(payload = %payload.display(), "staged upgrade package");
    Ok(StagedUpgrade {
        upgrade_dir: staged_dir,
        payload,
        release_notes,
    })
}

fn extract_archive(zip_path: &Path, destination: &Path) -> Result<()> {
    let file = File::open(zip_path)
        .with_context(|| format!("failed to open staged package: {}", zip_path.display()))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("failed to read staged package: {}", zip_path.display()))?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .with_context(|| format!("failed to read entry {index} of {}", zip_path.display()))?;
        let relative = entry_relative_path(entry.name())?;
        if relative.as_os_str().is_empty() {
            continue;
        }

        let target = destination.join(&relative);
        if entry.is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("failed to create {}", target.display()))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let mut output = File::create(&target)
            .with_context(|| format!("failed to create {}", target.display()))?;
        io::copy(&mut entry, &mut output)
            .with_context(|| format!("failed to extract {}", target.display()))?;
    }

    Ok(())
}

pub(crate) fn entry_relative_path(name: &str) -> Result<PathBuf> {
    let normalized = name.replace('\\', "/");
    let mut relative = PathBuf::new();
    for component in Path::new(&normalized).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            _ => {
                return Err(anyhow!(
                    "upgrade package entry escapes the staging directory: {name}"
                ));
            }
        }
    }
    Ok(relative)
}
