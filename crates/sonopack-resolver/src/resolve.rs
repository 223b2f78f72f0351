use std::cmp::Ordering;
use std::path::Path;

use anyhow::Result;
use sonopack_core::{PackageCandidate, ResolveOutcome, ResolvedPackage, VersionKey};
use tracing::{info, warn};

use crate::scan::scan_media;
use crate::validate::validate_package;

pub fn resolve_upgrade(
    media_root: &Path,
    current_version: &str,
    upgrade_dir: &str,
) -> Result<ResolveOutcome> {
    resolve_upgrade_with(media_root, current_version, |candidate| {
        validate_package(&candidate.path, &candidate.raw_version, upgrade_dir)
    })
}

pub fn resolve_upgrade_with<F>(
    media_root: &Path,
    current_version: &str,
    mut validate: F,
) -> Result<ResolveOutcome>
where
    F: FnMut(&PackageCandidate) -> bool,
{
    let mut candidates: Vec<(VersionKey, PackageCandidate)> = scan_media(media_root)?
        .into_iter()
        .filter_map(|candidate| candidate.version.clone().map(|version| (version, candidate)))
        .collect();
    if candidates.is_empty() {
        return Ok(ResolveOutcome::NotFound);
    }
    candidates.sort_by(|(left, _), (right, _)| left.compare(right));

    let Some(mut baseline) = VersionKey::parse(current_version) else {
        warn!(
            current = current_version,
            "current version does not parse; no upgrade offered"
        );
        return Ok(ResolveOutcome::NotFound);
    };

    loop {
        let Some((version, candidate)) = select_upgrade(&candidates, &baseline) else {
            return Ok(ResolveOutcome::NotFound);
        };

        if validate(candidate) {
            info!(
                package = %candidate.path.display(),
                version = %candidate.raw_version,
                "selected upgrade package"
            );
            return Ok(ResolveOutcome::Found(ResolvedPackage {
                candidate: candidate.clone(),
                validated: true,
            }));
        }

        warn!(
            package = %candidate.path.display(),
            version = %candidate.raw_version,
            "upgrade package failed validation; escalating past it"
        );
        baseline = version.clone();
    }
}

fn select_upgrade<'a>(
    candidates: &'a [(VersionKey, PackageCandidate)],
    current: &VersionKey,
) -> Option<&'a (VersionKey, PackageCandidate)> {
    let (first, _) = candidates.first()?;
    let (last, _) = candidates.last()?;

    if current.compare(first) == Ordering::Less {
        return candidates.first();
    }
    if current.compare(last) != Ordering::Less {
        return None;
    }

    for pair in candidates.windows(2) {
        let [(previous, _), (next, _)] = pair else {
            continue;
        };
        if previous.compare(current) != Ordering::Greater
            && current.compare(next) == Ordering::Less
        {
            return pair.get(1);
        }
    }

    None
}
