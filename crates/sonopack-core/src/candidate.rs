use std::path::PathBuf;

use crate::version::VersionKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageCandidate {
    pub path: PathBuf,
    pub raw_version: String,
    pub version: Option<VersionKey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackage {
    pub candidate: PackageCandidate,
    pub validated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    Found(ResolvedPackage),
    NotFound,
}
