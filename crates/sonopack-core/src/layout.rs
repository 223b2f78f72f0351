use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveRole {
    Current,
    CurrentVet,
    Legacy,
    LegacyVet,
}

impl ArchiveRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::CurrentVet => "current-vet",
            Self::Legacy => "legacy",
            Self::LegacyVet => "legacy-vet",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "current" => Some(Self::Current),
            "current-vet" => Some(Self::CurrentVet),
            "legacy" => Some(Self::Legacy),
            "legacy-vet" => Some(Self::LegacyVet),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveLayout {
    data_root: PathBuf,
    current: PathBuf,
    current_vet: PathBuf,
    legacy: PathBuf,
    legacy_vet: PathBuf,
    staging: PathBuf,
    marker: PathBuf,
}

impl ArchiveLayout {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        let data_root = data_root.into();
        let current = data_root.join("images");
        let current_vet = data_root.join("images-vet");
        let legacy = data_root.join("images-old");
        let legacy_vet = data_root.join("images-vet-old");
        let staging = data_root.join("upgrade-staging");
        let marker = data_root.join("archive-migration.done");
        Self {
            data_root,
            current,
            current_vet,
            legacy,
            legacy_vet,
            staging,
            marker,
        }
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    pub fn current_dir(&self) -> &Path {
        &self.current
    }

    pub fn current_vet_dir(&self) -> &Path {
        &self.current_vet
    }

    pub fn legacy_dir(&self) -> &Path {
        &self.legacy
    }

    pub fn legacy_vet_dir(&self) -> &Path {
        &self.legacy_vet
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging
    }

    pub fn marker_path(&self) -> &Path {
        &self.marker
    }

    pub fn staged_upgrade_dir(&self, upgrade_dir: &str) -> PathBuf {
        self.staging.join(upgrade_dir)
    }

    pub fn role_dir(&self, role: ArchiveRole) -> &Path {
        match role {
            ArchiveRole::Current => self.current_dir(),
            ArchiveRole::CurrentVet => self.current_vet_dir(),
            ArchiveRole::Legacy => self.legacy_dir(),
            ArchiveRole::LegacyVet => self.legacy_vet_dir(),
        }
    }

    pub fn override_current(&mut self, path: PathBuf) {
        self.current = path;
    }

    pub fn override_current_vet(&mut self, path: PathBuf) {
        self.current_vet = path;
    }

    pub fn override_legacy(&mut self, path: PathBuf) {
        self.legacy = path;
    }

    pub fn override_legacy_vet(&mut self, path: PathBuf) {
        self.legacy_vet = path;
    }

    pub fn override_staging(&mut self, path: PathBuf) {
        self.staging = path;
    }

    pub fn override_marker(&mut self, path: PathBuf) {
        self.marker = path;
    }
}
