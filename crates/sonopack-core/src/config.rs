use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::layout::ArchiveLayout;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceConfig {
    #[serde(default = "default_data_root")]
    pub data_root: PathBuf,
    #[serde(default)]
    pub media_root: Option<PathBuf>,
    #[serde(default = "default_upgrade_dir")]
    pub upgrade_dir: String,
    #[serde(default = "default_version_file")]
    pub version_file: PathBuf,
    #[serde(default)]
    pub archives: ArchiveOverrides,
    #[serde(default)]
    pub restore: RestoreConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArchiveOverrides {
    #[serde(default)]
    pub current: Option<PathBuf>,
    #[serde(default)]
    pub current_vet: Option<PathBuf>,
    #[serde(default)]
    pub legacy: Option<PathBuf>,
    #[serde(default)]
    pub legacy_vet: Option<PathBuf>,
    #[serde(default)]
    pub staging: Option<PathBuf>,
    #[serde(default)]
    pub marker: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RestoreConfig {
    #[serde(default)]
    pub executable: Option<PathBuf>,
    #[serde(default)]
    pub public_key_hex: Option<String>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            media_root: None,
            upgrade_dir: default_upgrade_dir(),
            version_file: default_version_file(),
            archives: ArchiveOverrides::default(),
            restore: RestoreConfig::default(),
        }
    }
}

impl DeviceConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input).context("failed to parse device config")?;
        if config.upgrade_dir.trim().is_empty() {
            return Err(anyhow!("device config upgrade_dir must not be empty"));
        }
        if config.upgrade_dir.contains(['/', '\\']) {
            return Err(anyhow!(
                "device config upgrade_dir must be a plain directory name: {}",
                config.upgrade_dir
            ));
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read device config: {}", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("failed to load device config: {}", path.display()))
    }

    pub fn layout(&self) -> ArchiveLayout {
        let mut layout = ArchiveLayout::new(&self.data_root);
        if let Some(path) = &self.archives.current {
            layout.override_current(path.clone());
        }
        if let Some(path) = &self.archives.current_vet {
            layout.override_current_vet(path.clone());
        }
        if let Some(path) = &self.archives.legacy {
            layout.override_legacy(path.clone());
        }
        if let Some(path) = &self.archives.legacy_vet {
            layout.override_legacy_vet(path.clone());
        }
        if let Some(path) = &self.archives.staging {
            layout.override_staging(path.clone());
        }
        if let Some(path) = &self.archives.marker {
            layout.override_marker(path.clone());
        }
        layout
    }
}

fn default_data_root() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from("D:\\SonoData")
    } else {
        PathBuf::from("/var/lib/sonopack")
    }
}

fn default_upgrade_dir() -> String {
    "Upgrade".to_string()
}

fn default_version_file() -> PathBuf {
    default_data_root().join("system.version")
}
