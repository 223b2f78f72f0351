use std::fs::File;
use std::path::Path;

use tracing::warn;
use zip::ZipArchive;

pub fn validate_package(zip_path: &Path, raw_version: &str, upgrade_dir: &str) -> bool {
    let file = match File::open(zip_path) {
        Ok(file) => file,
        Err(err) => {
            warn!(
                package = %zip_path.display(),
                error = %err,
                "failed to open upgrade package"
            );
            return false;
        }
    };

    let archive = match ZipArchive::new(file) {
        Ok(archive) => archive,
        Err(err) => {
            warn!(
                package = %zip_path.display(),
                error = %err,
                "failed to read upgrade package archive"
            );
            return false;
        }
    };

    let payload_entry = format!("{upgrade_dir}/{raw_version}.dat");
    let notes_entry = format!("{upgrade_dir}/ReleaseNotes.xml");

    let mut payload_found = false;
    let mut notes_found = false;
    for name in archive.file_names() {
        let name = name.replace('\\', "/");
        if name.contains(&payload_entry) {
            payload_found = true;
        }
        if name.contains(&notes_entry) {
            notes_found = true;
        }
    }

    if !payload_found || !notes_found {
        warn!(
            package = %zip_path.display(),
            payload_found,
            notes_found,
            "upgrade package is missing required artifacts"
        );
        return false;
    }

    true
}
