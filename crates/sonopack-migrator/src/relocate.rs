use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelocationStats {
    pub moved: u64,
    pub copied: u64,
    pub skipped_existing: u64,
    pub failed: u64,
    pub delete_failed: u64,
}

impl RelocationStats {
    pub fn files_seen(&self) -> u64 {
        self.moved + self.copied + self.skipped_existing + self.failed
    }

    pub fn accumulate(&mut self, other: RelocationStats) {
        self.moved += other.moved;
        self.copied += other.copied;
        self.skipped_existing += other.skipped_existing;
        self.failed += other.failed;
        self.delete_failed += other.delete_failed;
    }
}

pub fn relocate_tree(source: &Path, target: &Path) -> RelocationStats {
    let mut stats = RelocationStats::default();

    if paths_equal_ignore_case(source, target) {
        debug!(
            root = %source.display(),
            "relocation source and target are the same directory"
        );
        return stats;
    }
    if !source.is_dir() {
        debug!(root = %source.display(), "relocation source does not exist");
        return stats;
    }

    let mut pending: VecDeque<(PathBuf, PathBuf)> = VecDeque::new();
    pending.push_back((source.to_path_buf(), target.to_path_buf()));

    while let Some((from_dir, to_dir)) = pending.pop_front() {
        if let Err(err) = fs::create_dir_all(&to_dir) {
            warn!(
                directory = %to_dir.display(),
                error = %err,
                "failed to create relocation target directory"
            );
            continue;
        }

        let entries = match fs::read_dir(&from_dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    directory = %from_dir.display(),
                    error = %err,
                    "failed to read relocation source directory"
                );
                continue;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(
                        directory = %from_dir.display(),
                        error = %err,
                        "failed to read relocation source entry"
                    );
                    continue;
                }
            };

            let from_path = entry.path();
            let to_path = to_dir.join(entry.file_name());
            let is_dir = entry
                .file_type()
                .map(|file_type| file_type.is_dir())
                .unwrap_or(false);
            if is_dir {
                pending.push_back((from_path, to_path));
            } else {
                relocate_file(&from_path, &to_path, &mut stats);
            }
        }
    }

    stats
}

pub fn remove_tree_logged(root: &Path) -> bool {
    if !root.exists() {
        return true;
    }
    match fs::remove_dir_all(root) {
        Ok(()) => {
            debug!(directory = %root.display(), "deleted drained archive root");
            true
        }
        Err(err) => {
            warn!(
                directory = %root.display(),
                error = %err,
                "failed to delete drained archive root"
            );
            false
        }
    }
}

fn relocate_file(from_path: &Path, to_path: &Path, stats: &mut RelocationStats) {
    if to_path.exists() {
        debug!(
            file = %from_path.display(),
            "target file already exists; keeping the existing copy"
        );
        stats.skipped_existing += 1;
    } else {
        match fs::rename(from_path, to_path) {
            Ok(()) => {
                debug!(file = %from_path.display(), "moved file");
                stats.moved += 1;
            }
            Err(move_err) => {
                warn!(
                    file = %from_path.display(),
                    error = %move_err,
                    "failed to move file; trying copy"
                );
                match fs::copy(from_path, to_path) {
                    Ok(_) => {
                        debug!(file = %from_path.display(), "copied file");
                        stats.copied += 1;
                    }
                    Err(copy_err) => {
                        warn!(
                            file = %from_path.display(),
                            error = %copy_err,
                            "failed to copy file"
                        );
                        stats.failed += 1;
                    }
                }
            }
        }
    }

    // The delete runs for every file, even after a successful move, so the
    // source tree is drained of everything it could not place.
    match fs::remove_file(from_path) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(file = %from_path.display(), "source file already gone");
        }
        Err(err) => {
            warn!(
                file = %from_path.display(),
                error = %err,
                "failed to delete source file"
            );
            stats.delete_failed += 1;
        }
    }
}

fn paths_equal_ignore_case(left: &Path, right: &Path) -> bool {
    left.to_string_lossy().to_lowercase() == right.to_string_lossy().to_lowercase()
}
