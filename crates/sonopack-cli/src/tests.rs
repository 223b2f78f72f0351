use std::path::{Path, PathBuf};

use clap::CommandFactory;
use sonopack_core::{ArchiveLayout, DeviceConfig, PackageCandidate, ResolveOutcome, ResolvedPackage, VersionKey};
use sonopack_migrator::{
    LegacyDataChoice, MigrationDecision, MigrationReport, RelocationStats, RestoreSignal,
};

use crate::flows::{check_json_record, doctor_lines, first_boot_report_lines, resolve_location};
use crate::process::{parse_prompt_answer, signature_sidecar_path};
use crate::render::{relocation_summary_lines, render_status_line, OutputStyle};

#[test]
fn cli_definition_is_consistent() {
    crate::Cli::command().debug_assert();
}

#[test]
fn prompt_answers_default_to_keeping_data_aside() {
    assert_eq!(parse_prompt_answer("y\n"), LegacyDataChoice::Discard);
    assert_eq!(parse_prompt_answer("YES\n"), LegacyDataChoice::Discard);
    assert_eq!(parse_prompt_answer("n\n"), LegacyDataChoice::KeepAside);
    assert_eq!(parse_prompt_answer("\n"), LegacyDataChoice::KeepAside);
    assert_eq!(parse_prompt_answer("anything"), LegacyDataChoice::KeepAside);
}

#[test]
fn signature_sidecar_sits_next_to_the_executable() {
    assert_eq!(
        signature_sidecar_path(Path::new("/opt/console/restore-bin")),
        PathBuf::from("/opt/console/restore-bin.sig")
    );
}

#[test]
fn relocate_arguments_accept_roles_and_raw_paths() {
    let layout = ArchiveLayout::new("/data");
    assert_eq!(
        resolve_location(&layout, "current"),
        PathBuf::from("/data/images")
    );
    assert_eq!(
        resolve_location(&layout, "legacy-vet"),
        PathBuf::from("/data/images-vet-old")
    );
    assert_eq!(
        resolve_location(&layout, "/mnt/rescue"),
        PathBuf::from("/mnt/rescue")
    );
}

#[test]
fn check_json_reports_the_selected_package() {
    let outcome = ResolveOutcome::Found(ResolvedPackage {
        candidate: PackageCandidate {
            path: PathBuf::from("/mnt/usb/1.2.0.zip"),
            raw_version: "1.2.0".to_string(),
            version: VersionKey::parse("1.2.0"),
        },
        validated: true,
    });

    let rendered = check_json_record(&outcome).expect("json must render");
    assert!(rendered.contains("\"upgrade_available\": true"));
    assert!(rendered.contains("\"version\": \"1.2.0\""));
    assert!(rendered.contains("1.2.0.zip"));
}

#[test]
fn check_json_reports_no_upgrade() {
    let rendered = check_json_record(&ResolveOutcome::NotFound).expect("json must render");
    assert!(rendered.contains("\"upgrade_available\": false"));
}

#[test]
fn first_boot_report_lines_cover_the_full_story() {
    let report = MigrationReport {
        decision: Some(MigrationDecision::TypeChangedAwaitingUserChoice),
        choice: Some(LegacyDataChoice::KeepAside),
        signal: Some(RestoreSignal::NoCleanDelete),
        relocated: RelocationStats {
            moved: 3,
            copied: 1,
            skipped_existing: 2,
            failed: 0,
            delete_failed: 0,
        },
        marker_written: true,
    };

    let lines = first_boot_report_lines(&report);
    assert_eq!(lines[0], "decision: type-changed");
    assert!(lines.iter().any(|line| line == "legacy data: kept aside"));
    assert!(lines.iter().any(|line| line == "restore signal: NoCleanDelete"));
    assert!(lines
        .iter()
        .any(|line| line == "relocated files: 3 moved, 1 copied, 2 kept existing"));
    assert!(lines.iter().any(|line| line == "migration marker written"));
}

#[test]
fn first_boot_report_lines_for_a_failed_probe() {
    let report = MigrationReport {
        decision: None,
        choice: None,
        signal: None,
        relocated: RelocationStats::default(),
        marker_written: false,
    };

    let lines = first_boot_report_lines(&report);
    assert_eq!(lines, vec!["decision: skipped (restore probe failed)".to_string()]);
}

#[test]
fn doctor_lines_report_marker_absence() {
    let config = DeviceConfig::default();
    let layout = ArchiveLayout::new("/nonexistent/sonopack-doctor");
    let lines = doctor_lines(&config, &layout);

    assert!(lines
        .iter()
        .any(|line| line == "data root: /nonexistent/sonopack-doctor"));
    assert!(lines.iter().any(|line| line == "media root: not configured"));
    assert!(lines.iter().any(|line| line.contains("(absent)")));
}

#[test]
fn plain_status_lines_are_grep_friendly() {
    assert_eq!(
        render_status_line(OutputStyle::Plain, "upgrade", "1.2.0"),
        "[upgrade] 1.2.0"
    );
}

#[test]
fn relocation_summary_reports_every_counter() {
    let stats = RelocationStats {
        moved: 5,
        copied: 2,
        skipped_existing: 1,
        failed: 3,
        delete_failed: 4,
    };
    let lines = relocation_summary_lines(&stats);
    assert_eq!(
        lines,
        vec![
            "moved: 5".to_string(),
            "copied: 2".to_string(),
            "kept existing targets: 1".to_string(),
            "failed to place: 3".to_string(),
            "failed to delete from source: 4".to_string(),
        ]
    );
}
