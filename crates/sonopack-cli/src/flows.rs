use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use sonopack_core::{
    read_installed_version, ArchiveLayout, ArchiveRole, DeviceConfig, ResolveOutcome,
};
use sonopack_migrator::{
    marker_exists, relocate_tree, FirstBootMigration, LegacyDataChoice, MigrationReport,
    ProductKind,
};
use sonopack_resolver::{resolve_upgrade, stage_package};
use sonopack_security::sha256_hex_file;
use tracing::{info, warn};

use crate::completion::write_completions_script;
use crate::process::{ForcedPrompt, InteractivePrompt, SubprocessRestoreRunner};
use crate::render::{
    current_output_style, finish_spinner, relocation_summary_lines, render_status_line,
    start_spinner, OutputStyle,
};
use crate::{Cli, Commands};

pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let layout = config.layout();
    let style = current_output_style();

    match cli.command {
        Commands::Check { current, json } => run_check(&config, current, json, style),
        Commands::Stage { current } => run_stage(&config, &layout, current, style),
        Commands::FirstBoot {
            product,
            keep_legacy_data,
            discard_legacy_data,
        } => run_first_boot(
            &config,
            &layout,
            &product,
            keep_legacy_data,
            discard_legacy_data,
            style,
        ),
        Commands::Relocate { source, target } => run_relocate(&layout, &source, &target, style),
        Commands::Doctor => run_doctor(&config, &layout, style),
        Commands::Completions { shell } => {
            let mut stdout = std::io::stdout();
            write_completions_script(shell, &mut stdout)
        }
    }
}

fn run_check(
    config: &DeviceConfig,
    current: Option<String>,
    json: bool,
    style: OutputStyle,
) -> Result<()> {
    let media_root = require_media_root(config)?;
    let current_version = resolve_current_version(config, current)?;
    let outcome = resolve_upgrade(&media_root, &current_version, &config.upgrade_dir)?;

    if json {
        println!("{}", check_json_record(&outcome)?);
        return Ok(());
    }

    match outcome {
        ResolveOutcome::Found(resolved) => {
            println!(
                "{}",
                render_status_line(
                    style,
                    "upgrade",
                    &format!(
                        "{} ({})",
                        resolved.candidate.raw_version,
                        resolved.candidate.path.display()
                    )
                )
            );
        }
        ResolveOutcome::NotFound => {
            println!("{}", render_status_line(style, "check", "no upgrade available"));
        }
    }
    Ok(())
}

fn run_stage(
    config: &DeviceConfig,
    layout: &ArchiveLayout,
    current: Option<String>,
    style: OutputStyle,
) -> Result<()> {
    let media_root = require_media_root(config)?;
    let mut baseline = resolve_current_version(config, current)?;

    loop {
        let outcome = resolve_upgrade(&media_root, &baseline, &config.upgrade_dir)?;
        let ResolveOutcome::Found(resolved) = outcome else {
            println!("{}", render_status_line(style, "stage", "no upgrade available"));
            return Ok(());
        };

        let digest = sha256_hex_file(&resolved.candidate.path)?;
        info!(
            package = %resolved.candidate.path.display(),
            digest = %digest,
            "staging upgrade package"
        );

        let spinner = start_spinner(
            style,
            &format!("staging {}", resolved.candidate.raw_version),
        );
        let staged = stage_package(
            &resolved.candidate.path,
            &resolved.candidate.raw_version,
            layout.staging_dir(),
            &config.upgrade_dir,
        );
        finish_spinner(spinner);

        match staged {
            Ok(staged) => {
                println!(
                    "{}",
                    render_status_line(style, "staged", &staged.payload.display().to_string())
                );
                return Ok(());
            }
            Err(err) => {
                warn!(
                    package = %resolved.candidate.path.display(),
                    error = %err,
                    "staged package rejected; trying a higher version"
                );
                println!(
                    "{}",
                    render_status_line(
                        style,
                        "rejected",
                        &format!(
                            "{}; looking for a higher version",
                            resolved.candidate.raw_version
                        )
                    )
                );
                baseline = resolved.candidate.raw_version.clone();
            }
        }
    }
}

fn run_first_boot(
    config: &DeviceConfig,
    layout: &ArchiveLayout,
    product_input: &str,
    keep_legacy_data: bool,
    discard_legacy_data: bool,
    style: OutputStyle,
) -> Result<()> {
    let product = ProductKind::parse(product_input)
        .ok_or_else(|| anyhow!("unknown product kind: {product_input}"))?;
    if keep_legacy_data && discard_legacy_data {
        return Err(anyhow!(
            "--keep-legacy-data and --discard-legacy-data are mutually exclusive"
        ));
    }

    let executable = config
        .restore
        .executable
        .clone()
        .ok_or_else(|| anyhow!("restore executable is not configured"))?;
    let mut runner =
        SubprocessRestoreRunner::new(executable, config.restore.public_key_hex.clone());

    let migration = FirstBootMigration::new(layout, product);
    let report = if keep_legacy_data {
        let mut prompt = ForcedPrompt::new(LegacyDataChoice::KeepAside);
        migration.run(&mut runner, &mut prompt)
    } else if discard_legacy_data {
        let mut prompt = ForcedPrompt::new(LegacyDataChoice::Discard);
        migration.run(&mut runner, &mut prompt)
    } else {
        let mut prompt = InteractivePrompt;
        migration.run(&mut runner, &mut prompt)
    };

    for line in first_boot_report_lines(&report) {
        println!("{}", render_status_line(style, "first-boot", &line));
    }
    Ok(())
}

fn run_relocate(
    layout: &ArchiveLayout,
    source: &str,
    target: &str,
    style: OutputStyle,
) -> Result<()> {
    let source_path = resolve_location(layout, source);
    let target_path = resolve_location(layout, target);

    let spinner = start_spinner(style, &format!("relocating {}", source_path.display()));
    let stats = relocate_tree(&source_path, &target_path);
    finish_spinner(spinner);

    for line in relocation_summary_lines(&stats) {
        println!("{}", render_status_line(style, "relocate", &line));
    }
    Ok(())
}

fn run_doctor(config: &DeviceConfig, layout: &ArchiveLayout, style: OutputStyle) -> Result<()> {
    for line in doctor_lines(config, layout) {
        println!("{}", render_status_line(style, "doctor", &line));
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<DeviceConfig> {
    let mut config = match &cli.config {
        Some(path) => DeviceConfig::load(path)?,
        None => DeviceConfig::default(),
    };
    if let Some(data_root) = &cli.data_root {
        config.data_root = data_root.clone();
    }
    if let Some(media) = &cli.media {
        config.media_root = Some(media.clone());
    }
    Ok(config)
}

fn require_media_root(config: &DeviceConfig) -> Result<PathBuf> {
    config.media_root.clone().ok_or_else(|| {
        anyhow!("no media root configured; pass --media or set media_root in the device config")
    })
}

fn resolve_current_version(config: &DeviceConfig, explicit: Option<String>) -> Result<String> {
    if let Some(version) = explicit {
        return Ok(version);
    }
    let installed = read_installed_version(&config.version_file)?;
    Ok(installed.revision)
}

pub(crate) fn resolve_location(layout: &ArchiveLayout, input: &str) -> PathBuf {
    match ArchiveRole::parse(input) {
        Some(role) => layout.role_dir(role).to_path_buf(),
        None => PathBuf::from(input),
    }
}

pub(crate) fn check_json_record(outcome: &ResolveOutcome) -> Result<String> {
    let record = match outcome {
        ResolveOutcome::Found(resolved) => serde_json::json!({
            "upgrade_available": true,
            "version": resolved.candidate.raw_version,
            "package": resolved.candidate.path.display().to_string(),
        }),
        ResolveOutcome::NotFound => serde_json::json!({ "upgrade_available": false }),
    };
    serde_json::to_string_pretty(&record).context("failed to render check result as json")
}

pub(crate) fn first_boot_report_lines(report: &MigrationReport) -> Vec<String> {
    let mut lines = Vec::new();
    match report.decision {
        Some(decision) => lines.push(format!("decision: {}", decision.as_str())),
        None => lines.push("decision: skipped (restore probe failed)".to_string()),
    }
    if let Some(choice) = report.choice {
        let rendered = match choice {
            LegacyDataChoice::KeepAside => "kept aside",
            LegacyDataChoice::Discard => "discarded",
        };
        lines.push(format!("legacy data: {rendered}"));
    }
    if let Some(signal) = report.signal {
        lines.push(format!("restore signal: {}", signal.command_word()));
    }
    if report.relocated.files_seen() > 0 {
        lines.push(format!(
            "relocated files: {} moved, {} copied, {} kept existing",
            report.relocated.moved, report.relocated.copied, report.relocated.skipped_existing
        ));
    }
    if report.marker_written {
        lines.push("migration marker written".to_string());
    }
    lines
}

pub(crate) fn doctor_lines(config: &DeviceConfig, layout: &ArchiveLayout) -> Vec<String> {
    let media = config
        .media_root
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "not configured".to_string());
    let marker_state = if marker_exists(layout.marker_path()) {
        "present"
    } else {
        "absent"
    };

    vec![
        format!("data root: {}", layout.data_root().display()),
        format!("media root: {media}"),
        format!("current archive: {}", layout.current_dir().display()),
        format!("current vet archive: {}", layout.current_vet_dir().display()),
        format!("legacy archive: {}", layout.legacy_dir().display()),
        format!("legacy vet archive: {}", layout.legacy_vet_dir().display()),
        format!("staging: {}", layout.staging_dir().display()),
        format!("upgrade dir: {}", config.upgrade_dir),
        format!("version file: {}", config.version_file.display()),
        format!(
            "migration marker: {} ({marker_state})",
            layout.marker_path().display()
        ),
    ]
}
