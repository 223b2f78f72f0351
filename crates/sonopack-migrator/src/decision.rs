use std::path::Path;

use sonopack_core::ArchiveLayout;
use tracing::{info, warn};

use crate::marker::{marker_exists, write_marker};
use crate::relocate::{relocate_tree, remove_tree_logged, RelocationStats};
use crate::restore::{
    LegacyDataChoice, MigrationPrompt, ProductKind, RestoreExitCode, RestoreRunner, RestoreSignal,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationDecision {
    AlreadyMigrated,
    NoPriorData,
    SameTypeNoAction,
    SameTypeVetConsolidate,
    TypeChangedAwaitingUserChoice,
    UnrecognizedExitCode(i32),
}

impl MigrationDecision {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AlreadyMigrated => "already-migrated",
            Self::NoPriorData => "no-prior-data",
            Self::SameTypeNoAction => "same-type-no-action",
            Self::SameTypeVetConsolidate => "vet-consolidate",
            Self::TypeChangedAwaitingUserChoice => "type-changed",
            Self::UnrecognizedExitCode(_) => "unrecognized-exit-code",
        }
    }
}

pub fn decide(
    product: ProductKind,
    exit: RestoreExitCode,
    marker_present: bool,
) -> MigrationDecision {
    if marker_present {
        return MigrationDecision::AlreadyMigrated;
    }

    match (exit, product) {
        (RestoreExitCode::NoSchema, _) => MigrationDecision::NoPriorData,
        (RestoreExitCode::SameType, ProductKind::Human) => MigrationDecision::SameTypeNoAction,
        (RestoreExitCode::SameType, ProductKind::Veterinary) => {
            MigrationDecision::SameTypeVetConsolidate
        }
        (RestoreExitCode::TypeChanged, _) => MigrationDecision::TypeChangedAwaitingUserChoice,
        (RestoreExitCode::Unrecognized(code), _) => MigrationDecision::UnrecognizedExitCode(code),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationReport {
    pub decision: Option<MigrationDecision>,
    pub choice: Option<LegacyDataChoice>,
    pub signal: Option<RestoreSignal>,
    pub relocated: RelocationStats,
    pub marker_written: bool,
}

impl MigrationReport {
    fn new(decision: Option<MigrationDecision>) -> Self {
        Self {
            decision,
            choice: None,
            signal: None,
            relocated: RelocationStats::default(),
            marker_written: false,
        }
    }
}

pub struct FirstBootMigration<'a> {
    layout: &'a ArchiveLayout,
    product: ProductKind,
}

impl<'a> FirstBootMigration<'a> {
    pub fn new(layout: &'a ArchiveLayout, product: ProductKind) -> Self {
        Self { layout, product }
    }

    pub fn run(
        &self,
        runner: &mut dyn RestoreRunner,
        prompt: &mut dyn MigrationPrompt,
    ) -> MigrationReport {
        let code = match runner.probe(self.product) {
            Ok(code) => code,
            Err(err) => {
                warn!(error = %err, "restore probe failed; skipping archive migration");
                return MigrationReport::new(None);
            }
        };

        let decision = decide(
            self.product,
            RestoreExitCode::from_code(code),
            marker_exists(self.layout.marker_path()),
        );
        info!(
            product = self.product.as_str(),
            code,
            decision = decision.as_str(),
            "first-boot archive migration decision"
        );
        self.execute(decision, runner, prompt)
    }

    fn execute(
        &self,
        decision: MigrationDecision,
        runner: &mut dyn RestoreRunner,
        prompt: &mut dyn MigrationPrompt,
    ) -> MigrationReport {
        let mut report = MigrationReport::new(Some(decision));

        match decision {
            MigrationDecision::AlreadyMigrated
            | MigrationDecision::NoPriorData
            | MigrationDecision::SameTypeNoAction => {}
            MigrationDecision::UnrecognizedExitCode(code) => {
                warn!(code, "unrecognized restore exit code; archives left untouched");
            }
            MigrationDecision::SameTypeVetConsolidate => {
                let source = self.layout.current_dir();
                if !source.is_dir() {
                    return report;
                }
                report.relocated = relocate_tree(source, self.layout.current_vet_dir());
                remove_tree_logged(source);
                report.marker_written = self.freeze(decision);
            }
            MigrationDecision::TypeChangedAwaitingUserChoice => {
                let choice = match prompt.legacy_data_choice(self.product) {
                    Ok(choice) => choice,
                    Err(err) => {
                        warn!(error = %err, "legacy-data prompt failed; archives left untouched");
                        return report;
                    }
                };
                report.choice = Some(choice);

                let signal = match choice {
                    LegacyDataChoice::KeepAside => {
                        let mut stats = RelocationStats::default();
                        match self.product {
                            ProductKind::Human => {
                                stats.accumulate(self.set_aside(
                                    self.layout.current_dir(),
                                    self.layout.legacy_vet_dir(),
                                ));
                                stats.accumulate(self.set_aside(
                                    self.layout.current_vet_dir(),
                                    self.layout.legacy_vet_dir(),
                                ));
                            }
                            ProductKind::Veterinary => {
                                stats.accumulate(self.set_aside(
                                    self.layout.current_dir(),
                                    self.layout.legacy_dir(),
                                ));
                            }
                        }
                        report.relocated = stats;
                        RestoreSignal::NoCleanDelete
                    }
                    LegacyDataChoice::Discard => {
                        remove_tree_logged(self.layout.current_dir());
                        RestoreSignal::CleanDelete
                    }
                };

                report.signal = Some(signal);
                if let Err(err) = runner.signal(signal, self.product) {
                    warn!(
                        error = %err,
                        command = signal.command_word(),
                        "failed to signal the restore executable"
                    );
                }
                report.marker_written = self.freeze(decision);
            }
        }

        report
    }

    fn set_aside(&self, source: &Path, target: &Path) -> RelocationStats {
        if !source.is_dir() {
            return RelocationStats::default();
        }
        let stats = relocate_tree(source, target);
        remove_tree_logged(source);
        stats
    }

    fn freeze(&self, decision: MigrationDecision) -> bool {
        match write_marker(self.layout.marker_path(), decision.as_str()) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "failed to write the migration marker");
                false
            }
        }
    }
}
