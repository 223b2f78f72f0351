mod decision;
mod marker;
mod relocate;
mod restore;

pub use decision::{decide, FirstBootMigration, MigrationDecision, MigrationReport};
pub use marker::{marker_exists, write_marker};
pub use relocate::{relocate_tree, remove_tree_logged, RelocationStats};
pub use restore::{
    LegacyDataChoice, MigrationPrompt, ProductKind, RestoreExitCode, RestoreRunner, RestoreSignal,
    PROBE_COMMAND_WORD,
};
