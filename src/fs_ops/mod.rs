//! Filesystem operations: scanning, file moves and directory pruning.

mod dir_prune;
mod file_move;
pub(crate) mod helpers;
mod io_copy;
mod relocate;
mod scan;

pub use file_move::{destination_for, move_file, DEST_DIR_MODE};
pub use relocate::{run_iteration, IterationReport};
pub use scan::{scan_source, Candidate, EntryKind, ScanOutcome};
