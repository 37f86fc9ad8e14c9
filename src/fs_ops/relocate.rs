//! One mover iteration: scan, move aged files, prune aged empty directories.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

use crate::config::Config;
use crate::errors::MoveError;
use crate::policy::ResumePolicy;

use super::dir_prune::prune_dirs;
use super::file_move::{destination_for, move_file};
use super::scan::scan_source;

/// What a single iteration did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IterationReport {
    pub files_moved: usize,
    pub bytes_moved: u64,
    /// File moves that failed and were resumed past.
    pub files_failed: usize,
    /// Directories removed, in removal order.
    pub dirs_removed: Vec<PathBuf>,
    /// Aged directories that could not be removed.
    pub dirs_kept: usize,
    /// Some entries could not be scanned and the policy chose to skip them.
    pub scan_incomplete: bool,
}

fn cutoff(now: SystemTime, age: Duration) -> SystemTime {
    now.checked_sub(age).unwrap_or(UNIX_EPOCH)
}

/// Run one iteration against `config`.
///
/// Scan errors and file move errors go to `policy` as they happen; if it
/// declines to resume, the iteration stops there and the raw error is returned.
/// Directory removal failures are only logged. Nothing is touched when the scan finds no candidates.
pub fn run_iteration(config: &Config, policy: &dyn ResumePolicy) -> Result<IterationReport, MoveError> {
    let now = SystemTime::now();
    let scan = scan_source(
        &config.source_dir,
        cutoff(now, config.min_file_age),
        cutoff(now, config.min_dir_age),
        |err| policy.resume(config, err),
    )?;

    let mut report = IterationReport {
        scan_incomplete: scan.skipped > 0,
        ..IterationReport::default()
    };
    if scan.is_empty() {
        debug!(source = %config.source_dir.display(), "Nothing to move");
        return Ok(report);
    }

    for file in &scan.files {
        if config.dry_run {
            let dest = destination_for(&config.source_dir, &config.dest_dir, &file.path)?;
            let age = now.duration_since(file.modified).unwrap_or_default();
            info!(
                src = %file.path.display(),
                dest = %dest.display(),
                bytes = file.size,
                age_secs = age.as_secs(),
                "dry-run: would move file"
            );
            continue;
        }
        match move_file(config, file) {
            Ok(_) => {
                report.files_moved += 1;
                report.bytes_moved += file.size;
            }
            Err(err) => {
                if !policy.resume(config, &err) {
                    return Err(err);
                }
                report.files_failed += 1;
            }
        }
    }

    let (removed, kept) = prune_dirs(scan.dirs, config.dry_run);
    report.dirs_removed = removed;
    report.dirs_kept = kept;

    info!(
        files = report.files_moved,
        bytes = report.bytes_moved,
        failed = report.files_failed,
        dirs_removed = report.dirs_removed.len(),
        "Iteration finished"
    );
    Ok(report)
}
