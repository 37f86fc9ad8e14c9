//! Source tree scan.
//! Walks the source tree once (lexical, depth-first) and classifies entries by age.
//! The root itself is never a candidate.

use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::trace;
use walkdir::WalkDir;

use crate::errors::MoveError;
use crate::platform::mode_bits;

use super::helpers::io_err;

/// What kind of entry a candidate is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// An entry selected by a scan because it crossed its age threshold.
/// Only valid for the iteration that produced it.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub modified: SystemTime,
    /// Size recorded at scan time (files only; 0 for directories).
    pub size: u64,
    /// Permission bits recorded at scan time.
    pub mode: u32,
}

/// Result of one scan. `skipped` counts entries whose errors the caller chose
/// to resume past; whatever lies under an unreadable directory is missing.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub files: Vec<Candidate>,
    pub dirs: Vec<Candidate>,
    pub skipped: usize,
}

impl ScanOutcome {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.dirs.is_empty()
    }
}

/// Walk `root` and collect files modified strictly before `file_cutoff` and
/// directories modified strictly before `dir_cutoff`.
///
/// Symlinks and special files are skipped: only regular files are moved and
/// links are never followed. Each walk error is handed to `resume` where it
/// happens; `true` skips the entry and carries on with its siblings, `false`
/// ends the scan with that error.
pub fn scan_source(
    root: &Path,
    file_cutoff: SystemTime,
    dir_cutoff: SystemTime,
    mut resume: impl FnMut(&MoveError) -> bool,
) -> Result<ScanOutcome, MoveError> {
    let mut out = ScanOutcome::default();

    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let checked = entry
            .map_err(|source| MoveError::Walk {
                root: root.to_path_buf(),
                source,
            })
            .and_then(|entry| {
                let meta = entry.metadata().map_err(|source| MoveError::Walk {
                    root: root.to_path_buf(),
                    source,
                })?;
                let modified = meta.modified().map_err(io_err("read modification time", entry.path()))?;
                Ok((entry, meta, modified))
            });
        let (entry, meta, modified) = match checked {
            Ok(found) => found,
            Err(err) => {
                if !resume(&err) {
                    return Err(err);
                }
                out.skipped += 1;
                continue;
            }
        };

        let ft = entry.file_type();
        let (kind, cutoff) = if ft.is_dir() {
            (EntryKind::Dir, dir_cutoff)
        } else if ft.is_file() {
            (EntryKind::File, file_cutoff)
        } else {
            trace!(path = %entry.path().display(), "skipping non-regular entry");
            continue;
        };
        if modified >= cutoff {
            continue;
        }

        let candidate = Candidate {
            size: if kind == EntryKind::File { meta.len() } else { 0 },
            mode: mode_bits(&meta),
            modified,
            kind,
            path: entry.into_path(),
        };
        match kind {
            EntryKind::File => out.files.push(candidate),
            EntryKind::Dir => out.dirs.push(candidate),
        }
    }

    Ok(out)
}
