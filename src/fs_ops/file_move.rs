//! File move implementation: copy, verify, sync, then delete the source.
//!
//! There is no cross-device rename here. The destination is written in place,
//! checked against the size recorded at scan time and synced before the source
//! is removed. Any failure before the source removal deletes the partial
//! destination, so a move either completes or leaves the source as it was.

use filetime::{set_file_handle_times, FileTime};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::MoveError;
use crate::platform::{create_dir_all_with_mode, create_truncate_with_mode};

use super::helpers::io_err;
use super::io_copy::copy_open_files;
use super::scan::Candidate;

/// Mode for destination directories created on demand (rwx / r-x / --x).
pub const DEST_DIR_MODE: u32 = 0o751;

/// Re-root `path` from under `source_root` to under `dest_root`, keeping the
/// full relative subdirectory structure.
pub fn destination_for(source_root: &Path, dest_root: &Path, path: &Path) -> Result<PathBuf, MoveError> {
    let rel = path
        .strip_prefix(source_root)
        .map_err(|_| MoveError::InvalidCandidate {
            path: path.to_path_buf(),
            root: source_root.to_path_buf(),
        })?;
    if rel.as_os_str().is_empty() {
        return Err(MoveError::InvalidCandidate {
            path: path.to_path_buf(),
            root: source_root.to_path_buf(),
        });
    }
    Ok(dest_root.join(rel))
}

/// Removes the destination on drop unless disarmed.
struct PartialDest<'a> {
    path: &'a Path,
    armed: bool,
}

impl<'a> PartialDest<'a> {
    fn new(path: &'a Path) -> Self {
        Self { path, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for PartialDest<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match fs::remove_file(self.path) {
            Ok(()) => debug!(dest = %self.path.display(), "removed partial destination"),
            Err(e) => warn!(dest = %self.path.display(), error = %e, "failed to remove partial destination"),
        }
    }
}

/// Move one file candidate into the destination tree. Returns the destination path.
pub fn move_file(config: &Config, candidate: &Candidate) -> Result<PathBuf, MoveError> {
    let src = candidate.path.as_path();
    let dest = destination_for(&config.source_dir, &config.dest_dir, src)?;

    if let Some(parent) = dest.parent() {
        create_dir_all_with_mode(parent, DEST_DIR_MODE)
            .map_err(io_err("create destination directory", parent))?;
    }

    let mut fout = create_truncate_with_mode(&dest, candidate.mode)
        .map_err(io_err("create destination file", &dest))?;
    let mut partial = PartialDest::new(&dest);

    // Close the destination before any cleanup runs (Windows refuses to unlink open files).
    let written = write_and_sync(config, candidate, &mut fout, &dest);
    drop(fout);
    let copied = written?;

    // From here on the destination is complete; a failed unlink must not remove it.
    partial.disarm();
    drop(partial);

    fs::remove_file(src).map_err(io_err("remove source file", src))?;

    info!(src = %src.display(), dest = %dest.display(), bytes = copied, "Moved file");
    Ok(dest)
}

/// Steps 4-7 of a move: open the source, copy, verify the byte count, sync.
fn write_and_sync(config: &Config, candidate: &Candidate, fout: &mut File, dest: &Path) -> Result<u64, MoveError> {
    let src = candidate.path.as_path();
    let mut fin = File::open(src).map_err(io_err("open source file", src))?;

    let copied = copy_open_files(&mut fin, fout).map_err(io_err("copy to destination file", dest))?;
    // More bytes than scanned means the source is still being appended to.
    if copied != candidate.size {
        return Err(MoveError::SizeMismatch {
            path: dest.to_path_buf(),
            expected: candidate.size,
            copied,
        });
    }

    if config.preserve_times {
        preserve_times(&fin, fout, dest);
    }

    fout.sync_all().map_err(io_err("sync destination file", dest))?;
    Ok(copied)
}

/// Best-effort copy of atime/mtime onto the destination handle.
fn preserve_times(fin: &File, fout: &File, dest: &Path) {
    let meta = match fin.metadata() {
        Ok(m) => m,
        Err(e) => {
            warn!(dest = %dest.display(), error = %e, "failed to stat source for timestamps");
            return;
        }
    };
    let atime = FileTime::from_last_access_time(&meta);
    let mtime = FileTime::from_last_modification_time(&meta);
    if let Err(e) = set_file_handle_times(fout, Some(atime), Some(mtime)) {
        warn!(dest = %dest.display(), error = %e, "failed to set atime/mtime on destination");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_keeps_relative_structure() {
        let dest = destination_for(
            Path::new("/fast/in"),
            Path::new("/slow/archive"),
            Path::new("/fast/in/a/b/c.txt"),
        )
        .unwrap();
        assert_eq!(dest, PathBuf::from("/slow/archive/a/b/c.txt"));
    }

    #[test]
    fn destination_rejects_paths_outside_or_equal_to_root() {
        let outside = destination_for(Path::new("/fast/in"), Path::new("/slow"), Path::new("/other/x"));
        assert!(matches!(outside, Err(MoveError::InvalidCandidate { .. })));
        let root = destination_for(Path::new("/fast/in"), Path::new("/slow"), Path::new("/fast/in"));
        assert!(matches!(root, Err(MoveError::InvalidCandidate { .. })));
    }
}
