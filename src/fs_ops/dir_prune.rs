//! Removal of aged, empty source directories.
//! Deepest paths go first so a parent is only tried after its candidate children.
//! Failures are expected (new files may have arrived since the scan) and are only logged.

use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info};

use super::helpers::describe_io_error;
use super::scan::Candidate;

/// Order directory candidates longest path first. Stable for equal lengths.
pub(crate) fn order_deepest_first(dirs: &mut [Candidate]) {
    dirs.sort_by(|a, b| b.path.as_os_str().len().cmp(&a.path.as_os_str().len()));
}

/// Try to remove every directory candidate. Returns the removed paths in
/// removal order and the number of directories left in place.
pub(crate) fn prune_dirs(mut dirs: Vec<Candidate>, dry_run: bool) -> (Vec<PathBuf>, usize) {
    order_deepest_first(&mut dirs);

    let mut removed = Vec::new();
    let mut kept = 0usize;
    for dir in dirs {
        if dry_run {
            info!(path = %dir.path.display(), "dry-run: would remove empty directory");
            continue;
        }
        match fs::remove_dir(&dir.path) {
            Ok(()) => {
                info!(path = %dir.path.display(), "Removed empty directory");
                removed.push(dir.path);
            }
            Err(e) => {
                kept += 1;
                let msg = describe_io_error("remove directory", &dir.path, &e);
                if is_not_empty(&e) {
                    debug!("{msg}");
                } else {
                    info!("{msg}");
                }
            }
        }
    }
    (removed, kept)
}

fn is_not_empty(e: &io::Error) -> bool {
    if e.kind() == io::ErrorKind::DirectoryNotEmpty {
        return true;
    }
    #[cfg(unix)]
    {
        // Some platforms report EEXIST for rmdir on a non-empty directory.
        matches!(e.raw_os_error(), Some(code) if code == libc::ENOTEMPTY || code == libc::EEXIST)
    }
    #[cfg(not(unix))]
    {
        false
    }
}
