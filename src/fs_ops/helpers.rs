//! I/O helper utilities.
//!
//! Provides small adapters to enrich io::Error with actionable context/hints.
//! The original `io::Error` is kept as the error source so callers (and resume
//! policies) can still inspect its kind.
//!
//! Usage:
//!   fs::remove_file(p).map_err(io_err("remove source file", p))?;

use std::io;
use std::path::Path;

use crate::errors::MoveError;

/// Format a human-friendly message with op/path plus platform-aware hints.
pub(crate) fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" (permission denied; check ownership and write permissions)");
                }
                libc::ENOENT => {
                    msg.push_str(" (path not found; it may have been removed since the scan)");
                }
                libc::ENOTEMPTY | libc::EEXIST if op.contains("directory") => {
                    msg.push_str(" (directory not empty; new entries arrived since the scan)");
                }
                libc::EBUSY => {
                    msg.push_str(" (resource busy; ensure no other process is writing)");
                }
                libc::ENOSPC => {
                    msg.push_str(" (insufficient space on device)");
                }
                libc::EROFS => {
                    msg.push_str(" (read-only filesystem; cannot write here)");
                }
                libc::ESTALE => {
                    msg.push_str(" (stale network file handle; check the destination mount)");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str(" (filename or path too long; shorten path segments)");
                }
                libc::EMFILE => {
                    msg.push_str(" (process file descriptor limit reached)");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str(" (access denied; check permissions)"), // ERROR_ACCESS_DENIED
                32 => msg.push_str(" (sharing violation; file is in use)"), // ERROR_SHARING_VIOLATION
                2 | 3 => msg.push_str(" (path not found)"), // FILE/PATH NOT FOUND
                112 => msg.push_str(" (insufficient disk space)"), // ERROR_DISK_FULL
                145 => msg.push_str(" (directory not empty)"), // ERROR_DIR_NOT_EMPTY
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str(" (permission denied; check ownership and write permissions)");
            }
            io::ErrorKind::NotFound => {
                msg.push_str(" (path not found; it may have been removed since the scan)");
            }
            io::ErrorKind::DirectoryNotEmpty => {
                msg.push_str(" (directory not empty; new entries arrived since the scan)");
            }
            _ => {}
        }
    }

    msg
}

/// Adapter for `.map_err(...)`: wraps an `io::Error` into `MoveError::Io`
/// tagged with the operation and path.
pub(crate) fn io_err<'a>(op: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> MoveError + 'a {
    move |source: io::Error| MoveError::Io {
        op,
        path: path.to_path_buf(),
        source,
    }
}
