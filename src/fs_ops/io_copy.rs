//! Streaming copy between two already-open files.
//!
//! Features:
//! - Linux: in-kernel `copy_file_range` fast path, falling back to streaming
//!   when the filesystem pair doesn't support it (e.g. some network mounts).
//! - Buffered I/O with large (1 MiB) buffers to reduce syscall count.
//! - Returns the number of bytes actually transferred.
//!
//! Snapshot semantics: the source is read once from its current offset to EOF.
//! If it grows concurrently the count grows too; the caller compares the count
//! against the size recorded at scan time. Durability (`sync_all`) is left to
//! the caller so it can decide when the destination counts as written.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};

pub(crate) const BUF_SIZE: usize = 1024 * 1024; // 1 MiB buffers

/// Copy everything readable from `src` into `dst`; returns bytes copied.
pub(crate) fn copy_open_files(src: &mut File, dst: &mut File) -> io::Result<u64> {
    #[cfg(target_os = "linux")]
    {
        if let Some(bytes) = copy_file_range_all(src, dst)? {
            return Ok(bytes);
        }
    }

    let mut reader = BufReader::with_capacity(BUF_SIZE, src);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    Ok(bytes)
}

/// Returns `Ok(None)` when the kernel refuses before any byte was copied, so
/// the caller can fall back to streaming from unchanged file offsets.
#[cfg(target_os = "linux")]
fn copy_file_range_all(src: &File, dst: &File) -> io::Result<Option<u64>> {
    use std::os::unix::io::AsRawFd;

    let chunk: usize = 16 * 1024 * 1024; // 16 MiB per call
    let mut total: u64 = 0;
    loop {
        // SAFETY: both descriptors are owned by live `File`s for the duration of
        // the call; null offsets make the kernel use and advance the file offsets.
        let rc = unsafe {
            libc::copy_file_range(
                src.as_raw_fd(),
                std::ptr::null_mut(),
                dst.as_raw_fd(),
                std::ptr::null_mut(),
                chunk,
                0,
            )
        };
        if rc > 0 {
            total += rc as u64;
            continue;
        }
        if rc == 0 {
            return Ok(Some(total));
        }
        let err = io::Error::last_os_error();
        if err.kind() == io::ErrorKind::Interrupted {
            continue;
        }
        if total == 0 {
            if let Some(code) = err.raw_os_error() {
                if code == libc::EXDEV
                    || code == libc::ENOSYS
                    || code == libc::EINVAL
                    || code == libc::EPERM
                    || code == libc::EOPNOTSUPP
                {
                    return Ok(None);
                }
            }
        }
        // Partial copy then error: the caller removes the partial destination.
        return Err(err);
    }
}
