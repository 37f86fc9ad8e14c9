#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use lazy_move::config::types::Config;
use lazy_move::fs_ops::{move_file, Candidate, EntryKind};
use lazy_move::platform::mode_bits;
use lazy_move::MoveError;
use tempfile::tempdir;

fn candidate(path: &Path) -> Candidate {
    let meta = fs::metadata(path).expect("stat candidate");
    Candidate {
        path: path.to_path_buf(),
        kind: EntryKind::File,
        modified: meta.modified().expect("mtime"),
        size: meta.len(),
        mode: mode_bits(&meta),
    }
}

fn running_as_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[test]
fn source_mode_and_dest_dir_mode() {
    // Pin the umask so the on-demand 0751 directories are observable as such.
    unsafe {
        libc::umask(0o022);
    }
    let src_root = tempdir().unwrap();
    let dst_root = tempdir().unwrap();
    let cfg = Config::new(src_root.path(), dst_root.path());

    let src = src_root.path().join("deep").join("er").join("script.sh");
    fs::create_dir_all(src.parent().unwrap()).unwrap();
    fs::write(&src, b"#!/bin/sh\n").unwrap();
    fs::set_permissions(&src, fs::Permissions::from_mode(0o741)).unwrap();

    let dest = move_file(&cfg, &candidate(&src)).expect("move succeeds");

    let file_mode = fs::metadata(&dest).unwrap().permissions().mode() & 0o7777;
    assert_eq!(file_mode, 0o741, "file mode {file_mode:o}");
    for dir in [dst_root.path().join("deep"), dst_root.path().join("deep").join("er")] {
        let mode = fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o751, "dir {} mode {mode:o}", dir.display());
    }
}

#[test]
fn failed_source_delete_keeps_complete_destination() {
    if running_as_root() {
        eprintln!("skipping: running as root");
        return;
    }
    let src_root = tempdir().unwrap();
    let dst_root = tempdir().unwrap();
    let cfg = Config::new(src_root.path(), dst_root.path());

    let locked = src_root.path().join("locked");
    fs::create_dir_all(&locked).unwrap();
    let src = locked.join("keep.txt");
    fs::write(&src, b"payload").unwrap();
    let cand = candidate(&src);
    // No write permission on the parent: the unlink fails, reading still works.
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

    let err = move_file(&cfg, &cand).expect_err("unlink should fail");

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    match &err {
        MoveError::Io { op, path, .. } => {
            assert_eq!(*op, "remove source file");
            assert_eq!(path, &src);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.io_kind(), Some(std::io::ErrorKind::PermissionDenied));
    assert!(src.exists());
    let dest = dst_root.path().join("locked").join("keep.txt");
    assert_eq!(fs::read(dest).unwrap(), b"payload");
}

#[test]
fn unwritable_destination_is_permission_denied() {
    if running_as_root() {
        eprintln!("skipping: running as root");
        return;
    }
    let src_root = tempdir().unwrap();
    let dst_root = tempdir().unwrap();
    let cfg = Config::new(src_root.path(), dst_root.path());

    let src = src_root.path().join("sample.txt");
    fs::write(&src, b"hello").unwrap();
    fs::set_permissions(dst_root.path(), fs::Permissions::from_mode(0o555)).unwrap();

    let err = move_file(&cfg, &candidate(&src)).expect_err("dest not writable");

    fs::set_permissions(dst_root.path(), fs::Permissions::from_mode(0o755)).unwrap();

    let msg = format!("{err}");
    assert!(msg.contains("create destination file"), "unexpected error: {msg}");
    assert!(msg.contains("[os code: 13]"), "unexpected error: {msg}");
    assert!(src.exists());
}
