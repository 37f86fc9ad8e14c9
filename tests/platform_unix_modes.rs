#![cfg(unix)]

use lazy_move::platform::{create_truncate_with_mode, mode_bits, open_log_file_secure_append};
use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use tempfile::tempdir;

#[test]
fn create_truncate_forces_exact_mode() {
    let td = tempdir().expect("tempdir");
    let path = td.path().join("f.bin");
    fs::write(&path, b"previous contents that are long").unwrap();

    let mut f = create_truncate_with_mode(&path, 0o640).expect("create");
    f.write_all(b"new").unwrap();
    drop(f);

    let meta = fs::metadata(&path).unwrap();
    assert_eq!(meta.permissions().mode() & 0o777, 0o640);
    assert_eq!(mode_bits(&meta), 0o640);
    assert_eq!(fs::read(&path).unwrap(), b"new");
}

#[test]
fn new_log_file_is_private() {
    let td = tempdir().expect("tempdir");
    let path = td.path().join("logs").join("lazy_move.log");
    let mut f = open_log_file_secure_append(&path).expect("open log");
    writeln!(f, "hello").unwrap();
    drop(f);
    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600, "expected log mode 0600, got {mode:o}");
}
