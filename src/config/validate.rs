//! Config validation logic.
//! Verifies directory existence, readability/writability and disjoint roots
//! before the mover is started by the CLI.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use crate::fs_ops::DEST_DIR_MODE;
use crate::platform::create_dir_all_with_mode;

use super::types::Config;

/// Validate roots, fill unset durations and canonicalize both paths in place.
///
/// - source_dir must exist, be a directory and be readable.
/// - dest_dir is created if missing and must be writable.
/// - The two roots must differ and neither may contain the other.
pub fn validate_and_normalize(cfg: &mut Config) -> Result<()> {
    if cfg.source_dir.as_os_str().is_empty() {
        bail!("source_dir is not set (pass SOURCE_DIR or set <source_dir> in the config file)");
    }
    if cfg.dest_dir.as_os_str().is_empty() {
        bail!("dest_dir is not set (pass DEST_DIR or set <dest_dir> in the config file)");
    }
    cfg.fill_defaults();

    ensure_dir_exists_and_is_dir(&cfg.source_dir, "source_dir")?;
    ensure_readable(&cfg.source_dir, "source_dir")?;
    ensure_dir_is_or_create(&cfg.dest_dir, "dest_dir")?;
    ensure_writable(&cfg.dest_dir, "dest_dir")?;

    let src_real = dunce::canonicalize(&cfg.source_dir)
        .with_context(|| format!("canonicalize source_dir '{}'", cfg.source_dir.display()))?;
    let dst_real = dunce::canonicalize(&cfg.dest_dir)
        .with_context(|| format!("canonicalize dest_dir '{}'", cfg.dest_dir.display()))?;

    if src_real == dst_real {
        bail!(
            "source_dir and dest_dir resolve to the same path: '{}'",
            src_real.display()
        );
    }
    if dst_real.starts_with(&src_real) {
        bail!(
            "dest_dir '{}' must not be inside source_dir '{}'",
            dst_real.display(),
            src_real.display()
        );
    }
    if src_real.starts_with(&dst_real) {
        bail!(
            "source_dir '{}' must not be inside dest_dir '{}'",
            src_real.display(),
            dst_real.display()
        );
    }

    cfg.source_dir = src_real;
    cfg.dest_dir = dst_real;

    info!(
        source = %cfg.source_dir.display(),
        dest = %cfg.dest_dir.display(),
        timeout = ?cfg.timeout,
        min_file_age = ?cfg.min_file_age,
        min_dir_age = ?cfg.min_dir_age,
        "Config validated"
    );
    Ok(())
}

/// Ensure path exists and is a directory; emit clear errors with path context.
fn ensure_dir_exists_and_is_dir(path: &Path, name: &str) -> Result<()> {
    if !path.exists() {
        error!("{name} does not exist: {}", path.display());
        bail!("{name} does not exist: {}", path.display());
    }
    if !path.is_dir() {
        error!("{name} is not a directory: {}", path.display());
        bail!("{name} is not a directory: {}", path.display());
    }
    Ok(())
}

/// Ensure directory is readable by attempting to open its entries.
fn ensure_readable(path: &Path, name: &str) -> Result<()> {
    fs::read_dir(path).with_context(|| {
        format!("Cannot read {name} directory '{}'; check permissions", path.display())
    })?;
    debug!("{name} readable: {}", path.display());
    Ok(())
}

/// Ensure directory exists (create if missing). If exists, it must be a directory.
fn ensure_dir_is_or_create(path: &Path, name: &str) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            error!("{name} exists but isn't a directory: {}", path.display());
            bail!("{name} exists but isn't a directory: {}", path.display());
        }
    } else {
        create_dir_all_with_mode(path, DEST_DIR_MODE).with_context(|| {
            format!("Failed to create {name} directory '{}'", path.display())
        })?;
        info!("Created {name} directory: {}", path.display());
    }
    Ok(())
}

/// Ensure directory is writable using a non-destructive probe file.
fn ensure_writable(path: &Path, name: &str) -> Result<()> {
    let probe = path.join(format!(".lazy_move_probe_{}.tmp", std::process::id()));
    fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&probe)
        .with_context(|| {
            format!("Cannot write to {name} '{}'; check permissions", path.display())
        })?;
    let _ = fs::remove_file(&probe);
    debug!("{name} writable: {}", path.display());
    Ok(())
}
