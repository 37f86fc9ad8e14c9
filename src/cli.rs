//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Both positional roots are optional here; they may come from the XML config instead.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::parse_duration;
use crate::config::types::{Config, LogLevel};

/// Move aged files from a fast tree into a slow one.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Periodically move files that stopped changing from a fast directory tree to a slow one"
)]
pub struct Args {
    /// Directory to move files out of.
    #[arg(value_name = "SOURCE_DIR", value_hint = ValueHint::DirPath)]
    pub source_dir: Option<PathBuf>,

    /// Directory to move files into (created if missing).
    #[arg(value_name = "DEST_DIR", value_hint = ValueHint::DirPath)]
    pub dest_dir: Option<PathBuf>,

    /// How often to look for files to move (e.g. 30s, 5m, 1h30m).
    #[arg(long, visible_alias = "tick", value_name = "DUR", value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// Minimum time since last modification before a file is moved.
    #[arg(long, value_name = "DUR", value_parser = parse_duration)]
    pub min_file_age: Option<Duration>,

    /// Minimum time since last modification before an empty directory is removed.
    #[arg(long, value_name = "DUR", value_parser = parse_duration)]
    pub min_dir_age: Option<Duration>,

    /// Run a single iteration and exit.
    #[arg(long, help = "Run one iteration immediately and exit")]
    pub once: bool,

    /// Dry-run: log actions but do not modify the filesystem.
    #[arg(
        long,
        help = "Show what would be done, but do not modify files/directories"
    )]
    pub dry_run: bool,

    /// Stop on the first error instead of logging it and carrying on.
    #[arg(long, help = "Stop on the first error instead of logging and resuming")]
    pub fail_fast: bool,

    /// Copy access/modification times of moved files onto the destination.
    #[arg(long, help = "Preserve atime/mtime on moved files")]
    pub preserve_times: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Print where lazy_move will look for the config file (or LAZY_MOVE_CONFIG if set), then exit.
    #[arg(
        long,
        help = "Print the config file location used by lazy_move and exit"
    )]
    pub print_config: bool,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(src) = &self.source_dir {
            cfg.source_dir = src.clone();
        }
        if let Some(dst) = &self.dest_dir {
            cfg.dest_dir = dst.clone();
        }
        if let Some(t) = self.timeout {
            cfg.timeout = t;
        }
        if let Some(age) = self.min_file_age {
            cfg.min_file_age = age;
        }
        if let Some(age) = self.min_dir_age {
            cfg.min_dir_age = age;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if self.preserve_times {
            cfg.preserve_times = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::try_parse_from([
            "lazy_move",
            "/fast",
            "/slow",
            "--tick",
            "10s",
            "--min-file-age",
            "1m",
            "-d",
            "--dry-run",
        ])
        .unwrap();
        let mut cfg = Config::default();
        args.apply_overrides(&mut cfg);
        assert_eq!(cfg.source_dir, PathBuf::from("/fast"));
        assert_eq!(cfg.dest_dir, PathBuf::from("/slow"));
        assert_eq!(cfg.timeout, Duration::from_secs(10));
        assert_eq!(cfg.min_file_age, Duration::from_secs(60));
        assert_eq!(cfg.min_dir_age, crate::config::DEFAULT_MIN_DIR_AGE);
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert!(cfg.dry_run);
    }

    #[test]
    fn bad_duration_is_rejected() {
        assert!(Args::try_parse_from(["lazy_move", "--timeout", "soon"]).is_err());
        assert!(Args::try_parse_from(["lazy_move", "--min-dir-age", "0s"]).is_err());
    }
}
