//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::{DEFAULT_MIN_DIR_AGE, DEFAULT_MIN_FILE_AGE, DEFAULT_TIMEOUT};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration used by the mover.
#[derive(Debug, Clone)]
pub struct Config {
    /// Fast tree that files are written into
    pub source_dir: PathBuf,
    /// Slow tree that aged files are archived into
    pub dest_dir: PathBuf,
    /// How often to look for files to move
    pub timeout: Duration,
    /// Minimum time since last modification before a file is moved
    pub min_file_age: Duration,
    /// Minimum time since last modification before an empty directory is removed
    pub min_dir_age: Duration,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// If true, log candidates but do not modify the filesystem
    pub dry_run: bool,
    /// If true, copy atime/mtime of moved files onto the destination
    pub preserve_times: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::new(),
            dest_dir: PathBuf::new(),
            timeout: DEFAULT_TIMEOUT,
            min_file_age: DEFAULT_MIN_FILE_AGE,
            min_dir_age: DEFAULT_MIN_DIR_AGE,
            log_level: LogLevel::Normal,
            log_file: None,
            dry_run: false,
            preserve_times: false,
        }
    }
}

impl Config {
    /// Construct a Config with explicit roots; other fields use defaults.
    pub fn new(source_dir: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            ..Default::default()
        }
    }

    /// Builder-style override of the three timing knobs.
    pub fn with_timing(mut self, timeout: Duration, min_file_age: Duration, min_dir_age: Duration) -> Self {
        self.timeout = timeout;
        self.min_file_age = min_file_age;
        self.min_dir_age = min_dir_age;
        self
    }

    /// Replace unset (zero) durations with the defaults.
    pub fn fill_defaults(&mut self) {
        if self.timeout.is_zero() {
            self.timeout = DEFAULT_TIMEOUT;
        }
        if self.min_file_age.is_zero() {
            self.min_file_age = DEFAULT_MIN_FILE_AGE;
        }
        if self.min_dir_age.is_zero() {
            self.min_dir_age = DEFAULT_MIN_DIR_AGE;
        }
    }
}
