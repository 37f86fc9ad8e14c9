//! Typed error definitions for lazy_move.
//! Every failure the mover can hand to a resume policy is a `MoveError` variant,
//! so policies can match on the kind instead of parsing messages.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::config::Config;
use crate::fs_ops::helpers::describe_io_error;
use crate::shutdown::CancelCause;

#[derive(Debug, Error)]
pub enum MoveError {
    #[error("empty source directory in mover configuration")]
    EmptySourceDir,

    #[error("empty destination directory in mover configuration")]
    EmptyDestDir,

    #[error("already running")]
    AlreadyRunning,

    #[error("while listing source directory {root}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("{}", describe_io_error(.op, .path, .source))]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("did not write expected byte count to {path}: expected {expected}, copied {copied}")]
    SizeMismatch {
        path: PathBuf,
        expected: u64,
        copied: u64,
    },

    #[error("candidate {path} is not under source directory {root}")]
    InvalidCandidate { path: PathBuf, root: PathBuf },

    #[error("{0}")]
    IterationAborted(IterationAborted),

    #[error("cancelled: {0}")]
    Cancelled(CancelCause),
}

impl MoveError {
    /// Stable machine-readable tag, used as a structured logging field.
    pub fn code(&self) -> &'static str {
        match self {
            MoveError::EmptySourceDir => "empty_source_dir",
            MoveError::EmptyDestDir => "empty_dest_dir",
            MoveError::AlreadyRunning => "already_running",
            MoveError::Walk { .. } => "walk",
            MoveError::Io { .. } => "io",
            MoveError::SizeMismatch { .. } => "size_mismatch",
            MoveError::InvalidCandidate { .. } => "invalid_candidate",
            MoveError::IterationAborted(_) => "iteration_aborted",
            MoveError::Cancelled(_) => "cancelled",
        }
    }

    /// Underlying `io::ErrorKind` when the failure came from a filesystem call.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            MoveError::Io { source, .. } => Some(source.kind()),
            MoveError::Walk { source, .. } => source.io_error().map(|e| e.kind()),
            _ => None,
        }
    }

    /// True for misconfiguration that never reaches the run loop.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            MoveError::EmptySourceDir | MoveError::EmptyDestDir | MoveError::AlreadyRunning
        )
    }
}

/// Envelope for an iteration that gave up.
///
/// Carries the configuration of the mover that was aborted and the error that
/// aborted it. The cause is not exposed through
/// `std::error::Error::source`; use [`IterationAborted::cause`] to unpack it.
#[derive(Debug)]
pub struct IterationAborted {
    config: Arc<Config>,
    cause: Box<MoveError>,
}

impl IterationAborted {
    pub(crate) fn new(config: Arc<Config>, cause: MoveError) -> Self {
        Self {
            config,
            cause: Box::new(cause),
        }
    }

    /// Configuration of the mover whose iteration was aborted.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The error that aborted the iteration.
    pub fn cause(&self) -> &MoveError {
        &self.cause
    }

    pub fn into_cause(self) -> MoveError {
        *self.cause
    }
}

impl fmt::Display for IterationAborted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("move iteration aborted")
    }
}
