//! Error-resume policies.
//!
//! A policy is consulted with every error the mover runs into and answers one
//! question: keep going (`true`) or stop (`false`). It is called from two places:
//! - inside an iteration, with the raw scan error or per-file move error;
//! - from the scheduler, with `MoveError::IterationAborted` once an iteration gave up.
//!
//! Closures `Fn(&Config, &MoveError) -> bool` are policies too.

use tracing::{error, warn};

use crate::config::Config;
use crate::errors::MoveError;

/// Decides whether the mover resumes after an error.
pub trait ResumePolicy: Send + Sync {
    fn resume(&self, config: &Config, err: &MoveError) -> bool;
}

impl<F> ResumePolicy for F
where
    F: Fn(&Config, &MoveError) -> bool + Send + Sync,
{
    fn resume(&self, config: &Config, err: &MoveError) -> bool {
        self(config, err)
    }
}

/// Default policy: log the error and always resume.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAndResume;

impl ResumePolicy for LogAndResume {
    fn resume(&self, config: &Config, err: &MoveError) -> bool {
        warn!(
            code = err.code(),
            source_dir = %config.source_dir.display(),
            error = %err,
            "Error while moving files"
        );
        true
    }
}

/// Stop on the first error of any kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailFast;

impl ResumePolicy for FailFast {
    fn resume(&self, config: &Config, err: &MoveError) -> bool {
        error!(
            code = err.code(),
            source_dir = %config.source_dir.display(),
            error = %err,
            "Error while moving files; stopping"
        );
        false
    }
}
