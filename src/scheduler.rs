//! The periodic mover.
//!
//! A `Mover` owns an immutable configuration and a resume policy. `run` blocks
//! the calling thread: it waits one tick, runs an iteration, and repeats until
//! the cancel token fires or the policy declines to resume. Only one `run` may
//! be active per mover at a time; a stopped mover can be run again.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Config;
use crate::errors::{IterationAborted, MoveError};
use crate::fs_ops::{run_iteration, IterationReport};
use crate::policy::{LogAndResume, ResumePolicy};
use crate::shutdown::CancelToken;

const NOT_STARTED: u8 = 0;
const RUNNING: u8 = 1;
const STOPPED: u8 = 2;

/// Lifecycle of a mover's run loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    Stopped,
}

pub struct Mover {
    config: Arc<Config>,
    policy: Box<dyn ResumePolicy>,
    state: AtomicU8,
}

impl std::fmt::Debug for Mover {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mover")
            .field("config", &self.config)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Marks the mover stopped when a run or single iteration exits by any path.
struct RunGuard<'a>(&'a AtomicU8);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(STOPPED, Ordering::Release);
    }
}

impl Mover {
    /// Build a mover with the default `LogAndResume` policy.
    /// Zero durations in `config` are replaced by the defaults.
    pub fn new(mut config: Config) -> Self {
        config.fill_defaults();
        Self {
            config: Arc::new(config),
            policy: Box::new(LogAndResume),
            state: AtomicU8::new(NOT_STARTED),
        }
    }

    /// Replace the resume policy.
    pub fn with_policy(mut self, policy: impl ResumePolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> RunState {
        match self.state.load(Ordering::Acquire) {
            NOT_STARTED => RunState::NotStarted,
            RUNNING => RunState::Running,
            _ => RunState::Stopped,
        }
    }

    /// Run a single iteration right away, outside the loop.
    /// Fails with `AlreadyRunning` while `run` or another `run_once` is active.
    pub fn run_once(&self) -> Result<IterationReport, MoveError> {
        let _guard = self.claim()?;
        self.check_paths()?;
        run_iteration(&self.config, self.policy.as_ref())
    }

    /// Run the mover loop until it stops, returning why it stopped.
    ///
    /// - `AlreadyRunning` if another `run` or `run_once` on this mover is active.
    /// - `EmptySourceDir` / `EmptyDestDir` for an unusable configuration.
    /// - `Cancelled` once `cancel` fires; an iteration in progress finishes first.
    /// - `IterationAborted` when the policy declined to resume after an iteration gave up.
    pub fn run(&self, cancel: &CancelToken) -> MoveError {
        let _guard = match self.claim() {
            Ok(guard) => guard,
            Err(e) => return e,
        };

        if let Err(e) = self.check_paths() {
            return e;
        }

        info!(
            source = %self.config.source_dir.display(),
            dest = %self.config.dest_dir.display(),
            tick = ?self.config.timeout,
            "Mover started"
        );

        loop {
            if let Some(cause) = cancel.wait_timeout(self.config.timeout) {
                info!(%cause, "Mover stopping");
                return MoveError::Cancelled(cause);
            }
            debug!("Tick");
            match run_iteration(&self.config, self.policy.as_ref()) {
                Ok(_) => {}
                Err(cause) => {
                    let aborted = MoveError::IterationAborted(IterationAborted::new(
                        Arc::clone(&self.config),
                        cause,
                    ));
                    if !self.policy.resume(&self.config, &aborted) {
                        return aborted;
                    }
                }
            }
        }
    }

    /// Move from NotStarted or Stopped to Running; the guard moves back to Stopped.
    fn claim(&self) -> Result<RunGuard<'_>, MoveError> {
        self.state
            .compare_exchange(NOT_STARTED, RUNNING, Ordering::AcqRel, Ordering::Acquire)
            .or_else(|_| {
                self.state
                    .compare_exchange(STOPPED, RUNNING, Ordering::AcqRel, Ordering::Acquire)
            })
            .map_err(|_| MoveError::AlreadyRunning)?;
        Ok(RunGuard(&self.state))
    }

    fn check_paths(&self) -> Result<(), MoveError> {
        if self.config.source_dir.as_os_str().is_empty() {
            return Err(MoveError::EmptySourceDir);
        }
        if self.config.dest_dir.as_os_str().is_empty() {
            return Err(MoveError::EmptyDestDir);
        }
        Ok(())
    }
}
