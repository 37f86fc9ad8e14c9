//! Core library for `lazy_move`.
//!
//! Periodically moves files that have not been modified for a while from a
//! fast source tree into a slow destination tree, keeping the relative layout,
//! and removes source directories that have been empty for long enough.
//!
//! ```no_run
//! use lazy_move::{CancelToken, Config, Mover};
//!
//! let mover = Mover::new(Config::new("/mnt/fast/incoming", "/mnt/slow/archive"));
//! let token = CancelToken::new();
//! let stopped = mover.run(&token);
//! eprintln!("mover stopped: {stopped}");
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;
pub mod policy;
pub mod scheduler;
pub mod shutdown;

pub use config::types::{Config, LogLevel};
pub use config::{default_config_path, parse_duration, path_has_symlink_ancestor, validate_and_normalize};
pub use errors::{IterationAborted, MoveError};
pub use fs_ops::{move_file, run_iteration, Candidate, EntryKind, IterationReport};
pub use policy::{FailFast, LogAndResume, ResumePolicy};
pub use scheduler::{Mover, RunState};
pub use shutdown::{CancelCause, CancelToken};
