//! Application orchestrator.
//! Loads/merges config, initializes logging, installs signal handlers, validates paths,
//! and runs the mover (once or until interrupted).

use anyhow::{bail, Context, Result};
use tracing::{debug, error, info};

use lazy_move::cli::Args;
use lazy_move::config::{load_config_from_xml, CONFIG_ENV};
use lazy_move::output as out;
use lazy_move::{
    default_config_path, validate_and_normalize, CancelCause, CancelToken, Config, FailFast,
    MoveError, Mover,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    // Defaults < XML file < CLI flags
    let mut cfg = Config::default();
    let loaded = load_config_from_xml()?;
    if let Some((_, settings)) = &loaded {
        settings.apply_to(&mut cfg);
    }
    args.apply_overrides(&mut cfg);

    if cfg.source_dir.as_os_str().is_empty() || cfg.dest_dir.as_os_str().is_empty() {
        out::print_error("both SOURCE_DIR and DEST_DIR are required");
        out::print_info(&format!(
            "Pass them as arguments (lazy_move <SOURCE_DIR> <DEST_DIR>) or set <source_dir> and <dest_dir> in the config file. Run with --print-config to see where it is looked for, or set {CONFIG_ENV}."
        ));
        bail!("missing source or destination directory");
    }

    // Initialize logging; the guard must live until we return so file logs are flushed.
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;
    if let Some((path, _)) = &loaded {
        debug!(path = %path.display(), "Using config file");
    }
    debug!("Starting lazy_move: {:?}", args);

    validate_and_normalize(&mut cfg)?;

    let mut mover = Mover::new(cfg);
    if args.fail_fast {
        mover = mover.with_policy(FailFast);
    }

    if args.once {
        let report = mover.run_once().map_err(|e| {
            error!(code = e.code(), error = %e, "Iteration failed");
            e
        })?;
        out::print_summary(
            report.files_moved,
            report.bytes_moved,
            report.dirs_removed.len(),
            report.files_failed,
        );
        return Ok(());
    }

    let token = CancelToken::new();
    {
        let token = token.clone();
        ctrlc::set_handler(move || {
            out::print_warn("Received interrupt; finishing the current iteration...");
            token.cancel(CancelCause::Signal);
        })
        .context("failed to install signal handler")?;
    }

    let stopped = mover.run(&token);
    match &stopped {
        MoveError::Cancelled(cause) => info!(%cause, "Mover stopped"),
        MoveError::IterationAborted(aborted) => error!(
            code = aborted.cause().code(),
            error = %aborted.cause(),
            "Mover stopped after an iteration was aborted"
        ),
        other => error!(code = other.code(), error = %other, "Mover stopped"),
    }
    match stopped {
        MoveError::IterationAborted(aborted) => {
            let cause = aborted.into_cause();
            Err(anyhow::Error::new(cause).context("move iteration aborted"))
        }
        other => Err(other.into()),
    }
}

fn print_config_location() {
    if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {cfg_env}\n"));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
        return;
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default lazy_move config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet; built-in defaults and CLI flags will be used.");
            }
        }
        None => out::print_error("Could not determine a default config path"),
    }
}
