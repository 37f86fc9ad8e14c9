use clap::Parser;
use lazy_move::cli::Args;
use lazy_move::config::types::{Config, LogLevel};
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn positionals_are_source_then_dest() {
    let args = Args::parse_from(["lazy_move", "/fast", "/slow"]);
    assert_eq!(args.source_dir, Some(PathBuf::from("/fast")));
    assert_eq!(args.dest_dir, Some(PathBuf::from("/slow")));
    assert!(!args.once);
    assert!(!args.fail_fast);
}

#[test]
fn positionals_are_optional() {
    let args = Args::parse_from(["lazy_move"]);
    assert!(args.source_dir.is_none() && args.dest_dir.is_none());
    assert!(Args::try_parse_from(["lazy_move", "/a", "/b", "/c"]).is_err());
}

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["lazy_move", "--debug", "--log-level", "quiet"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Debug)); // --debug wins

    let args = Args::parse_from(["lazy_move", "--log-level", "info"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Info));

    let args = Args::parse_from(["lazy_move"]);
    assert_eq!(args.effective_log_level(), None);
}

#[test]
fn apply_overrides_sets_flags() {
    let args = Args::parse_from([
        "lazy_move",
        "/fast",
        "/slow",
        "--timeout",
        "1h30m",
        "--min-file-age",
        "45",
        "--min-dir-age",
        "2d",
        "--log-file",
        "/tmp/lazy.log",
        "--preserve-times",
        "--dry-run",
    ]);
    let mut cfg = Config::new("/xml-src", "/xml-dst");
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.source_dir, PathBuf::from("/fast"));
    assert_eq!(cfg.dest_dir, PathBuf::from("/slow"));
    assert_eq!(cfg.timeout, Duration::from_secs(5400));
    assert_eq!(cfg.min_file_age, Duration::from_secs(45));
    assert_eq!(cfg.min_dir_age, Duration::from_secs(172_800));
    assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/lazy.log")));
    assert!(cfg.preserve_times);
    assert!(cfg.dry_run);
}

#[test]
fn unset_flags_leave_config_alone() {
    let args = Args::parse_from(["lazy_move"]);
    let mut cfg = Config::new("/xml-src", "/xml-dst").with_timing(
        Duration::from_secs(1),
        Duration::from_secs(2),
        Duration::from_secs(3),
    );
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.source_dir, PathBuf::from("/xml-src"));
    assert_eq!(cfg.timeout, Duration::from_secs(1));
    assert_eq!(cfg.min_dir_age, Duration::from_secs(3));
    assert_eq!(cfg.log_level, LogLevel::Normal);
}

#[test]
fn tick_is_an_alias_for_timeout() {
    let args = Args::parse_from(["lazy_move", "--tick", "2m"]);
    assert_eq!(args.timeout, Some(Duration::from_secs(120)));
}
