use lazy_move::config::types::Config;
use lazy_move::config::{DEFAULT_MIN_DIR_AGE, DEFAULT_MIN_FILE_AGE, DEFAULT_TIMEOUT};
use std::time::Duration;

#[test]
fn config_defaults_are_sane() {
    let cfg = Config::default();

    assert!(cfg.source_dir.as_os_str().is_empty());
    assert!(cfg.dest_dir.as_os_str().is_empty());
    assert_eq!(cfg.timeout, Duration::from_secs(300));
    assert_eq!(cfg.min_file_age, Duration::from_secs(300));
    assert_eq!(cfg.min_dir_age, Duration::from_secs(3600));
    assert_eq!(format!("{}", cfg.log_level), "normal");
    assert!(cfg.log_file.is_none());
    assert!(!cfg.dry_run, "dry_run should default to false");
    assert!(!cfg.preserve_times, "preserve_times should default to false");
}

#[test]
fn zero_durations_fall_back_to_defaults() {
    let mut cfg = Config::new("/a", "/b").with_timing(Duration::ZERO, Duration::from_secs(7), Duration::ZERO);
    cfg.fill_defaults();
    assert_eq!(cfg.timeout, DEFAULT_TIMEOUT);
    assert_eq!(cfg.min_file_age, Duration::from_secs(7));
    assert_eq!(cfg.min_dir_age, DEFAULT_MIN_DIR_AGE);
    assert_ne!(DEFAULT_MIN_FILE_AGE, Duration::ZERO);
}
