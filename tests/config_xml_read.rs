//! Verify XML config is parsed and used without touching user state.

use std::fs;
use std::time::Duration;
use tempfile::tempdir;

use lazy_move::config::load_config_from_xml_path;
use lazy_move::{Config, LogLevel};

#[test]
fn reads_config_xml_and_applies_values() {
    let td = tempdir().expect("create tempdir");

    let cfg_path = td.path().join("config.xml");
    let source_dir = td.path().join("fast");
    let dest_dir = td.path().join("slow");
    let log_file = td.path().join("lazy_move.log");

    let xml = format!(
        r#"
<config>
  <source_dir>{}</source_dir>
  <dest_dir>{}</dest_dir>
  <timeout>30s</timeout>
  <min_file_age>10m</min_file_age>
  <min_dir_age>2h</min_dir_age>
  <log_level>debug</log_level>
  <log_file>{}</log_file>
  <preserve_times>true</preserve_times>
</config>
"#,
        source_dir.display(),
        dest_dir.display(),
        log_file.display()
    );
    fs::write(&cfg_path, xml).expect("write config.xml");

    let settings = load_config_from_xml_path(&cfg_path).expect("load_config_from_xml_path");
    let mut cfg = Config::default();
    settings.apply_to(&mut cfg);

    assert_eq!(cfg.source_dir, source_dir, "source_dir mismatch");
    assert_eq!(cfg.dest_dir, dest_dir, "dest_dir mismatch");
    assert_eq!(cfg.timeout, Duration::from_secs(30));
    assert_eq!(cfg.min_file_age, Duration::from_secs(600));
    assert_eq!(cfg.min_dir_age, Duration::from_secs(7200));
    assert_eq!(cfg.log_level, LogLevel::Debug, "log_level mismatch");
    assert_eq!(cfg.log_file.as_deref(), Some(log_file.as_path()), "log_file mismatch");
    assert!(cfg.preserve_times, "preserve_times should be true");
}

#[test]
fn missing_fields_keep_defaults() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(
        &cfg_path,
        "<config>\n  <source_dir>/fast</source_dir>\n  <log_file></log_file>\n  <preserve_times>  true  </preserve_times>\n</config>\n",
    )
    .unwrap();

    let settings = load_config_from_xml_path(&cfg_path).unwrap();
    assert!(settings.dest_dir.is_none());
    assert!(settings.timeout.is_none());
    assert!(settings.log_file.is_none(), "empty element means unset");
    assert_eq!(settings.preserve_times, Some(true));

    let mut cfg = Config::new("/cli-src", "/cli-dst");
    settings.apply_to(&mut cfg);
    assert_eq!(cfg.source_dir.to_str(), Some("/fast"));
    assert_eq!(cfg.dest_dir.to_str(), Some("/cli-dst"));
    assert_eq!(cfg.timeout, lazy_move::config::DEFAULT_TIMEOUT);
}
