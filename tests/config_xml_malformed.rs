use std::fs;
use tempfile::tempdir;

use lazy_move::config::load_config_from_xml_path;

#[test]
fn malformed_xml_errors() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    // Missing closing tag for dest_dir
    let xml = r#"<config>
  <source_dir>/tmp/fast</source_dir>
  <dest_dir>/tmp/slow
</config>"#;
    fs::write(&cfg_path, xml).unwrap();
    let err = load_config_from_xml_path(&cfg_path).unwrap_err();
    assert!(format!("{err}").contains("parse config xml"));
}

#[test]
fn unknown_element_is_rejected() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><source_dir>/a</source_dir><sorce_dir>/b</sorce_dir></config>").unwrap();
    let err = load_config_from_xml_path(&cfg_path).unwrap_err();
    assert!(format!("{err}").contains("parse config xml"));
}

#[test]
fn bad_duration_names_the_field() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><min_dir_age>soon</min_dir_age></config>").unwrap();
    let err = load_config_from_xml_path(&cfg_path).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("<min_dir_age>"), "error was: {chain}");
}

#[test]
fn bad_log_level_is_rejected() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><log_level>loud</log_level></config>").unwrap();
    let err = load_config_from_xml_path(&cfg_path).unwrap_err();
    assert!(format!("{err:#}").contains("invalid log level"));
}
