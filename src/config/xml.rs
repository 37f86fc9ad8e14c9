//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Every field is optional; present fields override built-in defaults and
//!   are in turn overridden by CLI flags.
//!
//! Notes:
//! - This module only reads the config file; directory validation happens elsewhere.
//! - Unknown XML fields are rejected so typos surface instead of being ignored.
//!
//! Example:
//! <config>
//!   <source_dir>/fast/incoming</source_dir>
//!   <dest_dir>/mnt/slow/archive</dest_dir>
//!   <timeout>5m</timeout>
//!   <min_file_age>5m</min_file_age>
//!   <min_dir_age>1h</min_dir_age>
//!   <log_level>normal</log_level>
//!   <log_file>/var/log/lazy_move.log</log_file>
//!   <preserve_times>false</preserve_times>
//! </config>

use anyhow::{anyhow, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use super::duration::parse_duration;
use super::paths::default_config_path;
use super::types::{Config, LogLevel};
use super::CONFIG_ENV;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    source_dir: Option<String>,
    dest_dir: Option<String>,
    timeout: Option<String>,
    min_file_age: Option<String>,
    min_dir_age: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    preserve_times: Option<bool>,
}

// Custom deserializer that trims surrounding whitespace for optional booleans
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<bool>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid boolean '{s}'"))),
    }
}

/// Settings read from the XML file; `None` means "not set in the file".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlSettings {
    pub source_dir: Option<PathBuf>,
    pub dest_dir: Option<PathBuf>,
    pub timeout: Option<Duration>,
    pub min_file_age: Option<Duration>,
    pub min_dir_age: Option<Duration>,
    pub log_level: Option<LogLevel>,
    pub log_file: Option<PathBuf>,
    pub preserve_times: Option<bool>,
}

impl XmlSettings {
    /// Overlay the values present in the file onto `cfg`.
    pub fn apply_to(&self, cfg: &mut Config) {
        if let Some(p) = &self.source_dir {
            cfg.source_dir = p.clone();
        }
        if let Some(p) = &self.dest_dir {
            cfg.dest_dir = p.clone();
        }
        if let Some(d) = self.timeout {
            cfg.timeout = d;
        }
        if let Some(d) = self.min_file_age {
            cfg.min_file_age = d;
        }
        if let Some(d) = self.min_dir_age {
            cfg.min_dir_age = d;
        }
        if let Some(l) = &self.log_level {
            cfg.log_level = l.clone();
        }
        if let Some(p) = &self.log_file {
            cfg.log_file = Some(p.clone());
        }
        if let Some(b) = self.preserve_times {
            cfg.preserve_times = b;
        }
    }
}

fn non_empty_path(s: Option<&str>) -> Option<PathBuf> {
    s.map(str::trim).filter(|t| !t.is_empty()).map(PathBuf::from)
}

fn duration_field(name: &str, s: Option<&str>) -> Result<Option<Duration>> {
    match s.map(str::trim).filter(|t| !t.is_empty()) {
        None => Ok(None),
        Some(t) => parse_duration(t)
            .map(Some)
            .map_err(|e| anyhow!("<{name}>: {e}")),
    }
}

// Map XmlConfig -> XmlSettings
fn xml_to_settings(parsed: XmlConfig) -> Result<XmlSettings> {
    let log_level = match parsed.log_level.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        None => None,
        Some(s) => Some(s.parse::<LogLevel>().map_err(|e| anyhow!("<log_level>: {e}"))?),
    };

    Ok(XmlSettings {
        source_dir: non_empty_path(parsed.source_dir.as_deref()),
        dest_dir: non_empty_path(parsed.dest_dir.as_deref()),
        timeout: duration_field("timeout", parsed.timeout.as_deref())?,
        min_file_age: duration_field("min_file_age", parsed.min_file_age.as_deref())?,
        min_dir_age: duration_field("min_dir_age", parsed.min_dir_age.as_deref())?,
        log_level,
        log_file: non_empty_path(parsed.log_file.as_deref()),
        preserve_times: parsed.preserve_times,
    })
}

/// Load settings from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<XmlSettings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_settings(parsed).with_context(|| format!("invalid value in config xml '{}'", path.display()))
}

/// Load settings from `$LAZY_MOVE_CONFIG` or the default config path.
///
/// - Explicit env path: the file must exist.
/// - Default path: a missing file simply means "no config" (`Ok(None)`).
pub fn load_config_from_xml() -> Result<Option<(PathBuf, XmlSettings)>> {
    let explicit = env::var_os(CONFIG_ENV).is_some_and(|v| !v.is_empty());
    let Some(path) = default_config_path() else {
        return Ok(None);
    };

    if !path.exists() {
        if explicit {
            return Err(anyhow!(
                "{CONFIG_ENV} points to a missing config file: {}",
                path.display()
            ));
        }
        debug!(path = %path.display(), "no config file at default location");
        return Ok(None);
    }

    let settings = load_config_from_xml_path(&path)?;
    debug!(path = %path.display(), ?settings, "loaded config file");
    Ok(Some((path, settings)))
}
