//! Config module.
//! Provides configuration types, duration parsing, default paths, XML loading, and validation.

pub mod duration;
pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use duration::parse_duration;
pub use paths::{default_config_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use validate::validate_and_normalize;
pub use xml::{load_config_from_xml, load_config_from_xml_path, XmlSettings};

use std::time::Duration;

/// Default interval between iterations.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);
/// Default minimum file age before a move.
pub const DEFAULT_MIN_FILE_AGE: Duration = Duration::from_secs(5 * 60);
/// Default minimum empty-directory age before removal.
pub const DEFAULT_MIN_DIR_AGE: Duration = Duration::from_secs(60 * 60);

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "LAZY_MOVE_CONFIG";
