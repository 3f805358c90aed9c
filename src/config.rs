//! Run configuration.
//!
//! A [`Config`] is built once at startup, either from defaults, from a
//! `key=value` text file, or through the builder methods, and then passed by
//! reference to both the parser and the emitter.
//!
//! # File Format
//!
//! One assignment per line. Blank lines, lines without exactly one `=`, and
//! unknown keys are ignored.
//!
//! ```text
//! Input=全部消息记录.txt
//! OutputDir=output
//! OutputFileName={Group}-{Name}.csv
//! IgnoreEmpty=false
//! IgnoreRecent=true
//! MultiLines=true
//! ```
//!
//! # Example
//!
//! ```rust
//! use qqtable::config::Config;
//!
//! let config = Config::parse_str("OutputDir=tables\nIgnoreEmpty=True\n")?;
//! assert_eq!(config.output_dir.to_str(), Some("tables"));
//! assert!(config.ignore_empty);
//! assert!(config.ignore_recent);
//! # Ok::<(), qqtable::QqTableError>(())
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{QqTableError, Result};
use crate::message::BodyJoin;

/// Default name of the configuration file, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "config.txt";

/// Placeholder replaced by the conversation group in file name templates.
pub const GROUP_PLACEHOLDER: &str = "{Group}";

/// Placeholder replaced by the conversation name in file name templates.
pub const NAME_PLACEHOLDER: &str = "{Name}";

/// Settings shared by the parser and the table emitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path of the exported chat history (default: `全部消息记录.txt`)
    pub input: PathBuf,

    /// Directory receiving the tables; wiped on every run (default: `output`)
    pub output_dir: PathBuf,

    /// File name template with `{Group}` and `{Name}` placeholders
    /// (default: `{Group}-{Name}.csv`)
    pub output_file_name: String,

    /// Drop messages with empty content (default: false)
    pub ignore_empty: bool,

    /// Skip the "recent contacts" pseudo-group (default: true)
    pub ignore_recent: bool,

    /// Keep line breaks between body lines (default: true)
    pub multi_lines: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("全部消息记录.txt"),
            output_dir: PathBuf::from("output"),
            output_file_name: format!("{GROUP_PLACEHOLDER}-{NAME_PLACEHOLDER}.csv"),
            ignore_empty: false,
            ignore_recent: true,
            multi_lines: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the configuration file at `path`.
    ///
    /// A missing file is not an error: defaults are returned.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => Self::parse_str(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Parses `key=value` assignments on top of the defaults.
    pub fn parse_str(content: &str) -> Result<Self> {
        let mut config = Self::default();
        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            let mut parts = line.split('=');
            let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next())
            else {
                continue;
            };
            config.apply(key, value)?;
        }
        Ok(config)
    }

    /// Applies one assignment. Unknown keys are ignored.
    fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "Input" => self.input = PathBuf::from(value),
            "OutputDir" => self.output_dir = PathBuf::from(value),
            "OutputFileName" => self.output_file_name = value.to_string(),
            "IgnoreEmpty" => self.ignore_empty = parse_bool(key, value)?,
            "IgnoreRecent" => self.ignore_recent = parse_bool(key, value)?,
            "MultiLines" => self.multi_lines = parse_bool(key, value)?,
            _ => tracing::debug!(key, "ignoring unknown config key"),
        }
        Ok(())
    }

    /// Returns how body lines are joined.
    pub fn body_join(&self) -> BodyJoin {
        BodyJoin::from_multi_lines(self.multi_lines)
    }

    /// Sets the input path.
    #[must_use]
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the file name template.
    #[must_use]
    pub fn with_output_file_name(mut self, template: impl Into<String>) -> Self {
        self.output_file_name = template.into();
        self
    }

    /// Sets whether empty messages are dropped.
    #[must_use]
    pub fn with_ignore_empty(mut self, ignore: bool) -> Self {
        self.ignore_empty = ignore;
        self
    }

    /// Sets whether the "recent contacts" group is skipped.
    #[must_use]
    pub fn with_ignore_recent(mut self, ignore: bool) -> Self {
        self.ignore_recent = ignore;
        self
    }

    /// Sets whether line breaks are kept between body lines.
    #[must_use]
    pub fn with_multi_lines(mut self, multi_lines: bool) -> Self {
        self.multi_lines = multi_lines;
        self
    }
}

/// Accepts `true`/`false` in any case, surrounding whitespace allowed.
fn parse_bool(key: &str, value: &str) -> Result<bool> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(QqTableError::invalid_bool(key, value))
    }
}
