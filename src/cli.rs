//! Command-line interface definition using clap.
//!
//! Every option is also available in the `key=value` config file; values
//! given on the command line win.
//!
//! ```rust
//! use clap::Parser;
//! use qqtable::cli::Args;
//! use qqtable::config::Config;
//!
//! let args = Args::parse_from(["qqtable", "chat.txt", "--single-line"]);
//! let config = args.apply(Config::default());
//! assert_eq!(config.input.to_str(), Some("chat.txt"));
//! assert!(!config.multi_lines);
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::config::{CONFIG_FILE_NAME, Config};

/// Split a QQ chat history text export into one CSV table per conversation.
#[derive(Parser, Debug, Clone)]
#[command(name = "qqtable")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    qqtable
    qqtable 全部消息记录.txt -o tables
    qqtable export.txt --ignore-empty --keep-recent
    qqtable -c my_config.txt --no-open")]
pub struct Args {
    /// Path to the exported chat history (overrides `Input`)
    pub input: Option<PathBuf>,

    /// Path to the key=value config file
    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Output directory, wiped on every run (overrides `OutputDir`)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// File name template with {Group} and {Name} (overrides `OutputFileName`)
    #[arg(short = 'n', long, value_name = "TEMPLATE")]
    pub file_name: Option<String>,

    /// Drop messages with empty content
    #[arg(long)]
    pub ignore_empty: bool,

    /// Also write the "recent contacts" group
    #[arg(long)]
    pub keep_recent: bool,

    /// Concatenate body lines without line breaks
    #[arg(long)]
    pub single_line: bool,

    /// Do not open the output directory when done
    #[arg(long)]
    pub no_open: bool,

    /// Do not wait for Enter after a failure
    #[arg(long)]
    pub no_pause: bool,
}

impl Args {
    /// Layers the command-line overrides on top of `config`.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(ref input) = self.input {
            config.input.clone_from(input);
        }
        if let Some(ref dir) = self.output_dir {
            config.output_dir.clone_from(dir);
        }
        if let Some(ref template) = self.file_name {
            config.output_file_name.clone_from(template);
        }
        if self.ignore_empty {
            config.ignore_empty = true;
        }
        if self.keep_recent {
            config.ignore_recent = false;
        }
        if self.single_line {
            config.multi_lines = false;
        }
        config
    }
}
