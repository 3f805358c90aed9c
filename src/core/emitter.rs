//! Writes one table file per conversation.
//!
//! The [`TableEmitter`] owns the output directory: it is deleted and
//! recreated on every run, then filled with one CSV per retained
//! conversation.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use crate::Conversation;
use crate::config::Config;
use crate::core::filter::FilterConfig;
use crate::core::naming::render_file_name;
use crate::core::output::write_csv;
use crate::error::{QqTableError, Result};

/// Statistics about one emit run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitSummary {
    /// Table files written (an overwritten file counts once per write).
    pub files_written: usize,
    /// Conversations skipped as "recent contacts".
    pub skipped_recent: usize,
    /// Message rows written.
    pub messages_written: usize,
    /// Messages dropped for empty content.
    pub skipped_empty: usize,
}

/// Serializes parsed conversations into the configured output directory.
///
/// # Example
///
/// ```rust,no_run
/// use qqtable::config::Config;
/// use qqtable::core::TableEmitter;
/// use qqtable::parser::RecordParser;
///
/// let config = Config::load("config.txt")?;
/// let conversations = RecordParser::with_config(&config).parse(&config.input)?;
/// let summary = TableEmitter::new(&config).emit(&conversations)?;
/// println!("{} files", summary.files_written);
/// # Ok::<(), qqtable::QqTableError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TableEmitter<'a> {
    config: &'a Config,
    filter: FilterConfig,
}

impl<'a> TableEmitter<'a> {
    /// Creates an emitter for `config`.
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            filter: FilterConfig::from(config),
        }
    }

    /// Returns the path the table of `conversation` is written to.
    pub fn file_path(&self, conversation: &Conversation) -> PathBuf {
        self.config
            .output_dir
            .join(render_file_name(&self.config.output_file_name, conversation))
    }

    /// Deletes the output directory if it exists and creates it empty.
    pub fn prepare_output_dir(&self) -> Result<()> {
        let dir = &self.config.output_dir;
        if dir.exists() {
            tracing::info!(dir = %dir.display(), "removing output directory");
            fs::remove_dir_all(dir).map_err(|e| QqTableError::output_dir(dir, e))?;
        }
        fs::create_dir_all(dir).map_err(|e| QqTableError::output_dir(dir, e))
    }

    /// Prepares the output directory and writes every retained conversation.
    pub fn emit(&self, conversations: &[Conversation]) -> Result<EmitSummary> {
        self.prepare_output_dir()?;

        let mut summary = EmitSummary::default();
        let mut written = HashSet::new();

        for conversation in conversations {
            if !self.filter.keeps_conversation(conversation) {
                summary.skipped_recent += 1;
                continue;
            }

            let path = self.file_path(conversation);
            if !written.insert(path.clone()) {
                tracing::warn!(path = %path.display(), "file name collision, overwriting");
            }

            let (kept, dropped): (Vec<_>, Vec<_>) = conversation
                .messages
                .iter()
                .partition(|m| self.filter.keeps_message(m));

            tracing::info!(
                group = %conversation.group,
                name = %conversation.name,
                path = %path.display(),
                "writing table"
            );
            summary.messages_written += write_csv(kept, &path)?;
            summary.skipped_empty += dropped.len();
            summary.files_written += 1;
        }

        Ok(summary)
    }
}
