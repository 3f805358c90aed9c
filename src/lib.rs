//! # qqtable
//!
//! A Rust library for splitting a QQ chat history text export
//! (`全部消息记录.txt`) into one CSV table per conversation.
//!
//! ## Overview
//!
//! The export is one long text file. Conversations are delimited by a
//! 64-character `=` separator cycle carrying a group label (`消息分组:`) and a
//! subject label (`消息对象:`); inside a conversation every message starts with
//! a `YYYY-MM-DD H:MM:SS Sender` header line followed by its body lines.
//!
//! - [`parser::RecordParser`] turns the lines into [`Conversation`]s
//! - [`core::TableEmitter`] writes each conversation to its own CSV file
//! - [`config::Config`] carries the settings shared by both
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use qqtable::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = Config::load(CONFIG_FILE_NAME)?;
//!
//!     let conversations = RecordParser::with_config(&config).parse(&config.input)?;
//!     let summary = TableEmitter::new(&config).emit(&conversations)?;
//!
//!     println!("{} tables written", summary.files_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`]: Record parser, [`Phase`](parser::Phase), diagnostics
//! - [`message`]: [`Message`] and its builder
//! - [`conversation`]: [`Conversation`]
//! - [`config`]: [`Config`](config::Config) and the `key=value` file format
//! - [`core`]: Filtering, file naming, CSV output, the emitter
//! - [`cli`]: CLI arguments (feature `cli`)
//! - [`error`]: Unified error types ([`QqTableError`], [`Result`])
//! - [`prelude`]: Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod conversation;
pub mod core;
pub mod error;
pub mod message;
pub mod parser;

// Re-export the main types at the crate root for convenience
pub use conversation::Conversation;
pub use error::{QqTableError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use qqtable::prelude::*;
/// ```
pub mod prelude {
    // Data model
    pub use crate::{Conversation, Message};

    // Error types
    pub use crate::error::{QqTableError, Result};

    // Configuration
    pub use crate::config::{CONFIG_FILE_NAME, Config};

    // Parsing
    pub use crate::parser::{Diagnostic, DiagnosticSink, LogSink, RecordParser};

    // Output
    pub use crate::core::{EmitSummary, FilterConfig, TableEmitter, apply_filters, to_csv};
}
