//! Table emitting for qqtable.
//!
//! This module contains:
//! - [`filter`] - Conversation and message filtering
//! - [`naming`] - File name templates and sanitization
//! - [`output`] - CSV writer
//! - [`emitter`] - Output directory handling, one table per conversation
//!
//! # Quick Start
//!
//! ```rust
//! use qqtable::core::{
//!     EmitSummary, FilterConfig, TableEmitter,
//!     apply_filters, render_file_name, sanitize_file_name,
//!     to_csv, write_csv,
//! };
//! ```

pub mod emitter;
pub mod filter;
pub mod naming;
pub mod output;

// Re-export main types for convenience
pub use emitter::{EmitSummary, TableEmitter};
pub use filter::{FilterConfig, apply_filters};
pub use naming::{render_file_name, sanitize_file_name};
pub use output::{to_csv, write_csv};
