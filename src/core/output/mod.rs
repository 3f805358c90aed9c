//! Table writers.
//!
//! This module provides:
//! - [`write_csv`] - writes one conversation's messages to a CSV file
//! - [`to_csv`] - renders the same table as a `String`
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use qqtable::Message;
//! use qqtable::core::output::to_csv;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap().and_hms_opt(9, 30, 0).unwrap();
//! let messages = vec![Message::new(ts, "Alice", "hello")];
//!
//! let csv = to_csv(&messages)?;
//! assert!(csv.starts_with("时间,发送者,内容"));
//! assert!(csv.contains("2023-01-05 09:30:00,Alice,hello"));
//! # Ok::<(), qqtable::QqTableError>(())
//! ```

mod csv_writer;

pub use csv_writer::{TABLE_HEADER, TIMESTAMP_FORMAT, to_csv, write_csv};
