//! CSV output writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::Message;
use crate::error::Result;

/// Column headers: time, sender, content.
pub const TABLE_HEADER: [&str; 3] = ["时间", "发送者", "内容"];

/// Format of the time column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// UTF-8 byte order mark, written so spreadsheet tools detect the encoding.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes messages to a CSV file.
///
/// # Format
/// - Delimiter: `,`
/// - Columns: `时间`, `发送者`, `内容`
/// - Encoding: UTF-8 with BOM
///
/// Returns the number of rows written, header excluded.
pub fn write_csv<'a, I>(messages: I, output_path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut file = BufWriter::new(File::create(output_path)?);
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(file);
    let rows = write_records(&mut writer, messages)?;
    writer.flush()?;
    Ok(rows)
}

/// Renders messages as a CSV string (no BOM).
pub fn to_csv<'a, I>(messages: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_records(&mut writer, messages)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

fn write_records<'a, W, I>(writer: &mut csv::Writer<W>, messages: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Message>,
{
    writer.write_record(TABLE_HEADER)?;

    let mut rows = 0;
    for msg in messages {
        let timestamp = msg.timestamp.format(TIMESTAMP_FORMAT).to_string();
        writer.write_record([timestamp.as_str(), msg.sender(), msg.content()])?;
        rows += 1;
    }
    Ok(rows)
}
