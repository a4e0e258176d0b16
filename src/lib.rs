//! # Shredder - flatten structured documents into attributes
//!
//! Turns a JSON object, or an XML document normalized to the same shape,
//! into a flat mapping from path-derived names to string values.
//!
//! ## Modules
//!
//! - **shred**: Walk a document tree and emit one attribute per scalar leaf
//! - **format**: Parse JSON or XML bytes into a document tree
//! - **record**: Parse, shred and route records like a pipeline step
//!
//! ## Quick Start
//!
//! ```rust
//! use shredder::shred::Shredder;
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let data = json!({
//!     "id": 1,
//!     "user": {"name": "Alice"},
//!     "posts": [
//!         {"id": 10, "title": "First Post"},
//!         {"id": 11, "title": "Second Post"}
//!     ]
//! });
//!
//! let attributes = Shredder::default().shred(&data)?;
//!
//! assert_eq!(attributes["user_name"], "Alice");
//! assert_eq!(attributes["posts_1_title"], "Second Post");
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::io::BufRead;

pub mod format;
pub mod record;
pub mod shred;

// Re-export commonly used types for convenience
pub use format::{parse_document, DocumentFormat, ParseError};
pub use record::{Outcome, ProcessError, Record, Route, ShredProcessor, ShredderConfig};
pub use shred::{Attributes, AttributeWriter, ShredConfig, ShredError, Shredder};

/// Shred a stream of newline-delimited JSON documents.
///
/// Every non-empty line is processed as one record; successful results are
/// written to `writer`. Lines are handed over as raw bytes, so a line that is
/// not valid UTF-8 fails on its own like any other unparsable record.
/// Returns the number of records routed to failure.
pub fn shred_ndjson<R: BufRead, W: std::io::Write>(
    reader: R,
    writer: &mut AttributeWriter<W>,
    config: ShredConfig,
) -> Result<usize> {
    let processor = ShredProcessor::new(ShredderConfig {
        format: DocumentFormat::Json,
        shred: config,
    });
    let mut failures = 0;

    for line in reader.split(b'\n') {
        let mut line = line.context("Failed to read line")?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        match processor.process(Record::new(line)) {
            Outcome::Success(record) => writer.write_attributes(&record.attributes)?,
            Outcome::Failure { .. } => failures += 1,
        }
    }

    writer.flush()?;
    Ok(failures)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndjson_stream() {
        let input = b"{\"a\": {\"b\": 1}}\r\n\n[1, 2]\n{\"s\": \"\xff\"}\n{\"c\": [true]}\n{broken\n{\"d\": 3}";
        let mut buffer = Vec::new();
        let mut writer = AttributeWriter::new(&mut buffer);

        let failures = shred_ndjson(&input[..], &mut writer, ShredConfig::default()).unwrap();

        assert_eq!(failures, 3);
        assert_eq!(writer.written(), 3);
        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "{\"a_b\":\"1\"}\n{\"c_0\":\"true\"}\n{\"d\":\"3\"}\n"
        );
    }
}
