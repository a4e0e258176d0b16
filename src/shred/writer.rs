use crate::shred::types::Attributes;
use anyhow::{Context, Result};
use std::io::Write;

/// Writes attribute mappings as JSON Lines, one object per record
pub struct AttributeWriter<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> AttributeWriter<W> {
    pub fn new(writer: W) -> Self {
        AttributeWriter { writer, written: 0 }
    }

    pub fn write_attributes(&mut self, attributes: &Attributes) -> Result<()> {
        let json = serde_json::to_string(attributes)
            .context("Failed to serialize attributes")?;
        writeln!(self.writer, "{}", json)
            .context("Failed to write attributes")?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush writer")
    }
}
