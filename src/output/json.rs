//! JSON lines output.

use super::RecordSink;
use crate::models::SubnetRecord;
use std::error::Error;
use std::io::Write;

/// One JSON object per record per line.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        JsonSink { out }
    }
}

impl<W: Write> RecordSink for JsonSink<W> {
    fn emit(&mut self, record: &SubnetRecord) -> Result<(), Box<dyn Error>> {
        serde_json::to_writer(&mut self.out, record)
            .map_err(|e| format!("Error serializing subnet {}: {e}", record.index))?;
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Box<dyn Error>> {
        self.out.flush()?;
        Ok(())
    }
}
