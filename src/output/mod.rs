//! Output of subnet records.
//!
//! The engine hands out [`SubnetRecord`] values; everything here turns them
//! into text. Each format implements [`RecordSink`]:
//! - [`terminal`] - Quoted table, CSV and CIDR lines
//! - [`json`] - JSON lines
//! - [`dhcpd`] - ISC dhcpd `subnet` and `pool` declarations, one file per subnet

mod dhcpd;
mod json;
mod terminal;

use crate::models::SubnetRecord;
use std::borrow::Borrow;
use std::error::Error;

pub use dhcpd::{render_subnet, write_subnet, DhcpdDirSink};
pub use json::JsonSink;
pub use terminal::{format_field, write_network_info, CidrSink, TableSink, TableStyle};

/// Destination for enumerated subnet records.
pub trait RecordSink {
    /// Emit one record.
    fn emit(&mut self, record: &SubnetRecord) -> Result<(), Box<dyn Error>>;

    /// Flush anything buffered once all records are emitted.
    fn finish(&mut self) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}

/// Drive `sink` over `records` and finish it. Returns the number emitted.
///
/// Accepts owned records too, so `SubnetPlan::records()` streams straight
/// into the sink without being collected.
pub fn emit_all<I>(records: I, sink: &mut dyn RecordSink) -> Result<usize, Box<dyn Error>>
where
    I: IntoIterator,
    I::Item: Borrow<SubnetRecord>,
{
    let mut count = 0;
    for record in records {
        let record = record.borrow();
        log::debug!("subnet {record}");
        sink.emit(record)?;
        count += 1;
    }
    sink.finish()?;
    log::debug!("emitted {count} record(s)");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Collect {
        seen: Vec<u64>,
        finished: bool,
    }

    impl RecordSink for Collect {
        fn emit(&mut self, record: &SubnetRecord) -> Result<(), Box<dyn Error>> {
            self.seen.push(record.index);
            Ok(())
        }

        fn finish(&mut self) -> Result<(), Box<dyn Error>> {
            self.finished = true;
            Ok(())
        }
    }

    #[test]
    fn test_emit_all() {
        let (_, records) = crate::partition("10.0.0.0", "/24", 3).unwrap();
        let mut sink = Collect::default();
        assert_eq!(emit_all(&records, &mut sink).unwrap(), 3);
        assert_eq!(sink.seen, vec![0, 1, 2]);
        assert!(sink.finished);
    }

    #[test]
    fn test_emit_all_streams_plan() {
        // 2^20 subnets of a /8, never held in memory at once
        let plan = crate::plan("10.0.0.0", "/8", 1 << 20).unwrap();
        let mut sink = Collect::default();
        assert_eq!(emit_all(plan.records(), &mut sink).unwrap(), 1 << 20);
        assert_eq!(sink.seen.len(), 1 << 20);
        assert_eq!(sink.seen[(1 << 20) - 1], (1 << 20) - 1);
        assert!(sink.finished);
    }
}
