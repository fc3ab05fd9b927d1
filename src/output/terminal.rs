//! Terminal output.
//!
//! Provides formatting helpers and table style sinks for stdout.

use super::RecordSink;
use crate::models::{wildcard, SubnetRecord};
use crate::NetworkInfo;
use std::error::Error;
use std::io::Write;
use std::net::Ipv4Addr;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// How [`TableSink`] lays out its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    /// Quoted, right-aligned columns.
    Quoted,
    /// Plain comma separated values.
    Csv,
}

const COLUMNS: [(&str, usize); 7] = [
    ("idx", 6),
    ("cidr", 20),
    ("netmask", 17),
    ("broadcast", 17),
    ("first", 17),
    ("last", 17),
    ("hosts", 12),
];

/// One header line then one row per record.
pub struct TableSink<W: Write> {
    out: W,
    style: TableStyle,
    header_written: bool,
}

impl<W: Write> TableSink<W> {
    pub fn new(out: W, style: TableStyle) -> Self {
        TableSink {
            out,
            style,
            header_written: false,
        }
    }

    fn write_row(&mut self, fields: &[String]) -> Result<(), Box<dyn Error>> {
        let line = match self.style {
            TableStyle::Quoted => fields
                .iter()
                .zip(COLUMNS.iter())
                .map(|(f, (_, width))| format_field(f, *width))
                .collect::<Vec<String>>()
                .join(","),
            TableStyle::Csv => fields.join(","),
        };
        writeln!(self.out, "{line}")?;
        Ok(())
    }
}

impl<W: Write> RecordSink for TableSink<W> {
    fn emit(&mut self, record: &SubnetRecord) -> Result<(), Box<dyn Error>> {
        if !self.header_written {
            let header: Vec<String> = COLUMNS.iter().map(|(name, _)| name.to_string()).collect();
            self.write_row(&header)?;
            self.header_written = true;
        }
        let row = vec![
            record.index.to_string(),
            record.cidr().to_string(),
            record.mask.to_string(),
            record.broadcast.to_string(),
            record.first_usable.to_string(),
            record.last_usable.to_string(),
            record.usable_hosts().to_string(),
        ];
        self.write_row(&row)
    }

    fn finish(&mut self) -> Result<(), Box<dyn Error>> {
        self.out.flush()?;
        Ok(())
    }
}

/// `network/prefix` per line.
pub struct CidrSink<W: Write> {
    out: W,
}

impl<W: Write> CidrSink<W> {
    pub fn new(out: W) -> Self {
        CidrSink { out }
    }
}

impl<W: Write> RecordSink for CidrSink<W> {
    fn emit(&mut self, record: &SubnetRecord) -> Result<(), Box<dyn Error>> {
        writeln!(self.out, "{}", record.cidr())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Box<dyn Error>> {
        self.out.flush()?;
        Ok(())
    }
}

/// Print a single network calculation as `name = value` lines.
pub fn write_network_info<W: Write>(out: &mut W, info: &NetworkInfo) -> std::io::Result<()> {
    let n = &info.network;
    writeln!(out, "{:<9} = {}", "ip", info.ip)?;
    writeln!(out, "{:<9} = {}", "netmask", n.mask)?;
    writeln!(out, "{:<9} = {}", "wildcard", Ipv4Addr::from(wildcard(u32::from(n.mask))))?;
    writeln!(out, "{:<9} = {}", "prefix", n.prefix)?;
    writeln!(out, "{:<9} = {}", "net_ip", n.network)?;
    writeln!(out, "{}", "#".repeat(50))?;
    writeln!(out, "{:<9} = {}", "bcast_ip", n.broadcast)?;
    writeln!(out, "{:<9} = {}", "first_ip", n.first_usable)?;
    writeln!(out, "{:<9} = {}", "last_ip", n.last_usable)?;
    writeln!(out, "{:<9} = {}", "hosts", n.usable_hosts())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_field_address() {
        let mask = Ipv4Addr::new(255, 255, 255, 192);
        assert_eq!(format_field(mask, 17), "\"255.255.255.192\"");
        assert_eq!(format_field(Ipv4Addr::new(10, 0, 0, 1), 17), "       \"10.0.0.1\"");
        assert_eq!(format_field("172.16.8.0/26", 6), "\"172.16.8.0/26\"");
    }

    #[test]
    fn test_quoted_columns_line_up() {
        let (_, records) = crate::partition("172.16.8.0", "255.255.252.0", 2).unwrap();
        let mut buf = Vec::new();
        let mut sink = TableSink::new(&mut buf, TableStyle::Quoted);
        for r in &records {
            sink.emit(r).unwrap();
        }
        sink.finish().unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);

        let row_width: usize = COLUMNS.iter().map(|(_, w)| w).sum::<usize>() + COLUMNS.len() - 1;
        for line in &lines {
            assert_eq!(line.len(), row_width, "{line}");
            let fields: Vec<&str> = line.split(',').collect();
            for (field, (name, width)) in fields.iter().zip(COLUMNS.iter()) {
                assert_eq!(field.len(), *width, "column {name}");
                assert!(field.trim_start().starts_with('"'), "column {name}");
            }
        }
        let header: Vec<&str> = lines[0].split(',').map(str::trim_start).collect();
        assert_eq!(header[1], "\"cidr\"");
        let row: Vec<&str> = lines[2].split(',').map(str::trim_start).collect();
        assert_eq!(
            row,
            vec![
                "\"1\"",
                "\"172.16.10.0/23\"",
                "\"255.255.254.0\"",
                "\"172.16.11.255\"",
                "\"172.16.10.1\"",
                "\"172.16.11.254\"",
                "\"510\"",
            ]
        );
    }

    #[test]
    fn test_csv_sink() {
        let (_, records) = crate::partition("172.16.8.0", "255.255.252.0", 2).unwrap();
        let mut buf = Vec::new();
        let mut sink = TableSink::new(&mut buf, TableStyle::Csv);
        for r in &records {
            sink.emit(r).unwrap();
        }
        sink.finish().unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "idx,cidr,netmask,broadcast,first,last,hosts");
        assert_eq!(
            lines[1],
            "0,172.16.8.0/23,255.255.254.0,172.16.9.255,172.16.8.1,172.16.9.254,510"
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_quoted_sink() {
        let (_, records) = crate::partition("10.0.0.0", "/30", 1).unwrap();
        let mut buf = Vec::new();
        let mut sink = TableSink::new(&mut buf, TableStyle::Quoted);
        sink.emit(&records[0]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.starts_with("   \"0\","));
        assert!(row.contains("\"10.0.0.0/30\""));
        assert!(row.ends_with("\"2\""));
    }

    #[test]
    fn test_cidr_sink() {
        let (_, records) = crate::partition("192.168.0.0", "/24", 3).unwrap();
        let mut buf = Vec::new();
        let mut sink = CidrSink::new(&mut buf);
        for r in &records {
            sink.emit(r).unwrap();
        }
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "192.168.0.0/26\n192.168.0.64/26\n192.168.0.128/26\n"
        );
    }

    #[test]
    fn test_write_network_info() {
        let info = crate::calculate("192.168.1.10", "/24").unwrap();
        let mut buf = Vec::new();
        write_network_info(&mut buf, &info).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("ip        = 192.168.1.10\n"));
        assert!(text.contains("wildcard  = 0.0.0.255\n"));
        assert!(text.contains("bcast_ip  = 192.168.1.255\n"));
        assert!(text.contains("last_ip   = 192.168.1.254\n"));
    }
}
