//! ISC dhcpd configuration output.
//!
//! Each subnet becomes a `subnet` declaration with the first usable address as
//! router, followed by one single-address `pool` per client address.

use super::RecordSink;
use crate::config::EmitConfig;
use crate::models::SubnetRecord;
use chrono::{DateTime, Utc};
use itertools::Itertools;
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::net::Ipv4Addr;
use std::path::PathBuf;

/// Write the dhcpd declarations for one subnet.
///
/// Client pools run from `network + 2` to `broadcast - 1`; `network + 1` is
/// the router. /31 and /32 subnets get no pools.
pub fn write_subnet<W: Write>(
    out: &mut W,
    record: &SubnetRecord,
    config: &EmitConfig,
    generated: Option<DateTime<Utc>>,
) -> std::io::Result<()> {
    if let Some(ts) = generated {
        writeln!(
            out,
            "# {} generated {}",
            record.cidr(),
            ts.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
    }
    writeln!(out, "subnet {} netmask {} {{", record.network, record.mask)?;
    writeln!(out, "        authoritative;")?;
    writeln!(
        out,
        "        option domain-name-servers {};",
        config.dns_servers.iter().join(", ")
    )?;
    writeln!(out, "        option routers {};", record.first_usable)?;
    writeln!(out, "        option subnet-mask {};", record.mask)?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    if record.is_degenerate() {
        return Ok(());
    }
    let first_client = u32::from(record.network) + 2;
    let last_client = u32::from(record.broadcast) - 1;
    let (class, group, subnet) = (&config.pool_class, &config.pool_group, record.index);
    for (i, ip) in (first_client..=last_client).enumerate() {
        let ip = Ipv4Addr::from(ip);
        write!(out, r#"pool {{ allow members of "{class}" "{group}{subnet}-{i}"; "#)?;
        writeln!(out, "deny dynamic bootp clients; range {ip}; }}")?;
    }
    Ok(())
}

/// [`write_subnet`] into a `String`.
pub fn render_subnet(
    record: &SubnetRecord,
    config: &EmitConfig,
    generated: Option<DateTime<Utc>>,
) -> std::io::Result<String> {
    let mut buf = Vec::new();
    write_subnet(&mut buf, record, config, generated)?;
    String::from_utf8(buf).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

/// Writes `<file_prefix>_<index>.net` per record into the configured directory.
pub struct DhcpdDirSink {
    config: EmitConfig,
    generated: Option<DateTime<Utc>>,
    written: Vec<PathBuf>,
}

impl DhcpdDirSink {
    pub fn new(config: EmitConfig) -> Self {
        let generated = config.timestamp.then(Utc::now);
        DhcpdDirSink {
            config,
            generated,
            written: Vec::new(),
        }
    }

    /// Paths written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn path_for(&self, record: &SubnetRecord) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}_{}.net", self.config.file_prefix, record.index))
    }
}

impl RecordSink for DhcpdDirSink {
    fn emit(&mut self, record: &SubnetRecord) -> Result<(), Box<dyn Error>> {
        if self.written.is_empty() {
            std::fs::create_dir_all(&self.config.output_dir).map_err(|e| {
                format!(
                    "Error creating output dir {}: {e}",
                    self.config.output_dir.display()
                )
            })?;
        }
        let path = self.path_for(record);
        let file = File::create(&path)
            .map_err(|e| format!("Error creating {}: {e}", path.display()))?;
        let mut out = BufWriter::new(file);
        write_subnet(&mut out, record, &self.config, self.generated)
            .and_then(|_| out.flush())
            .map_err(|e| format!("Error writing {}: {e}", path.display()))?;
        log::info!("Wrote {} to {}", record.cidr(), path.display());
        self.written.push(path);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Box<dyn Error>> {
        log::info!(
            "Wrote {} dhcpd file(s) to {}",
            self.written.len(),
            self.config.output_dir.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config() -> EmitConfig {
        EmitConfig {
            timestamp: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_render_subnet_30() {
        let (_, records) = crate::partition("10.0.0.0", "/30", 1).unwrap();
        let text = render_subnet(&records[0], &config(), None).unwrap();
        let expected = r#"subnet 10.0.0.0 netmask 255.255.255.252 {
        authoritative;
        option domain-name-servers 8.8.4.4, 8.8.8.8;
        option routers 10.0.0.1;
        option subnet-mask 255.255.255.252;
}

pool { allow members of "users" "cl-floor0-0"; deny dynamic bootp clients; range 10.0.0.2; }
"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_subnet_pools() {
        let (_, records) = crate::partition("172.16.8.0", "255.255.252.0", 10).unwrap();
        let text = render_subnet(&records[3], &config(), None).unwrap();
        assert!(text.starts_with("subnet 172.16.8.192 netmask 255.255.255.192 {\n"));
        assert!(text.contains("option routers 172.16.8.193;"));
        let pools: Vec<&str> = text.lines().filter(|l| l.starts_with("pool")).collect();
        // .194 up to .254
        assert_eq!(pools.len(), 61);
        assert!(pools[0].contains(r#""cl-floor3-0""#));
        assert!(pools[0].ends_with("range 172.16.8.194; }"));
        assert!(pools[60].contains(r#""cl-floor3-60""#));
        assert!(pools[60].ends_with("range 172.16.8.254; }"));
    }

    #[test]
    fn test_write_subnet_reports_io_errors() {
        struct Full;
        impl Write for Full {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        let (_, records) = crate::partition("10.0.0.0", "/30", 1).unwrap();
        let err = write_subnet(&mut Full, &records[0], &config(), None).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::Other);
        assert!(render_subnet(&records[0], &config(), None).is_ok());
    }

    #[test]
    fn test_render_subnet_degenerate() {
        let (_, records) = crate::partition("10.0.0.0", "/31", 1).unwrap();
        let text = render_subnet(&records[0], &config(), None).unwrap();
        assert!(text.contains("option routers 10.0.0.1;"));
        assert!(!text.contains("pool"));
    }

    #[test]
    fn test_render_subnet_timestamp() {
        let (_, records) = crate::partition("10.0.0.0", "/30", 1).unwrap();
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let text = render_subnet(&records[0], &config(), Some(ts)).unwrap();
        assert!(text.starts_with("# 10.0.0.0/30 generated 2024-05-01 12:30:00 UTC\n"));
    }

    #[test]
    fn test_dir_sink_writes_files() {
        let dir = std::env::temp_dir().join(format!("subnet_dhcpd_{}", std::process::id()));
        let mut sink = DhcpdDirSink::new(EmitConfig {
            output_dir: dir.clone(),
            file_prefix: "floor".to_string(),
            ..config()
        });
        let (_, records) = crate::partition("192.168.0.0", "/24", 2).unwrap();
        for r in &records {
            sink.emit(r).unwrap();
        }
        sink.finish().unwrap();

        assert_eq!(sink.written().len(), 2);
        assert_eq!(sink.written()[1], dir.join("floor_1.net"));
        let text = std::fs::read_to_string(dir.join("floor_1.net")).unwrap();
        assert_eq!(text, render_subnet(&records[1], &config(), None).unwrap());
        std::fs::remove_dir_all(&dir).ok();
    }
}
