//! Command line arguments.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "subnet-partition",
    version,
    about = "IPv4 network calculator and equal-size subnet partitioner"
)]
pub struct Args {
    /// log4rs YAML configuration
    #[arg(long, default_value = "log4rs.yml", global = true)]
    pub log_config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show network, broadcast and host range for an address and mask
    Calc {
        /// IPv4 address in dotted-decimal form, e.g. 192.168.1.10
        address: String,
        /// Network mask, either /N or dotted-decimal
        mask: String,
    },
    /// Split the network of an address and mask into COUNT equal subnets
    Split {
        /// IPv4 address in dotted-decimal form, e.g. 172.16.8.0
        address: String,
        /// Network mask, either /N or dotted-decimal
        mask: String,
        /// Number of subnets to create
        #[arg(allow_negative_numbers = true)]
        count: i64,
        /// Output format on stdout
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
        #[command(flatten)]
        dhcpd: DhcpdArgs,
    },
}

/// dhcpd file output. Settings given here override the environment.
#[derive(clap::Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct DhcpdArgs {
    /// Also write one dhcpd config file per subnet into SUBNET_OUTPUT_DIR
    #[arg(long)]
    pub dhcpd: bool,
    /// Write the dhcpd files into this directory instead (implies --dhcpd)
    #[arg(long)]
    pub dhcpd_dir: Option<PathBuf>,
    /// Comma separated DNS servers for the dhcpd files
    #[arg(long)]
    pub dns: Option<String>,
    /// dhcpd class allowed into each pool
    #[arg(long)]
    pub class: Option<String>,
    /// Pool group name prefix
    #[arg(long)]
    pub group: Option<String>,
    /// dhcpd file name prefix
    #[arg(long)]
    pub file_prefix: Option<String>,
    /// Leave out the generated-at comment in dhcpd files
    #[arg(long)]
    pub no_timestamp: bool,
}

impl DhcpdArgs {
    /// True when dhcpd files should be written.
    pub fn enabled(&self) -> bool {
        self.dhcpd || self.dhcpd_dir.is_some()
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Quoted, aligned columns
    Table,
    /// Plain CSV
    Csv,
    /// JSON lines
    Json,
    /// network/prefix per line
    Cidr,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_split() {
        let args = Args::try_parse_from([
            "subnet-partition",
            "split",
            "172.16.8.0",
            "255.255.252.0",
            "10",
            "--format",
            "cidr",
            "--dhcpd-dir",
            "out",
        ])
        .unwrap();
        match args.command {
            Command::Split {
                address,
                mask,
                count,
                format,
                dhcpd,
            } => {
                assert_eq!(address, "172.16.8.0");
                assert_eq!(mask, "255.255.252.0");
                assert_eq!(count, 10);
                assert_eq!(format, Format::Cidr);
                assert_eq!(dhcpd.dhcpd_dir, Some(PathBuf::from("out")));
                assert!(dhcpd.enabled());
            }
            _ => panic!("expected split"),
        }
    }

    #[test]
    fn test_parse_dhcpd_switch() {
        let args = Args::try_parse_from([
            "subnet-partition",
            "split",
            "10.0.0.0",
            "/24",
            "4",
            "--dhcpd",
        ])
        .unwrap();
        match args.command {
            Command::Split { dhcpd, .. } => {
                assert!(dhcpd.enabled());
                assert_eq!(dhcpd.dhcpd_dir, None);
            }
            _ => panic!("expected split"),
        }

        let args =
            Args::try_parse_from(["subnet-partition", "split", "10.0.0.0", "/24", "4"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Split { ref dhcpd, .. } if !dhcpd.enabled()
        ));
    }

    #[test]
    fn test_parse_negative_count() {
        let args =
            Args::try_parse_from(["subnet-partition", "split", "10.0.0.0", "/24", "-3"]).unwrap();
        assert!(matches!(args.command, Command::Split { count: -3, .. }));
    }

    #[test]
    fn test_parse_calc_prefix_mask() {
        let args = Args::try_parse_from(["subnet-partition", "calc", "10.0.0.1", "/30"]).unwrap();
        assert_eq!(args.log_config, PathBuf::from("log4rs.yml"));
        assert!(matches!(args.command, Command::Calc { .. }));
    }
}
