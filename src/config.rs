//! Emitter configuration from the environment.
//!
//! Values come from process environment variables, optionally seeded from a
//! `.env` file. Command line flags override them through [`EmitConfig::apply_args`].

use crate::cli::DhcpdArgs;
use itertools::Itertools;
use std::error::Error;
use std::net::Ipv4Addr;
use std::path::PathBuf;

pub const ENV_DNS_SERVERS: &str = "SUBNET_DNS_SERVERS";
pub const ENV_POOL_CLASS: &str = "SUBNET_POOL_CLASS";
pub const ENV_POOL_GROUP: &str = "SUBNET_POOL_GROUP";
pub const ENV_OUTPUT_DIR: &str = "SUBNET_OUTPUT_DIR";
pub const ENV_FILE_PREFIX: &str = "SUBNET_FILE_PREFIX";

/// Settings for rendering dhcpd configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitConfig {
    /// `option domain-name-servers` list.
    pub dns_servers: Vec<Ipv4Addr>,
    /// dhcpd class allowed into each pool, e.g. `users`.
    pub pool_class: String,
    /// Pool group name prefix; subnet index and host index are appended.
    pub pool_group: String,
    /// Directory the per-subnet files are written to.
    pub output_dir: PathBuf,
    /// File name prefix; files are `<prefix>_<index>.net`.
    pub file_prefix: String,
    /// Write a generated-at comment at the top of each file.
    pub timestamp: bool,
}

impl Default for EmitConfig {
    fn default() -> Self {
        EmitConfig {
            dns_servers: vec![Ipv4Addr::new(8, 8, 4, 4), Ipv4Addr::new(8, 8, 8, 8)],
            pool_class: "users".to_string(),
            pool_group: "cl-floor".to_string(),
            output_dir: PathBuf::from("."),
            file_prefix: "subnet".to_string(),
            timestamp: true,
        }
    }
}

impl EmitConfig {
    /// Load `.env` if present, then read the environment.
    pub fn from_env() -> Result<EmitConfig, Box<dyn Error>> {
        dotenv::dotenv().ok();
        EmitConfig::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<EmitConfig, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = EmitConfig::default();

        if let Some(dns) = lookup(ENV_DNS_SERVERS) {
            config.dns_servers = parse_dns_servers(&dns)
                .map_err(|e| format!("Invalid {ENV_DNS_SERVERS}='{dns}': {e}"))?;
        }
        if let Some(class) = lookup(ENV_POOL_CLASS) {
            config.pool_class = class;
        }
        if let Some(group) = lookup(ENV_POOL_GROUP) {
            config.pool_group = group;
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(prefix) = lookup(ENV_FILE_PREFIX) {
            config.file_prefix = prefix;
        }

        log::debug!(
            "EmitConfig dns=[{}] class={} group={} dir={} prefix={}",
            config.dns_servers.iter().join(", "),
            config.pool_class,
            config.pool_group,
            config.output_dir.display(),
            config.file_prefix
        );
        Ok(config)
    }

    /// Apply command line overrides. Unset flags keep the environment value.
    pub fn apply_args(&mut self, args: &DhcpdArgs) -> Result<(), Box<dyn Error>> {
        if let Some(dir) = &args.dhcpd_dir {
            self.output_dir = dir.clone();
        }
        if let Some(dns) = &args.dns {
            self.dns_servers =
                parse_dns_servers(dns).map_err(|e| format!("Invalid --dns '{dns}': {e}"))?;
        }
        if let Some(class) = &args.class {
            self.pool_class = class.clone();
        }
        if let Some(group) = &args.group {
            self.pool_group = group.clone();
        }
        if let Some(prefix) = &args.file_prefix {
            self.file_prefix = prefix.clone();
        }
        if args.no_timestamp {
            self.timestamp = false;
        }
        Ok(())
    }
}

/// Parse a comma separated list of IPv4 addresses. Empty entries are skipped.
pub fn parse_dns_servers(list: &str) -> Result<Vec<Ipv4Addr>, Box<dyn Error>> {
    let mut servers = Vec::new();
    for entry in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let addr = crate::models::parse_addr(entry)?;
        servers.push(Ipv4Addr::from(addr));
    }
    if servers.is_empty() {
        return Err("no DNS server given".into());
    }
    Ok(servers)
}
