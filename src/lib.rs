//! IPv4 network calculator and equal-size subnet partitioner.
//!
//! The engine is pure: text in, [`models::SubnetRecord`] values out. Parsing
//! command lines and writing configuration files live in [`cli`], [`config`]
//! and [`output`].

pub mod cli;
pub mod config;
pub mod models;
pub mod output;
pub mod processing;

use models::{mask_to_prefix, parse_addr, parse_mask, Network, SubnetRecord};
use processing::{plan_subnets, SubnetPlan};
use serde::Serialize;
use std::net::Ipv4Addr;

/// Single network calculation: the input address and its enclosing network.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkInfo {
    /// The address as given.
    pub ip: Ipv4Addr,
    /// Facts about the network `ip` belongs to.
    pub network: SubnetRecord,
}

/// Describe the network containing `address` under `mask`.
pub fn calculate(address: &str, mask: &str) -> models::Result<NetworkInfo> {
    let ip = parse_addr(address)?;
    let mask = parse_mask(mask)?;
    let network = SubnetRecord::new(0, ip, mask)?;
    log::debug!("calculate({address}) -> {network}");
    Ok(NetworkInfo {
        ip: Ipv4Addr::from(ip),
        network,
    })
}

/// Plan the split of the network containing `address` under `mask` into
/// `count` subnets. Records come lazily from [`SubnetPlan::records`].
pub fn plan(address: &str, mask: &str, count: i64) -> models::Result<SubnetPlan> {
    let ip = parse_addr(address)?;
    let mask = parse_mask(mask)?;
    let base = Network::from_parts(ip, mask_to_prefix(mask)?)?;
    let plan = plan_subnets(base, count)?;

    if plan.new_prefix >= 31 {
        log::warn!(
            "Subnets at /{} have no usable host range between network and broadcast",
            plan.new_prefix
        );
    }
    Ok(plan)
}

/// Split the network containing `address` under `mask` into `count` subnets.
///
/// Returns the plan and one record per requested subnet, lowest first.
///
/// # Examples
/// ```
/// let (plan, records) = subnet_partition::partition("172.16.8.0", "255.255.252.0", 10).unwrap();
/// assert_eq!(plan.new_prefix, 26);
/// assert_eq!(records.len(), 10);
/// assert_eq!(records[1].network.to_string(), "172.16.8.64");
/// ```
pub fn partition(
    address: &str,
    mask: &str,
    count: i64,
) -> models::Result<(SubnetPlan, Vec<SubnetRecord>)> {
    let plan = plan(address, mask, count)?;
    let records: Vec<SubnetRecord> = plan.records().collect();
    Ok((plan, records))
}
