//! Per-subnet addressing facts and the range calculation behind them.

use super::error::Result;
use super::ipv4::{mask_to_prefix, wildcard, Network, MAX_LENGTH};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// One enumerated subnet with everything an emitter needs to render it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubnetRecord {
    /// Ordinal of this subnet within the partition, starting at 0.
    pub index: u64,
    /// Network address (host bits clear).
    pub network: Ipv4Addr,
    /// Subnet mask.
    pub mask: Ipv4Addr,
    /// Prefix length matching `mask`.
    pub prefix: u8,
    /// Broadcast address (host bits set).
    pub broadcast: Ipv4Addr,
    /// `network + 1`; wraps for /32 at the top of the address space.
    pub first_usable: Ipv4Addr,
    /// `broadcast - 1`; wraps for /32 at the bottom of the address space.
    pub last_usable: Ipv4Addr,
}

impl SubnetRecord {
    /// Compute network, broadcast and usable range for subnet `base` under `mask`.
    ///
    /// /31 and /32 are not special cased: their usable bounds come out
    /// empty or inverted and [`SubnetRecord::is_degenerate`] reports it.
    pub fn new(index: u64, base: u32, mask: u32) -> Result<SubnetRecord> {
        let prefix = mask_to_prefix(mask)?;
        Ok(SubnetRecord::compute(index, base, mask, prefix))
    }

    /// Range calculation for a mask already known to match `prefix`.
    pub(crate) fn compute(index: u64, base: u32, mask: u32, prefix: u8) -> SubnetRecord {
        let network = base & mask;
        let broadcast = base | wildcard(mask);
        SubnetRecord {
            index,
            network: Ipv4Addr::from(network),
            mask: Ipv4Addr::from(mask),
            prefix,
            broadcast: Ipv4Addr::from(broadcast),
            first_usable: Ipv4Addr::from(network.wrapping_add(1)),
            last_usable: Ipv4Addr::from(broadcast.wrapping_sub(1)),
        }
    }

    /// The subnet in CIDR notation.
    pub fn cidr(&self) -> Network {
        Network::clamped(u32::from(self.network), self.prefix)
    }

    /// Number of host bits below the prefix.
    pub fn host_bits(&self) -> u8 {
        MAX_LENGTH - self.prefix
    }

    /// True for /31 and /32 where network+1..broadcast-1 holds no host.
    pub fn is_degenerate(&self) -> bool {
        self.host_bits() <= 1
    }

    /// Count of addresses between network and broadcast, exclusive.
    pub fn usable_hosts(&self) -> u64 {
        (1u64 << self.host_bits()).saturating_sub(2)
    }
}

impl std::fmt::Display for SubnetRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "#{} {} bcast {} hosts {}-{}",
            self.index,
            self.cidr(),
            self.broadcast,
            self.first_usable,
            self.last_usable
        )
    }
}
