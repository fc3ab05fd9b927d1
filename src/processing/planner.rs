//! Partition planning.
//!
//! Works out how many host bits must move into the network part so a base
//! network can be cut into at least the requested number of equal subnets.

use super::enumerator::SubnetIter;
use crate::models::{prefix_to_mask, Network, Result, SubnetError, SubnetRecord, MAX_LENGTH};
use serde::Serialize;

/// Outcome of planning a split of `base` into `requested` equal subnets.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubnetPlan {
    /// The network being split.
    pub base: Network,
    /// Prefix shared by every subnet.
    pub new_prefix: u8,
    /// Bits borrowed from the host part (`new_prefix - base.prefix`).
    pub extra_bits: u32,
    /// Number of subnets the caller asked for.
    pub requested: u64,
}

impl SubnetPlan {
    /// Subnets representable at `new_prefix`, a power of two >= `requested`.
    pub fn capacity(&self) -> u64 {
        1u64 << self.extra_bits
    }

    /// Subnets left over at `new_prefix` once `requested` are handed out.
    pub fn unused(&self) -> u64 {
        self.capacity() - self.requested
    }

    /// Mask shared by every subnet.
    pub fn subnet_mask(&self) -> u32 {
        // new_prefix <= 32 once planned
        prefix_to_mask(self.new_prefix).unwrap_or(u32::MAX)
    }

    /// Host bits left in each subnet.
    pub fn host_bits(&self) -> u32 {
        (MAX_LENGTH - self.new_prefix) as u32
    }

    /// Base addresses of the requested subnets, lowest first.
    pub fn subnets(&self) -> SubnetIter {
        SubnetIter::new(u32::from(self.base.addr()), self.host_bits(), self.requested)
    }

    /// Full records for the requested subnets, lowest first.
    pub fn records(&self) -> impl ExactSizeIterator<Item = SubnetRecord> {
        let mask = self.subnet_mask();
        let prefix = self.new_prefix;
        self.subnets()
            .enumerate()
            .map(move |(i, base)| SubnetRecord::compute(i as u64, base, mask, prefix))
    }
}

/// Number of bits needed to number `n_subnets` subnets: `ceil(log2(n))`.
///
/// Rounds `n - 1` up to a run of ones by smearing its top bit downwards,
/// then counts the ones.
pub fn extra_bits_for(n_subnets: u64) -> u32 {
    let mut m = n_subnets.saturating_sub(1);
    m |= m >> 1;
    m |= m >> 2;
    m |= m >> 4;
    m |= m >> 8;
    m |= m >> 16;
    m |= m >> 32;
    m.count_ones()
}

/// Smallest prefix that yields at least `n_subnets` subnets out of `/base_prefix`.
///
/// # Examples
/// ```
/// use subnet_partition::processing::new_prefix;
/// assert_eq!(new_prefix(22, 10).unwrap(), 26);
/// assert_eq!(new_prefix(24, 1).unwrap(), 24);
/// assert!(new_prefix(30, 8).is_err());
/// ```
pub fn new_prefix(base_prefix: u8, n_subnets: i64) -> Result<u8> {
    if base_prefix > MAX_LENGTH {
        return Err(SubnetError::PrefixOutOfRange(base_prefix as i64));
    }
    if n_subnets < 1 {
        return Err(SubnetError::InvalidSubnetCount(n_subnets));
    }
    let extra_bits = extra_bits_for(n_subnets as u64);
    let prefix = base_prefix as u32 + extra_bits;
    if prefix > MAX_LENGTH as u32 {
        return Err(SubnetError::PrefixOverflow {
            base_prefix,
            extra_bits,
        });
    }
    Ok(prefix as u8)
}

/// Plan the split of `base` into `n_subnets` equal subnets.
pub fn plan_subnets(base: Network, n_subnets: i64) -> Result<SubnetPlan> {
    let prefix = new_prefix(base.prefix(), n_subnets)?;
    let plan = SubnetPlan {
        base,
        new_prefix: prefix,
        extra_bits: (prefix - base.prefix()) as u32,
        requested: n_subnets as u64,
    };
    log::info!(
        "Plan {base} into {n} subnet(s): /{prefix} ({cap} available)",
        base = plan.base,
        n = plan.requested,
        prefix = plan.new_prefix,
        cap = plan.capacity()
    );
    if plan.unused() > 0 {
        log::warn!("{} subnet(s) at /{} left unused", plan.unused(), plan.new_prefix);
    }
    Ok(plan)
}
