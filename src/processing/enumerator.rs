//! Subnet enumeration.
//!
//! Walks subnet base addresses upwards from the base network. Each address is
//! derived from the previous one by bumping the subnet-id bits above the host
//! part, so consecutive subnets are exactly `2^host_bits` apart.

use crate::models::{Result, SubnetError, MAX_LENGTH};

/// Lazy, finite sequence of subnet base addresses.
#[derive(Debug, Clone)]
pub struct SubnetIter {
    // u64 keeps the shift by 32 (a /0 subnet) defined
    next: u64,
    host_bits: u32,
    remaining: u64,
}

impl SubnetIter {
    pub(crate) fn new(net_ip: u32, host_bits: u32, count: u64) -> SubnetIter {
        SubnetIter {
            next: net_ip as u64,
            host_bits,
            remaining: count,
        }
    }

    fn len_left(&self) -> usize {
        if self.next > u32::MAX as u64 {
            return 0;
        }
        let room = ((u32::MAX as u64 - self.next) >> self.host_bits) + 1;
        self.remaining.min(room) as usize
    }
}

impl Iterator for SubnetIter {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.remaining == 0 || self.next > u32::MAX as u64 {
            return None;
        }
        let current = self.next;
        self.remaining -= 1;
        self.next = ((current >> self.host_bits) + 1) << self.host_bits;
        Some(current as u32)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len_left();
        (n, Some(n))
    }
}

impl ExactSizeIterator for SubnetIter {}

/// Enumerate `count` subnet base addresses at `/new_prefix` starting at `net_ip`.
///
/// The first address is `net_ip` itself; only the mask width changes.
/// The sequence stops early rather than wrap past `255.255.255.255`.
pub fn enumerate_subnets(net_ip: u32, new_prefix: u8, count: u64) -> Result<SubnetIter> {
    if new_prefix > MAX_LENGTH {
        return Err(SubnetError::PrefixOutOfRange(new_prefix as i64));
    }
    Ok(SubnetIter::new(net_ip, (MAX_LENGTH - new_prefix) as u32, count))
}
