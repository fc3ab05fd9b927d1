//! IPv4 address codec and mask/prefix conversion.
//!
//! Addresses and masks are plain `u32` values in host order; the dotted-decimal
//! text form is only produced or consumed at the edges. [`Network`] pairs an
//! address with a prefix length for CIDR notation.

use super::error::{Result, SubnetError};
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::OnceLock;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Four dot separated groups of one to three decimal digits, nothing else.
static DOTTED_QUAD_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_dotted_quad_regex() -> &'static Regex {
    DOTTED_QUAD_REGEX.get_or_init(|| {
        Regex::new(r"^(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})$").expect("Invalid Regex")
    })
}

/// Parse dotted-decimal text into a 32-bit address, octets packed big-endian.
///
/// # Examples
/// ```
/// use subnet_partition::models::parse_addr;
/// assert_eq!(parse_addr("192.168.1.10").unwrap(), 0xC0A8010A);
/// assert!(parse_addr("192.168.1.256").is_err());
/// ```
pub fn parse_addr(text: &str) -> Result<u32> {
    let caps = get_dotted_quad_regex()
        .captures(text)
        .ok_or_else(|| SubnetError::MalformedAddress(text.to_string()))?;

    let mut addr: u32 = 0;
    for i in 1..=4 {
        let octet: u32 = caps[i]
            .parse()
            .map_err(|_| SubnetError::MalformedAddress(text.to_string()))?;
        if octet > 255 {
            return Err(SubnetError::MalformedAddress(text.to_string()));
        }
        addr = (addr << 8) | octet;
    }
    Ok(addr)
}

/// Render a 32-bit address as four dotted decimal octets.
pub fn format_addr(addr: u32) -> String {
    format!(
        "{}.{}.{}.{}",
        (addr >> 24) & 0xFF,
        (addr >> 16) & 0xFF,
        (addr >> 8) & 0xFF,
        addr & 0xFF
    )
}

/// Convert a prefix length to a mask with the top `len` bits set.
///
/// # Examples
/// ```
/// use subnet_partition::models::prefix_to_mask;
/// assert_eq!(prefix_to_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn prefix_to_mask(len: u8) -> Result<u32> {
    if len > MAX_LENGTH {
        return Err(SubnetError::PrefixOutOfRange(len as i64));
    }
    // u64 so that a shift by 32 stays defined for /0
    let right_len = MAX_LENGTH - len;
    let all_bits = u32::MAX as u64;
    let mask = (all_bits >> right_len) << right_len;
    Ok(mask as u32)
}

/// True when the set bits of `mask` form one run starting at the top bit.
pub fn is_contiguous(mask: u32) -> bool {
    mask.leading_ones() == mask.count_ones()
}

/// Recover the prefix length of a mask.
///
/// Non-contiguous masks such as `255.0.255.0` are refused with
/// [`SubnetError::MaskAmbiguous`] instead of returning their population count.
pub fn mask_to_prefix(mask: u32) -> Result<u8> {
    if !is_contiguous(mask) {
        return Err(SubnetError::MaskAmbiguous(format_addr(mask)));
    }
    Ok(mask.count_ones() as u8)
}

/// Bitwise complement of a mask within 32 bits.
pub fn wildcard(mask: u32) -> u32 {
    mask ^ 0xFFFF_FFFF
}

/// Parse a mask argument, either `/N` or dotted-decimal.
pub fn parse_mask(text: &str) -> Result<u32> {
    if let Some(prefix) = text.strip_prefix('/') {
        let prefix: i64 = prefix
            .parse()
            .map_err(|_| SubnetError::MalformedMask(text.to_string()))?;
        if !(0..=MAX_LENGTH as i64).contains(&prefix) {
            return Err(SubnetError::PrefixOutOfRange(prefix));
        }
        prefix_to_mask(prefix as u8)
    } else if text.contains('.') {
        let mask = parse_addr(text).map_err(|_| SubnetError::MalformedMask(text.to_string()))?;
        if !is_contiguous(mask) {
            return Err(SubnetError::MaskAmbiguous(text.to_string()));
        }
        Ok(mask)
    } else {
        Err(SubnetError::MalformedMask(text.to_string()))
    }
}

/// Network in CIDR notation: base address with all host bits clear plus prefix.
///
/// Only built through [`Network::from_parts`] or parsing, so the prefix is
/// always 0-32 and the address never has host bits set.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Network {
    addr: Ipv4Addr,
    prefix: u8,
}

impl Network {
    /// Build a network from any address inside it; host bits are cleared.
    pub fn from_parts(addr: u32, prefix: u8) -> Result<Network> {
        let mask = prefix_to_mask(prefix)?;
        Ok(Network {
            addr: Ipv4Addr::from(addr & mask),
            prefix,
        })
    }

    /// Like [`Network::from_parts`] with the prefix capped at /32.
    pub(crate) fn clamped(addr: u32, prefix: u8) -> Network {
        let prefix = prefix.min(MAX_LENGTH);
        let mask = prefix_to_mask(prefix).unwrap_or(u32::MAX);
        Network {
            addr: Ipv4Addr::from(addr & mask),
            prefix,
        }
    }

    /// The network (base) address.
    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    /// The prefix length (0-32).
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// The network mask as a `u32`.
    pub fn mask(&self) -> u32 {
        prefix_to_mask(self.prefix).unwrap_or(u32::MAX)
    }

    /// Lowest address in the network.
    pub fn lo(&self) -> u32 {
        u32::from(self.addr) & self.mask()
    }

    /// Highest (broadcast) address in the network.
    pub fn hi(&self) -> u32 {
        self.lo() | wildcard(self.mask())
    }

    /// Check if an address lies within this network.
    pub fn contains(&self, addr: u32) -> bool {
        addr >= self.lo() && addr <= self.hi()
    }
}

impl FromStr for Network {
    type Err = SubnetError;

    /// Parse `a.b.c.d/N`; host bits in the address are cleared.
    fn from_str(s: &str) -> Result<Network> {
        let s = s.trim();
        let (addr, prefix) = s
            .split_once('/')
            .ok_or_else(|| SubnetError::MalformedMask(s.to_string()))?;
        let addr = parse_addr(addr)?;
        let prefix: i64 = prefix
            .parse()
            .map_err(|_| SubnetError::MalformedMask(s.to_string()))?;
        if !(0..=MAX_LENGTH as i64).contains(&prefix) {
            return Err(SubnetError::PrefixOutOfRange(prefix));
        }
        Network::from_parts(addr, prefix as u8)
    }
}

impl Serialize for Network {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Network, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Network::from_str(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}
