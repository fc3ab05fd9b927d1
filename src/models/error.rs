//! Typed failures raised by the partitioning engine.

use thiserror::Error;

/// Everything that can go wrong while parsing, planning or enumerating subnets.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubnetError {
    /// Address text is not four decimal octets in [0,255].
    #[error("Malformed IPv4 address: '{0}'")]
    MalformedAddress(String),

    /// Mask text is neither `/N` nor dotted-decimal.
    #[error("Malformed network mask: '{0}' (use /N or dotted-decimal)")]
    MalformedMask(String),

    /// Prefix length outside [0,32].
    #[error("Prefix out of range: {0} (must be 0-32)")]
    PrefixOutOfRange(i64),

    /// Subnet count of zero or below.
    #[error("Invalid subnet count: {0} (must be 1 or more)")]
    InvalidSubnetCount(i64),

    /// Splitting needs more bits than the address has.
    #[error("Prefix overflow: /{base_prefix} + {extra_bits} extra bits exceeds /32")]
    PrefixOverflow { base_prefix: u8, extra_bits: u32 },

    /// Dotted-decimal mask whose one-bits are not a contiguous left-aligned run.
    #[error("Ambiguous network mask: '{0}' is not a contiguous prefix mask")]
    MaskAmbiguous(String),
}

/// Engine result alias.
pub type Result<T> = std::result::Result<T, SubnetError>;
