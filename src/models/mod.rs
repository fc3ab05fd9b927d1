//! Domain models for subnet partitioning.
//!
//! This module contains the core value types used throughout the crate:
//! - [`SubnetError`] - Typed engine failures
//! - [`Network`] and the address/mask helpers - IPv4 codec and prefix math
//! - [`SubnetRecord`] - Per-subnet addressing facts

mod error;
mod ipv4;
mod subnet;

// Re-export public types
pub use error::{Result, SubnetError};
pub use ipv4::{
    format_addr, is_contiguous, mask_to_prefix, parse_addr, parse_mask, prefix_to_mask, wildcard,
    Network, MAX_LENGTH,
};
pub use subnet::SubnetRecord;
