//! Subnet partitioning logic.
//!
//! This module contains the arithmetic that splits a network:
//! - [`planner`] - New prefix for a requested subnet count
//! - [`enumerator`] - Sequence of subnet base addresses

mod enumerator;
mod planner;

// Re-export public functions
pub use enumerator::{enumerate_subnets, SubnetIter};
pub use planner::{extra_bits_for, new_prefix, plan_subnets, SubnetPlan};
