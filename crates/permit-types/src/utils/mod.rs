//! Utility functions for common type conversions and transformations.
//!
//! This module provides helper functions for EIP-712 encoding, hex string
//! formatting, address parsing, and timestamp retrieval used throughout
//! the permit relay system.

pub mod conversion;
pub mod eip712;
pub mod formatting;
pub mod helpers;

pub use conversion::parse_address;
pub use eip712::{compute_final_digest, Eip712AbiEncoder};
pub use formatting::{with_0x_prefix, without_0x_prefix};
pub use helpers::current_timestamp;
