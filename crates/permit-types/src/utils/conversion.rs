//! Conversion utilities for common data transformations.
//!
//! This module provides parsing helpers for the string-encoded values
//! that arrive through TOML configuration.

use super::formatting::with_0x_prefix;
use alloy_primitives::Address;

/// Parses a hex string into an `Address`, with or without "0x" prefix.
///
/// Returns a descriptive error message suitable for wrapping in a
/// configuration validation error.
pub fn parse_address(value: &str) -> Result<Address, String> {
	with_0x_prefix(value)
		.parse::<Address>()
		.map_err(|e| format!("Invalid address '{}': {}", value, e))
}
