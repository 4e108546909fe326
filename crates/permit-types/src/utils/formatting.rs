//! String formatting utilities.
//!
//! Provides hex string prefix management for addresses, digests, and
//! signatures rendered in logs and error messages.

/// Adds "0x" prefix to a hex string if it doesn't already have one.
///
/// Ensures that a hex string has the standard "0x" prefix, adding it if
/// missing and leaving it unchanged if already present.
pub fn with_0x_prefix(hex_str: &str) -> String {
	if hex_str.to_lowercase().starts_with("0x") {
		hex_str.to_string()
	} else {
		format!("0x{}", hex_str)
	}
}

/// Removes "0x" prefix from a hex string if present.
///
/// Removes the "0x" or "0X" prefix from a hex string if present,
/// returning the hex string without prefix.
pub fn without_0x_prefix(hex_str: &str) -> &str {
	hex_str
		.strip_prefix("0x")
		.or_else(|| hex_str.strip_prefix("0X"))
		.unwrap_or(hex_str)
}
