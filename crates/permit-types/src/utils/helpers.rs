//! Helper utilities for common operations.
//!
//! This module provides utility functions used throughout the relay
//! for common operations like timestamp retrieval.

/// Helper function to get current timestamp, returns 0 if system time is before UNIX epoch.
///
/// Safely retrieves the current UNIX timestamp in seconds. Permit
/// deadlines are compared against this value at verification time.
pub fn current_timestamp() -> u64 {
	std::time::SystemTime::now()
		.duration_since(std::time::UNIX_EPOCH)
		.map(|d| d.as_secs())
		.unwrap_or(0)
}
