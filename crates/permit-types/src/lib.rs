//! Common types module for the permit relay system.
//!
//! This module defines the core data types shared across the relay
//! components: the signing domain, the three permit shapes and their
//! canonical EIP-712 encodings, and the configuration validation
//! framework used by implementation factories.

/// Signing domain context and its EIP-712 domain separator.
pub mod domain;
/// Permit shapes, canonical type strings, and struct hashing.
pub mod permit;
/// Utility functions for encoding, formatting, and conversions.
pub mod utils;
/// Configuration validation types for ensuring type-safe configurations.
pub mod validation;

// Re-export all types for convenient access
pub use domain::{DomainContext, DOMAIN_TYPE};
pub use permit::{
	FungibleTransfer, NonFungibleTransfer, Permit, SemiFungibleTransfer, Signature,
	FUNGIBLE_TRANSFER_TYPE, NON_FUNGIBLE_TRANSFER_TYPE, SEMI_FUNGIBLE_TRANSFER_TYPE,
};
pub use utils::{
	compute_final_digest, current_timestamp, parse_address, with_0x_prefix, without_0x_prefix,
	Eip712AbiEncoder,
};
pub use validation::{ConfigSchema, Field, FieldType, Schema, ValidationError};

// The primitive chain types used throughout the workspace.
pub use alloy_primitives::{Address, B256, U256};
