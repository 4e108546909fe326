//! Signature recovery module for the permit relay system.
//!
//! This module provides the boundary to the elliptic-curve primitive the
//! verifier depends on: recovering a signer identity from a digest and a
//! recoverable signature. Keeping recovery behind an interface lets the
//! core's verification logic run against a mock recoverer in tests.

use async_trait::async_trait;
use permit_types::{Address, ConfigSchema, Signature, B256};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod local;
	pub mod mock;
}

/// Errors that can occur during signature recovery.
#[derive(Debug, Error)]
pub enum AccountError {
	/// Error that occurs when a signature cannot be parsed at all.
	#[error("Malformed signature: {0}")]
	MalformedSignature(String),
	/// Error that occurs when recovery fails to produce an identity.
	#[error("Recovery failed: {0}")]
	RecoveryFailed(String),
	/// Error that occurs when the implementation's configuration is invalid.
	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),
}

/// Trait defining the interface for signature recovery implementations.
///
/// Implementations recover the signing identity from a 32-byte digest and
/// an opaque recoverable signature. Recovery never consults any state; a
/// given (digest, signature) pair always resolves to the same identity.
#[async_trait]
pub trait RecoveryInterface: Send + Sync {
	/// Returns the configuration schema for this recovery implementation.
	///
	/// The schema is used to validate TOML configuration before the
	/// implementation is initialized.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Recovers the signer of `digest` from `signature`.
	///
	/// Fails if the signature cannot be parsed or does not resolve to an
	/// identity. A successful recovery of the wrong digest yields a
	/// different (effectively random) identity, not an error; callers are
	/// responsible for comparing the result against the expected signer.
	async fn recover_signer(
		&self,
		digest: &B256,
		signature: &Signature,
	) -> Result<Address, AccountError>;
}

/// Service that manages signature recovery.
///
/// Wraps an underlying recovery implementation behind a stable call
/// surface for the verifier.
pub struct RecoveryService {
	/// The underlying recovery implementation.
	implementation: Box<dyn RecoveryInterface>,
}

impl RecoveryService {
	/// Creates a new RecoveryService with the specified implementation.
	pub fn new(implementation: Box<dyn RecoveryInterface>) -> Self {
		Self { implementation }
	}

	/// Recovers the signer of `digest` from `signature`.
	///
	/// Delegates to the underlying implementation.
	pub async fn recover_signer(
		&self,
		digest: &B256,
		signature: &Signature,
	) -> Result<Address, AccountError> {
		self.implementation.recover_signer(digest, signature).await
	}
}
