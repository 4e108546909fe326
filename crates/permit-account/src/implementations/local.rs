//! In-process secp256k1 signature recovery.
//!
//! Recovers signer addresses from 65-byte r || s || v signatures over a
//! 32-byte prehash, using the k256 backend of `alloy-primitives`. This is
//! the production recoverer; the permit digests it consumes are already
//! domain-separated, so no message prefixing happens here.

use crate::{AccountError, RecoveryInterface};
use alloy_primitives::{Address, Signature as EcdsaSignature, B256};
use async_trait::async_trait;
use permit_types::{ConfigSchema, Schema, Signature, ValidationError};

/// Length of a recoverable secp256k1 signature: r (32) || s (32) || v (1).
const SIGNATURE_LENGTH: usize = 65;

/// Signature recovery backed by in-process secp256k1 arithmetic.
pub struct LocalRecovery;

#[async_trait]
impl RecoveryInterface for LocalRecovery {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(LocalRecoverySchema)
	}

	async fn recover_signer(
		&self,
		digest: &B256,
		signature: &Signature,
	) -> Result<Address, AccountError> {
		if signature.0.len() != SIGNATURE_LENGTH {
			return Err(AccountError::MalformedSignature(format!(
				"expected {} bytes, got {}",
				SIGNATURE_LENGTH,
				signature.0.len()
			)));
		}

		// Accepts v in {0, 1, 27, 28}; anything else fails to parse.
		let parsed = EcdsaSignature::try_from(signature.0.as_slice())
			.map_err(|e| AccountError::MalformedSignature(e.to_string()))?;

		parsed
			.recover_address_from_prehash(digest)
			.map_err(|e| AccountError::RecoveryFailed(e.to_string()))
	}
}

/// Configuration schema for LocalRecovery.
pub struct LocalRecoverySchema;

impl ConfigSchema for LocalRecoverySchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		// Local recovery has no required configuration
		let schema = Schema::new(vec![], vec![]);
		schema.validate(config)
	}
}

/// Factory function to create a local recoverer from configuration.
///
/// Configuration parameters:
/// - None required for local recovery
pub fn create_recovery(config: &toml::Value) -> Result<Box<dyn RecoveryInterface>, AccountError> {
	LocalRecoverySchema
		.validate(config)
		.map_err(|e| AccountError::InvalidConfig(e.to_string()))?;
	Ok(Box::new(LocalRecovery))
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_signer::SignerSync;
	use alloy_signer_local::PrivateKeySigner;
	use alloy_primitives::keccak256;

	fn sign(signer: &PrivateKeySigner, digest: &B256) -> Signature {
		let sig = signer.sign_hash_sync(digest).unwrap();
		Signature(sig.as_bytes().to_vec())
	}

	#[tokio::test]
	async fn test_recovers_the_signing_address() {
		let signer = PrivateKeySigner::random();
		let digest = keccak256(b"some digest");
		let signature = sign(&signer, &digest);

		let recovered = LocalRecovery
			.recover_signer(&digest, &signature)
			.await
			.unwrap();
		assert_eq!(recovered, signer.address());
	}

	#[tokio::test]
	async fn test_wrong_digest_recovers_a_different_address() {
		let signer = PrivateKeySigner::random();
		let digest = keccak256(b"signed digest");
		let signature = sign(&signer, &digest);

		let other = keccak256(b"some other digest");
		let recovered = LocalRecovery
			.recover_signer(&other, &signature)
			.await
			.unwrap();
		assert_ne!(recovered, signer.address());
	}

	#[tokio::test]
	async fn test_rejects_truncated_signature() {
		let digest = keccak256(b"digest");
		let result = LocalRecovery
			.recover_signer(&digest, &Signature(vec![0u8; 64]))
			.await;
		assert!(matches!(result, Err(AccountError::MalformedSignature(_))));
	}

	#[tokio::test]
	async fn test_rejects_junk_bytes() {
		let digest = keccak256(b"digest");
		// An all-0xff signature has r and s outside the curve order.
		let result = LocalRecovery
			.recover_signer(&digest, &Signature(vec![0xff; 65]))
			.await;
		assert!(result.is_err());
	}

	#[test]
	fn test_factory_accepts_empty_config() {
		let config: toml::Value = toml::from_str("").unwrap();
		assert!(create_recovery(&config).is_ok());
	}
}
