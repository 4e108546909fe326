//! Mock recoverer for testing verifier logic without real keys.
//!
//! Resolves every (digest, signature) pair to a fixed address. Configure
//! it with `Address::ZERO` to exercise the verifier's rejection of the
//! zero identity.

use crate::{AccountError, RecoveryInterface};
use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use permit_types::{ConfigSchema, Schema, Signature, ValidationError};

/// Recovery implementation that always resolves to a fixed signer.
pub struct MockRecovery {
	/// The address returned for every recovery.
	signer: Address,
}

impl MockRecovery {
	/// Creates a mock that recovers `signer` for any input.
	pub fn new(signer: Address) -> Self {
		Self { signer }
	}
}

#[async_trait]
impl RecoveryInterface for MockRecovery {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(MockRecoverySchema)
	}

	async fn recover_signer(
		&self,
		_digest: &B256,
		_signature: &Signature,
	) -> Result<Address, AccountError> {
		Ok(self.signer)
	}
}

/// Configuration schema for MockRecovery.
pub struct MockRecoverySchema;

impl ConfigSchema for MockRecoverySchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		// The mock has no required configuration
		let schema = Schema::new(vec![], vec![]);
		schema.validate(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::keccak256;

	#[tokio::test]
	async fn test_always_resolves_to_the_configured_signer() {
		let signer = Address::repeat_byte(0x11);
		let mock = MockRecovery::new(signer);

		let recovered = mock
			.recover_signer(&keccak256(b"anything"), &Signature(vec![]))
			.await
			.unwrap();
		assert_eq!(recovered, signer);
	}
}
