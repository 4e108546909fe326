//! Signing domain for the permit relay.
//!
//! Every permit signature is scoped to one relay deployment through an
//! EIP-712 domain separator derived from the deployment's name, version,
//! chain identity, and verifying address. Signatures produced for one
//! deployment (or one chain) never verify against another.

use crate::utils::{parse_address, Eip712AbiEncoder};
use crate::validation::{Field, FieldType, Schema, ValidationError};
use alloy_primitives::{keccak256, Address, B256, U256};

/// Canonical EIP-712 domain type string. Must be reproduced byte-for-byte
/// by off-core signers or signatures will not verify.
pub const DOMAIN_TYPE: &str =
	"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// The signing domain of one relay deployment.
///
/// Immutable once the relay instance is created and identical across all
/// three permit shapes within one instance. `name` and `version` are
/// deployment-chosen constants.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DomainContext {
	/// Human-readable name of the signing domain.
	pub name: String,
	/// Domain version, bumped on incompatible changes to the wire contract.
	pub version: String,
	/// Chain identifier the relay operates on.
	pub chain_id: u64,
	/// Address of the verifying relay instance.
	pub verifying_contract: Address,
}

impl DomainContext {
	/// Creates a new domain context.
	pub fn new(
		name: impl Into<String>,
		version: impl Into<String>,
		chain_id: u64,
		verifying_contract: Address,
	) -> Self {
		Self {
			name: name.into(),
			version: version.into(),
			chain_id,
			verifying_contract,
		}
	}

	/// Computes the EIP-712 domain separator for this context.
	///
	/// Recomputed on every call rather than cached, so callers that update
	/// `chain_id` after a fork always sign and verify against the current
	/// chain identity.
	pub fn separator(&self) -> B256 {
		let mut enc = Eip712AbiEncoder::new();
		enc.push_b256(&keccak256(DOMAIN_TYPE.as_bytes()));
		enc.push_b256(&keccak256(self.name.as_bytes()));
		enc.push_b256(&keccak256(self.version.as_bytes()));
		enc.push_u256(U256::from(self.chain_id));
		enc.push_address(&self.verifying_contract);
		keccak256(enc.finish())
	}

	/// Builds a domain context from a TOML `[domain]` table.
	///
	/// Expected format:
	/// ```toml
	/// name = "PermitRelay"
	/// version = "1"
	/// chain_id = 31337
	/// verifying_contract = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
	/// ```
	pub fn from_config(config: &toml::Value) -> Result<Self, ValidationError> {
		domain_schema().validate(config)?;

		// Presence and types are guaranteed by the schema above.
		let get_str = |field: &str| -> Result<&str, ValidationError> {
			config
				.get(field)
				.and_then(|v| v.as_str())
				.ok_or_else(|| ValidationError::MissingField(field.to_string()))
		};

		let name = get_str("name")?;
		let version = get_str("version")?;
		let chain_id = config
			.get("chain_id")
			.and_then(|v| v.as_integer())
			.ok_or_else(|| ValidationError::MissingField("chain_id".to_string()))?
			as u64;
		let verifying_contract = parse_address(get_str("verifying_contract")?).map_err(
			|message| ValidationError::InvalidValue {
				field: "verifying_contract".to_string(),
				message,
			},
		)?;

		Ok(Self::new(name, version, chain_id, verifying_contract))
	}
}

/// Validation schema for the `[domain]` configuration table.
fn domain_schema() -> Schema {
	Schema::new(
		vec![
			Field::new("name", FieldType::String),
			Field::new("version", FieldType::String),
			Field::new(
				"chain_id",
				FieldType::Integer {
					min: Some(0),
					max: None,
				},
			),
			Field::new("verifying_contract", FieldType::String).with_validator(|v| {
				v.as_str()
					.map(|s| parse_address(s).map(|_| ()))
					.unwrap_or(Ok(()))
			}),
		],
		vec![],
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn domain() -> DomainContext {
		DomainContext::new("PermitRelay", "1", 31337, Address::repeat_byte(0x42))
	}

	#[test]
	fn test_separator_is_stable() {
		assert_eq!(domain().separator(), domain().separator());
	}

	#[test]
	fn test_separator_changes_with_chain_id() {
		let mut forked = domain();
		forked.chain_id = 1;
		assert_ne!(domain().separator(), forked.separator());
	}

	#[test]
	fn test_separator_changes_with_each_field() {
		let base = domain();

		let mut renamed = base.clone();
		renamed.name = "OtherRelay".to_string();
		assert_ne!(base.separator(), renamed.separator());

		let mut bumped = base.clone();
		bumped.version = "2".to_string();
		assert_ne!(base.separator(), bumped.separator());

		let mut moved = base.clone();
		moved.verifying_contract = Address::repeat_byte(0x43);
		assert_ne!(base.separator(), moved.separator());
	}

	#[test]
	fn test_from_config() {
		let config: toml::Value = toml::from_str(
			r#"
			name = "PermitRelay"
			version = "1"
			chain_id = 31337
			verifying_contract = "0x4242424242424242424242424242424242424242"
			"#,
		)
		.unwrap();

		assert_eq!(DomainContext::from_config(&config).unwrap(), domain());
	}

	#[test]
	fn test_from_config_rejects_missing_version() {
		let config: toml::Value = toml::from_str(
			r#"
			name = "PermitRelay"
			chain_id = 31337
			verifying_contract = "0x4242424242424242424242424242424242424242"
			"#,
		)
		.unwrap();

		assert!(matches!(
			DomainContext::from_config(&config),
			Err(ValidationError::MissingField(f)) if f == "version"
		));
	}

	#[test]
	fn test_from_config_rejects_bad_address() {
		let config: toml::Value = toml::from_str(
			r#"
			name = "PermitRelay"
			version = "1"
			chain_id = 31337
			verifying_contract = "0x1234"
			"#,
		)
		.unwrap();

		assert!(matches!(
			DomainContext::from_config(&config),
			Err(ValidationError::InvalidValue { field, .. }) if field == "verifying_contract"
		));
	}
}
