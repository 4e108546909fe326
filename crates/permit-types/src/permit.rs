//! Permit shapes and their canonical EIP-712 encodings.
//!
//! A permit is a holder's pre-authorization of exactly one transfer,
//! signed off-band and submitted by an unrelated relayer. There is one
//! shape per asset kind; field order within each shape is part of the
//! wire contract and determines the hash layout. Off-core signers must
//! reproduce the type strings below byte-for-byte or their signatures
//! will not verify.

use crate::domain::DomainContext;
use crate::utils::{compute_final_digest, Eip712AbiEncoder};
use alloy_primitives::{keccak256, Address, B256, U256};

/// Canonical type string for fungible transfer permits.
pub const FUNGIBLE_TRANSFER_TYPE: &str =
	"FungibleTransfer(address registry,address to,uint256 amount,uint256 nonce,uint256 deadline)";

/// Canonical type string for non-fungible transfer permits.
pub const NON_FUNGIBLE_TRANSFER_TYPE: &str =
	"NonFungibleTransfer(address registry,uint256 tokenId,address to,uint256 nonce,uint256 deadline)";

/// Canonical type string for semi-fungible transfer permits.
pub const SEMI_FUNGIBLE_TRANSFER_TYPE: &str =
	"SemiFungibleTransfer(address registry,uint256 tokenId,address to,uint256 amount,uint256 nonce,uint256 deadline,bytes data)";

/// An opaque recoverable signature over a 32-byte digest.
///
/// Produced off-band by the holder, carried as raw bytes (r || s || v for
/// the secp256k1 implementation), never stored by the core.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Signature(pub Vec<u8>);

/// Pre-authorization of a single fungible balance transfer.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FungibleTransfer {
	/// The fungible asset registry holding the balance.
	pub registry: Address,
	/// Recipient of the transfer.
	pub to: Address,
	/// Amount to transfer.
	pub amount: U256,
	/// The holder's nonce at signing time.
	pub nonce: U256,
	/// Latest acceptable verification time, in seconds since epoch.
	pub deadline: U256,
}

impl FungibleTransfer {
	/// Hash of the shape's canonical type string.
	pub fn type_hash() -> B256 {
		keccak256(FUNGIBLE_TRANSFER_TYPE.as_bytes())
	}

	/// EIP-712 struct hash over the fields in declared order.
	pub fn struct_hash(&self) -> B256 {
		let mut enc = Eip712AbiEncoder::new();
		enc.push_b256(&Self::type_hash());
		enc.push_address(&self.registry);
		enc.push_address(&self.to);
		enc.push_u256(self.amount);
		enc.push_u256(self.nonce);
		enc.push_u256(self.deadline);
		keccak256(enc.finish())
	}
}

/// Pre-authorization of a single non-fungible ownership transfer.
///
/// Carries no holder identity: the recovered signer is the holder, and
/// actual ownership of `token_id` is enforced by the registry primitive.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NonFungibleTransfer {
	/// The non-fungible asset registry holding the token.
	pub registry: Address,
	/// Token to transfer.
	pub token_id: U256,
	/// Recipient of the transfer.
	pub to: Address,
	/// The holder's nonce at signing time.
	pub nonce: U256,
	/// Latest acceptable verification time, in seconds since epoch.
	pub deadline: U256,
}

impl NonFungibleTransfer {
	/// Hash of the shape's canonical type string.
	pub fn type_hash() -> B256 {
		keccak256(NON_FUNGIBLE_TRANSFER_TYPE.as_bytes())
	}

	/// EIP-712 struct hash over the fields in declared order.
	pub fn struct_hash(&self) -> B256 {
		let mut enc = Eip712AbiEncoder::new();
		enc.push_b256(&Self::type_hash());
		enc.push_address(&self.registry);
		enc.push_u256(self.token_id);
		enc.push_address(&self.to);
		enc.push_u256(self.nonce);
		enc.push_u256(self.deadline);
		keccak256(enc.finish())
	}
}

/// Pre-authorization of a single semi-fungible balance transfer.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SemiFungibleTransfer {
	/// The semi-fungible asset registry holding the balances.
	pub registry: Address,
	/// Token class to transfer from.
	pub token_id: U256,
	/// Recipient of the transfer.
	pub to: Address,
	/// Amount of `token_id` to transfer.
	pub amount: U256,
	/// The holder's nonce at signing time.
	pub nonce: U256,
	/// Latest acceptable verification time, in seconds since epoch.
	pub deadline: U256,
	/// Opaque bytes forwarded to the registry's transfer callback.
	pub data: Vec<u8>,
}

impl SemiFungibleTransfer {
	/// Hash of the shape's canonical type string.
	pub fn type_hash() -> B256 {
		keccak256(SEMI_FUNGIBLE_TRANSFER_TYPE.as_bytes())
	}

	/// EIP-712 struct hash over the fields in declared order.
	///
	/// The variable-length `data` field contributes as keccak256(data),
	/// per EIP-712 encoding of `bytes`.
	pub fn struct_hash(&self) -> B256 {
		let mut enc = Eip712AbiEncoder::new();
		enc.push_b256(&Self::type_hash());
		enc.push_address(&self.registry);
		enc.push_u256(self.token_id);
		enc.push_address(&self.to);
		enc.push_u256(self.amount);
		enc.push_u256(self.nonce);
		enc.push_u256(self.deadline);
		enc.push_bytes_hashed(&self.data);
		keccak256(enc.finish())
	}
}

/// A permit, discriminated by asset kind.
///
/// The closed set of authorization shapes the relay verifies. All three
/// share the signing domain and the per-holder nonce sequence; only the
/// field encoding differs.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Permit {
	/// Fungible balance transfer authorization.
	Fungible(FungibleTransfer),
	/// Non-fungible ownership transfer authorization.
	NonFungible(NonFungibleTransfer),
	/// Semi-fungible balance transfer authorization.
	SemiFungible(SemiFungibleTransfer),
}

impl Permit {
	/// The nonce the holder signed into this permit.
	pub fn nonce(&self) -> U256 {
		match self {
			Permit::Fungible(p) => p.nonce,
			Permit::NonFungible(p) => p.nonce,
			Permit::SemiFungible(p) => p.nonce,
		}
	}

	/// The permit's expiry, in seconds since epoch.
	pub fn deadline(&self) -> U256 {
		match self {
			Permit::Fungible(p) => p.deadline,
			Permit::NonFungible(p) => p.deadline,
			Permit::SemiFungible(p) => p.deadline,
		}
	}

	/// EIP-712 struct hash of the underlying shape.
	pub fn struct_hash(&self) -> B256 {
		match self {
			Permit::Fungible(p) => p.struct_hash(),
			Permit::NonFungible(p) => p.struct_hash(),
			Permit::SemiFungible(p) => p.struct_hash(),
		}
	}

	/// The digest the holder signs: keccak256(0x1901 || domain || struct).
	///
	/// The domain separator is recomputed here rather than cached, so the
	/// digest always reflects the context's current chain identity.
	pub fn signing_digest(&self, domain: &DomainContext) -> B256 {
		compute_final_digest(&domain.separator(), &self.struct_hash())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn domain() -> DomainContext {
		DomainContext::new("PermitRelay", "1", 31337, Address::repeat_byte(0x42))
	}

	fn fungible() -> FungibleTransfer {
		FungibleTransfer {
			registry: Address::repeat_byte(0x01),
			to: Address::repeat_byte(0x02),
			amount: U256::from(100),
			nonce: U256::ZERO,
			deadline: U256::MAX,
		}
	}

	fn semi_fungible() -> SemiFungibleTransfer {
		SemiFungibleTransfer {
			registry: Address::repeat_byte(0x01),
			token_id: U256::from(42),
			to: Address::repeat_byte(0x02),
			amount: U256::from(100),
			nonce: U256::ZERO,
			deadline: U256::MAX,
			data: vec![],
		}
	}

	#[test]
	fn test_struct_hash_is_deterministic() {
		assert_eq!(fungible().struct_hash(), fungible().struct_hash());
	}

	#[test]
	fn test_struct_hash_binds_every_field() {
		let base = fungible();

		let mut p = base.clone();
		p.registry = Address::repeat_byte(0x03);
		assert_ne!(base.struct_hash(), p.struct_hash());

		let mut p = base.clone();
		p.to = Address::repeat_byte(0x03);
		assert_ne!(base.struct_hash(), p.struct_hash());

		let mut p = base.clone();
		p.amount = U256::from(101);
		assert_ne!(base.struct_hash(), p.struct_hash());

		let mut p = base.clone();
		p.nonce = U256::from(1);
		assert_ne!(base.struct_hash(), p.struct_hash());

		let mut p = base.clone();
		p.deadline = U256::from(1);
		assert_ne!(base.struct_hash(), p.struct_hash());
	}

	#[test]
	fn test_data_field_participates_via_hash() {
		let base = semi_fungible();

		let mut p = base.clone();
		p.data = vec![0x01];
		assert_ne!(base.struct_hash(), p.struct_hash());

		// Identical bytes reproduce the identical hash.
		let mut q = base.clone();
		q.data = vec![];
		assert_eq!(base.struct_hash(), q.struct_hash());
	}

	#[test]
	fn test_shapes_hash_into_disjoint_spaces() {
		// A non-fungible permit with the same word content as a fungible
		// one still hashes differently, because the type hash differs.
		let f = FungibleTransfer {
			registry: Address::repeat_byte(0x01),
			to: Address::repeat_byte(0x02),
			amount: U256::from(42),
			nonce: U256::ZERO,
			deadline: U256::MAX,
		};
		let n = NonFungibleTransfer {
			registry: Address::repeat_byte(0x01),
			token_id: U256::from(42),
			to: Address::repeat_byte(0x02),
			nonce: U256::ZERO,
			deadline: U256::MAX,
		};
		assert_ne!(f.struct_hash(), n.struct_hash());
	}

	#[test]
	fn test_signing_digest_is_domain_scoped() {
		let permit = Permit::Fungible(fungible());

		let here = domain();
		let mut elsewhere = domain();
		elsewhere.chain_id = 1;

		assert_ne!(permit.signing_digest(&here), permit.signing_digest(&elsewhere));
	}

	#[test]
	fn test_permit_accessors_dispatch_per_shape() {
		let permit = Permit::SemiFungible(semi_fungible());
		assert_eq!(permit.nonce(), U256::ZERO);
		assert_eq!(permit.deadline(), U256::MAX);
		assert_eq!(permit.struct_hash(), semi_fungible().struct_hash());
	}
}
