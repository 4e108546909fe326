//! Generic EIP-712 utilities shared across the relay.
//!
//! These helpers provide:
//! - Final digest computation (0x1901 || domainHash || structHash)
//! - A minimal ABI encoder for the static EIP-712 field types the permit
//!   shapes use
//!
//! Variable-length fields (`bytes`) are never pushed raw; callers hash
//! them first and push the resulting word.

use alloy_primitives::{keccak256, Address, B256, U256};

/// Compute the final EIP-712 digest: keccak256(0x1901 || domainHash || structHash).
pub fn compute_final_digest(domain_hash: &B256, struct_hash: &B256) -> B256 {
	let mut out = Vec::with_capacity(2 + 32 + 32);
	out.push(0x19);
	out.push(0x01);
	out.extend_from_slice(domain_hash.as_slice());
	out.extend_from_slice(struct_hash.as_slice());
	keccak256(out)
}

/// Minimal ABI encoder for static types used in EIP-712 struct hashing.
///
/// Every push appends exactly one 32-byte word: integers are big-endian,
/// addresses are left-padded with 12 zero bytes.
pub struct Eip712AbiEncoder {
	buf: Vec<u8>,
}

impl Default for Eip712AbiEncoder {
	fn default() -> Self {
		Self::new()
	}
}

impl Eip712AbiEncoder {
	pub fn new() -> Self {
		Self { buf: Vec::new() }
	}

	pub fn push_b256(&mut self, v: &B256) {
		self.buf.extend_from_slice(v.as_slice());
	}

	pub fn push_address(&mut self, addr: &Address) {
		let mut word = [0u8; 32];
		word[12..].copy_from_slice(addr.as_slice());
		self.buf.extend_from_slice(&word);
	}

	pub fn push_u256(&mut self, v: U256) {
		let word: [u8; 32] = v.to_be_bytes::<32>();
		self.buf.extend_from_slice(&word);
	}

	/// Hash a variable-length `bytes` value and push the hash word.
	pub fn push_bytes_hashed(&mut self, data: &[u8]) {
		self.push_b256(&keccak256(data));
	}

	pub fn finish(self) -> Vec<u8> {
		self.buf
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_address_is_left_padded() {
		let addr = Address::repeat_byte(0xab);
		let mut enc = Eip712AbiEncoder::new();
		enc.push_address(&addr);
		let buf = enc.finish();

		assert_eq!(buf.len(), 32);
		assert!(buf[..12].iter().all(|&b| b == 0));
		assert_eq!(&buf[12..], addr.as_slice());
	}

	#[test]
	fn test_u256_is_big_endian_word() {
		let mut enc = Eip712AbiEncoder::new();
		enc.push_u256(U256::from(0x0102u64));
		let buf = enc.finish();

		assert_eq!(buf.len(), 32);
		assert_eq!(buf[30], 0x01);
		assert_eq!(buf[31], 0x02);
		assert!(buf[..30].iter().all(|&b| b == 0));
	}

	#[test]
	fn test_words_are_concatenated_in_push_order() {
		let mut enc = Eip712AbiEncoder::new();
		enc.push_u256(U256::from(1));
		enc.push_u256(U256::from(2));
		let buf = enc.finish();

		assert_eq!(buf.len(), 64);
		assert_eq!(buf[31], 1);
		assert_eq!(buf[63], 2);
	}

	#[test]
	fn test_final_digest_binds_both_hashes() {
		let domain_a = keccak256(b"domain-a");
		let domain_b = keccak256(b"domain-b");
		let payload = keccak256(b"payload");

		let digest_a = compute_final_digest(&domain_a, &payload);
		let digest_b = compute_final_digest(&domain_b, &payload);
		assert_ne!(digest_a, digest_b);

		// Same inputs reproduce the same digest.
		assert_eq!(digest_a, compute_final_digest(&domain_a, &payload));
	}

	#[test]
	fn test_bytes_are_hashed_not_embedded() {
		let mut enc = Eip712AbiEncoder::new();
		enc.push_bytes_hashed(&[0u8; 100]);
		let buf = enc.finish();

		// A 100-byte payload still contributes exactly one word.
		assert_eq!(buf.len(), 32);
		assert_eq!(&buf[..], keccak256([0u8; 100]).as_slice());
	}
}
