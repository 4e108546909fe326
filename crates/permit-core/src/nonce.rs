//! Per-holder nonce ledger.
//!
//! One unbounded, strictly increasing counter per holder, starting at
//! zero and created lazily on first read. A nonce value authorizes
//! exactly one successful verification; `consume` performs the
//! read-check-increment as a single critical section, so two permits
//! carrying the same nonce can never both pass, whatever the
//! interleaving.

use crate::PermitError;
use alloy_primitives::{Address, U256};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// The relay's only persistent mutable state: per-holder nonce counters.
pub struct NonceLedger {
	/// Counters keyed by holder, absent until first touched.
	counters: Mutex<HashMap<Address, U256>>,
}

impl NonceLedger {
	/// Creates an empty ledger.
	pub fn new() -> Self {
		Self {
			counters: Mutex::new(HashMap::new()),
		}
	}

	/// The next nonce expected from `holder`; zero for unseen holders.
	pub async fn current(&self, holder: Address) -> U256 {
		let counters = self.counters.lock().await;
		counters.get(&holder).copied().unwrap_or(U256::ZERO)
	}

	/// Consumes `holder`'s current nonce if it equals `provided`.
	///
	/// Only the exact next expected value is accepted; a spent or skipped
	/// nonce fails with `NonceMismatch`. On success the counter is
	/// incremented before the lock is released, so no concurrent or
	/// reentrant caller can consume the same value again.
	pub async fn consume(&self, holder: Address, provided: U256) -> Result<(), PermitError> {
		let mut counters = self.counters.lock().await;
		let counter = counters.entry(holder).or_insert(U256::ZERO);

		if *counter != provided {
			return Err(PermitError::NonceMismatch {
				holder,
				expected: *counter,
				provided,
			});
		}

		*counter += U256::from(1);
		Ok(())
	}
}

impl Default for NonceLedger {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;

	#[tokio::test]
	async fn test_unseen_holder_starts_at_zero() {
		let ledger = NonceLedger::new();
		assert_eq!(ledger.current(Address::repeat_byte(0x01)).await, U256::ZERO);
	}

	#[tokio::test]
	async fn test_consume_advances_the_counter() {
		let ledger = NonceLedger::new();
		let holder = Address::repeat_byte(0x01);

		ledger.consume(holder, U256::ZERO).await.unwrap();
		ledger.consume(holder, U256::from(1)).await.unwrap();
		assert_eq!(ledger.current(holder).await, U256::from(2));
	}

	#[tokio::test]
	async fn test_spent_nonce_is_rejected() {
		let ledger = NonceLedger::new();
		let holder = Address::repeat_byte(0x01);

		ledger.consume(holder, U256::ZERO).await.unwrap();
		let result = ledger.consume(holder, U256::ZERO).await;
		assert!(matches!(
			result,
			Err(PermitError::NonceMismatch { expected, provided, .. })
				if expected == U256::from(1) && provided == U256::ZERO
		));
	}

	#[tokio::test]
	async fn test_skipped_nonce_is_rejected() {
		let ledger = NonceLedger::new();
		let result = ledger
			.consume(Address::repeat_byte(0x01), U256::from(5))
			.await;
		assert!(matches!(result, Err(PermitError::NonceMismatch { .. })));
	}

	#[tokio::test]
	async fn test_sequences_are_independent_per_holder() {
		let ledger = NonceLedger::new();
		let alice = Address::repeat_byte(0x01);
		let bob = Address::repeat_byte(0x02);

		ledger.consume(alice, U256::ZERO).await.unwrap();
		ledger.consume(alice, U256::from(1)).await.unwrap();
		ledger.consume(bob, U256::ZERO).await.unwrap();

		assert_eq!(ledger.current(alice).await, U256::from(2));
		assert_eq!(ledger.current(bob).await, U256::from(1));
	}

	#[tokio::test]
	async fn test_concurrent_consumers_cannot_share_a_nonce() {
		let ledger = Arc::new(NonceLedger::new());
		let holder = Address::repeat_byte(0x01);

		let a = tokio::spawn({
			let ledger = ledger.clone();
			async move { ledger.consume(holder, U256::ZERO).await }
		});
		let b = tokio::spawn({
			let ledger = ledger.clone();
			async move { ledger.consume(holder, U256::ZERO).await }
		});

		let (a, b) = (a.await.unwrap(), b.await.unwrap());
		assert!(a.is_ok() != b.is_ok(), "exactly one consumer may win");
		assert_eq!(ledger.current(holder).await, U256::from(1));
	}
}
