//! Asset registry module for the permit relay system.
//!
//! This module defines the relay's view of the external asset-transfer
//! primitives it drives after a permit verifies: one interface per asset
//! kind, and a routing service that dispatches a transfer to whichever
//! registry implementation is registered at the permit's registry
//! address. The relay acts as an approved operator on the holder's
//! behalf; balance, ownership, and approval rules live entirely on the
//! registry side.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod memory;
}

/// Errors that can occur during registry transfer operations.
#[derive(Debug, Error)]
pub enum RegistryError {
	/// Error that occurs when no registry is registered at an address.
	#[error("No registry known at {0}")]
	UnknownRegistry(Address),
	/// Error that occurs when the holder's balance cannot cover a transfer.
	#[error("Insufficient balance: {holder} holds {available}, transfer needs {required}")]
	InsufficientBalance {
		holder: Address,
		available: U256,
		required: U256,
	},
	/// Error that occurs when the holder does not own the token being moved.
	#[error("{holder} does not own token {token_id}")]
	NotOwner { holder: Address, token_id: U256 },
}

/// Trait defining the interface to a fungible asset registry.
#[async_trait]
pub trait FungibleRegistryInterface: Send + Sync {
	/// Moves `amount` of the registry's asset from `holder` to `to`.
	async fn transfer_from(
		&self,
		holder: Address,
		to: Address,
		amount: U256,
	) -> Result<(), RegistryError>;
}

/// Trait defining the interface to a non-fungible asset registry.
#[async_trait]
pub trait NonFungibleRegistryInterface: Send + Sync {
	/// Moves ownership of `token_id` from `holder` to `to`.
	///
	/// Implementations must reject the transfer when `holder` does not
	/// currently own `token_id`.
	async fn transfer_from(
		&self,
		holder: Address,
		to: Address,
		token_id: U256,
	) -> Result<(), RegistryError>;
}

/// Trait defining the interface to a semi-fungible asset registry.
#[async_trait]
pub trait SemiFungibleRegistryInterface: Send + Sync {
	/// Moves `amount` of token class `token_id` from `holder` to `to`,
	/// forwarding `data` to any receiver callback the registry invokes.
	async fn safe_transfer_from(
		&self,
		holder: Address,
		to: Address,
		token_id: U256,
		amount: U256,
		data: &[u8],
	) -> Result<(), RegistryError>;
}

/// Service that routes transfers to registered asset registries.
///
/// Holds one implementation map per asset kind, keyed by the registry
/// address carried in the permit. A permit naming an address with no
/// registered implementation fails with `UnknownRegistry`.
#[derive(Default)]
pub struct RegistryService {
	/// Fungible registries keyed by their address.
	fungible: HashMap<Address, Box<dyn FungibleRegistryInterface>>,
	/// Non-fungible registries keyed by their address.
	non_fungible: HashMap<Address, Box<dyn NonFungibleRegistryInterface>>,
	/// Semi-fungible registries keyed by their address.
	semi_fungible: HashMap<Address, Box<dyn SemiFungibleRegistryInterface>>,
}

impl RegistryService {
	/// Creates an empty registry service.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a fungible registry implementation at `address`.
	pub fn register_fungible(
		&mut self,
		address: Address,
		registry: Box<dyn FungibleRegistryInterface>,
	) {
		self.fungible.insert(address, registry);
	}

	/// Registers a non-fungible registry implementation at `address`.
	pub fn register_non_fungible(
		&mut self,
		address: Address,
		registry: Box<dyn NonFungibleRegistryInterface>,
	) {
		self.non_fungible.insert(address, registry);
	}

	/// Registers a semi-fungible registry implementation at `address`.
	pub fn register_semi_fungible(
		&mut self,
		address: Address,
		registry: Box<dyn SemiFungibleRegistryInterface>,
	) {
		self.semi_fungible.insert(address, registry);
	}

	/// Routes a fungible transfer to the registry at `registry`.
	pub async fn transfer_fungible(
		&self,
		registry: Address,
		holder: Address,
		to: Address,
		amount: U256,
	) -> Result<(), RegistryError> {
		let implementation = self
			.fungible
			.get(&registry)
			.ok_or(RegistryError::UnknownRegistry(registry))?;
		implementation.transfer_from(holder, to, amount).await
	}

	/// Routes a non-fungible transfer to the registry at `registry`.
	pub async fn transfer_non_fungible(
		&self,
		registry: Address,
		holder: Address,
		to: Address,
		token_id: U256,
	) -> Result<(), RegistryError> {
		let implementation = self
			.non_fungible
			.get(&registry)
			.ok_or(RegistryError::UnknownRegistry(registry))?;
		implementation.transfer_from(holder, to, token_id).await
	}

	/// Routes a semi-fungible transfer to the registry at `registry`.
	pub async fn transfer_semi_fungible(
		&self,
		registry: Address,
		holder: Address,
		to: Address,
		token_id: U256,
		amount: U256,
		data: &[u8],
	) -> Result<(), RegistryError> {
		let implementation = self
			.semi_fungible
			.get(&registry)
			.ok_or(RegistryError::UnknownRegistry(registry))?;
		implementation
			.safe_transfer_from(holder, to, token_id, amount, data)
			.await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_unregistered_address_is_unknown() {
		let service = RegistryService::new();
		let missing = Address::repeat_byte(0x99);

		let result = service
			.transfer_fungible(missing, Address::ZERO, Address::ZERO, U256::from(1))
			.await;
		assert!(matches!(
			result,
			Err(RegistryError::UnknownRegistry(a)) if a == missing
		));
	}
}
