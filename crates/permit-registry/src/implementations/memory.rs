//! In-memory asset registries for the permit relay.
//!
//! These implementations keep balances and ownership in process memory,
//! enforce the same preconditions a real registry would (sufficient
//! balance, current ownership), and record every completed transfer in
//! an inspectable event log. They back the relay's end-to-end tests and
//! local development setups where no chain is available.

use crate::{
	FungibleRegistryInterface, NonFungibleRegistryInterface, RegistryError,
	SemiFungibleRegistryInterface,
};
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use permit_types::{ConfigSchema, Schema, ValidationError};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Record of a completed fungible transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FungibleTransferEvent {
	pub from: Address,
	pub to: Address,
	pub amount: U256,
}

/// Record of a completed non-fungible transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonFungibleTransferEvent {
	pub from: Address,
	pub to: Address,
	pub token_id: U256,
}

/// Record of a completed semi-fungible transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemiFungibleTransferEvent {
	pub from: Address,
	pub to: Address,
	pub token_id: U256,
	pub amount: U256,
}

/// Mutable state of a fungible registry.
struct FungibleState {
	balances: HashMap<Address, U256>,
	events: Vec<FungibleTransferEvent>,
}

/// In-memory fungible asset registry.
///
/// Clones share the same underlying state, so tests can keep a handle
/// for assertions while the routing service owns another.
#[derive(Clone)]
pub struct MemoryFungibleRegistry {
	state: Arc<RwLock<FungibleState>>,
}

impl MemoryFungibleRegistry {
	/// Creates a registry with no balances.
	pub fn new() -> Self {
		Self {
			state: Arc::new(RwLock::new(FungibleState {
				balances: HashMap::new(),
				events: Vec::new(),
			})),
		}
	}

	/// Credits `amount` to `to`.
	pub async fn mint(&self, to: Address, amount: U256) {
		let mut state = self.state.write().await;
		let balance = state.balances.entry(to).or_insert(U256::ZERO);
		*balance += amount;
	}

	/// Current balance of `holder`, zero if never credited.
	pub async fn balance_of(&self, holder: Address) -> U256 {
		let state = self.state.read().await;
		state.balances.get(&holder).copied().unwrap_or(U256::ZERO)
	}

	/// All transfers completed so far, oldest first.
	pub async fn events(&self) -> Vec<FungibleTransferEvent> {
		self.state.read().await.events.clone()
	}
}

impl Default for MemoryFungibleRegistry {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl FungibleRegistryInterface for MemoryFungibleRegistry {
	async fn transfer_from(
		&self,
		holder: Address,
		to: Address,
		amount: U256,
	) -> Result<(), RegistryError> {
		let mut state = self.state.write().await;

		let available = state.balances.get(&holder).copied().unwrap_or(U256::ZERO);
		if available < amount {
			return Err(RegistryError::InsufficientBalance {
				holder,
				available,
				required: amount,
			});
		}

		state.balances.insert(holder, available - amount);
		let recipient = state.balances.entry(to).or_insert(U256::ZERO);
		*recipient += amount;
		state.events.push(FungibleTransferEvent {
			from: holder,
			to,
			amount,
		});
		Ok(())
	}
}

/// Mutable state of a non-fungible registry.
struct NonFungibleState {
	owners: HashMap<U256, Address>,
	events: Vec<NonFungibleTransferEvent>,
}

/// In-memory non-fungible asset registry.
#[derive(Clone)]
pub struct MemoryNonFungibleRegistry {
	state: Arc<RwLock<NonFungibleState>>,
}

impl MemoryNonFungibleRegistry {
	/// Creates a registry with no tokens.
	pub fn new() -> Self {
		Self {
			state: Arc::new(RwLock::new(NonFungibleState {
				owners: HashMap::new(),
				events: Vec::new(),
			})),
		}
	}

	/// Assigns ownership of `token_id` to `to`.
	pub async fn mint(&self, to: Address, token_id: U256) {
		let mut state = self.state.write().await;
		state.owners.insert(token_id, to);
	}

	/// Current owner of `token_id`, if it exists.
	pub async fn owner_of(&self, token_id: U256) -> Option<Address> {
		self.state.read().await.owners.get(&token_id).copied()
	}

	/// All transfers completed so far, oldest first.
	pub async fn events(&self) -> Vec<NonFungibleTransferEvent> {
		self.state.read().await.events.clone()
	}
}

impl Default for MemoryNonFungibleRegistry {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl NonFungibleRegistryInterface for MemoryNonFungibleRegistry {
	async fn transfer_from(
		&self,
		holder: Address,
		to: Address,
		token_id: U256,
	) -> Result<(), RegistryError> {
		let mut state = self.state.write().await;

		// An unminted token has no owner, which also lands here.
		if state.owners.get(&token_id).copied() != Some(holder) {
			return Err(RegistryError::NotOwner { holder, token_id });
		}

		state.owners.insert(token_id, to);
		state.events.push(NonFungibleTransferEvent {
			from: holder,
			to,
			token_id,
		});
		Ok(())
	}
}

/// Mutable state of a semi-fungible registry.
struct SemiFungibleState {
	balances: HashMap<(U256, Address), U256>,
	events: Vec<SemiFungibleTransferEvent>,
}

/// In-memory semi-fungible asset registry.
#[derive(Clone)]
pub struct MemorySemiFungibleRegistry {
	state: Arc<RwLock<SemiFungibleState>>,
}

impl MemorySemiFungibleRegistry {
	/// Creates a registry with no balances.
	pub fn new() -> Self {
		Self {
			state: Arc::new(RwLock::new(SemiFungibleState {
				balances: HashMap::new(),
				events: Vec::new(),
			})),
		}
	}

	/// Credits `amount` of token class `token_id` to `to`.
	pub async fn mint(&self, to: Address, token_id: U256, amount: U256) {
		let mut state = self.state.write().await;
		let balance = state.balances.entry((token_id, to)).or_insert(U256::ZERO);
		*balance += amount;
	}

	/// Current balance of `holder` in token class `token_id`.
	pub async fn balance_of(&self, holder: Address, token_id: U256) -> U256 {
		let state = self.state.read().await;
		state
			.balances
			.get(&(token_id, holder))
			.copied()
			.unwrap_or(U256::ZERO)
	}

	/// All transfers completed so far, oldest first.
	pub async fn events(&self) -> Vec<SemiFungibleTransferEvent> {
		self.state.read().await.events.clone()
	}
}

impl Default for MemorySemiFungibleRegistry {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl SemiFungibleRegistryInterface for MemorySemiFungibleRegistry {
	async fn safe_transfer_from(
		&self,
		holder: Address,
		to: Address,
		token_id: U256,
		amount: U256,
		_data: &[u8],
	) -> Result<(), RegistryError> {
		let mut state = self.state.write().await;

		let available = state
			.balances
			.get(&(token_id, holder))
			.copied()
			.unwrap_or(U256::ZERO);
		if available < amount {
			return Err(RegistryError::InsufficientBalance {
				holder,
				available,
				required: amount,
			});
		}

		state.balances.insert((token_id, holder), available - amount);
		let recipient = state.balances.entry((token_id, to)).or_insert(U256::ZERO);
		*recipient += amount;
		state.events.push(SemiFungibleTransferEvent {
			from: holder,
			to,
			token_id,
			amount,
		});
		Ok(())
	}
}

/// Configuration schema for the memory registries.
pub struct MemoryRegistrySchema;

impl ConfigSchema for MemoryRegistrySchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		// Memory registries have no required configuration
		let schema = Schema::new(vec![], vec![]);
		schema.validate(config)
	}
}

/// Factory function to create a fungible memory registry from configuration.
///
/// Configuration parameters:
/// - None required for memory registries
pub fn create_fungible_registry(
	config: &toml::Value,
) -> Result<MemoryFungibleRegistry, ValidationError> {
	MemoryRegistrySchema.validate(config)?;
	Ok(MemoryFungibleRegistry::new())
}

/// Factory function to create a non-fungible memory registry from configuration.
pub fn create_non_fungible_registry(
	config: &toml::Value,
) -> Result<MemoryNonFungibleRegistry, ValidationError> {
	MemoryRegistrySchema.validate(config)?;
	Ok(MemoryNonFungibleRegistry::new())
}

/// Factory function to create a semi-fungible memory registry from configuration.
pub fn create_semi_fungible_registry(
	config: &toml::Value,
) -> Result<MemorySemiFungibleRegistry, ValidationError> {
	MemoryRegistrySchema.validate(config)?;
	Ok(MemorySemiFungibleRegistry::new())
}
