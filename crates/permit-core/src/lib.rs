//! Authorization core of the permit relay system.
//!
//! This module verifies holder-signed permits submitted by relayers and,
//! on success, drives the matching external transfer primitive. One
//! operation per asset kind, all sharing the same pipeline: check the
//! deadline, reconstruct the domain-separated digest, recover the
//! signer, match it against the claimed holder, consume the holder's
//! nonce, then transfer. The nonce is consumed strictly before the
//! transfer call and is never returned on failure, so a spent
//! authorization cannot be retried against a different transfer outcome.

use alloy_primitives::{Address, U256};
use permit_account::RecoveryService;
use permit_registry::{RegistryError, RegistryService};
use permit_types::{
	with_0x_prefix, DomainContext, FungibleTransfer, NonFungibleTransfer, Permit,
	SemiFungibleTransfer, Signature,
};
use std::sync::Arc;
use thiserror::Error;

pub mod nonce;

pub use nonce::NonceLedger;

/// Errors that can occur during permit verification and execution.
///
/// All are terminal for the current call; a caller may construct a fresh
/// permit (with the holder's next nonce) and try again.
#[derive(Debug, Error)]
pub enum PermitError {
	/// Error that occurs when the permit's deadline has passed.
	#[error("Permit expired: deadline {deadline} is before current time {now}")]
	Expired { deadline: U256, now: U256 },
	/// Error that occurs when the signature is malformed or yields no identity.
	#[error("Invalid signature: {0}")]
	InvalidSignature(String),
	/// Error that occurs when the recovered signer is not the claimed holder.
	#[error("Signer mismatch: recovered {recovered}, expected {expected}")]
	SignerMismatch {
		expected: Address,
		recovered: Address,
	},
	/// Error that occurs when the permit's nonce is not the holder's next
	/// expected value, whether spent, skipped, or out of order.
	#[error("Nonce mismatch for {holder}: expected {expected}, got {provided}")]
	NonceMismatch {
		holder: Address,
		expected: U256,
		provided: U256,
	},
	/// Error that occurs when the external transfer primitive rejects the
	/// transfer. The permit's nonce stays consumed.
	#[error("Transfer failed: {0}")]
	TransferFailed(#[from] RegistryError),
}

/// Service that verifies permits and executes the authorized transfers.
///
/// Holds the deployment's signing domain, the recovery boundary, the
/// registry router, and the nonce ledger (the only mutable state).
pub struct PermitService {
	/// Signing domain all permits of this instance are scoped to.
	domain: DomainContext,
	/// Signature recovery boundary.
	recovery: Arc<RecoveryService>,
	/// Router to the external asset registries.
	registries: Arc<RegistryService>,
	/// Per-holder nonce counters.
	nonces: NonceLedger,
}

impl PermitService {
	/// Creates a new PermitService for the given domain.
	pub fn new(
		domain: DomainContext,
		recovery: Arc<RecoveryService>,
		registries: Arc<RegistryService>,
	) -> Self {
		Self {
			domain,
			recovery,
			registries,
			nonces: NonceLedger::new(),
		}
	}

	/// The signing domain of this relay instance.
	///
	/// Off-core signers combine this with the canonical type strings to
	/// produce verifiable permits.
	pub fn domain(&self) -> &DomainContext {
		&self.domain
	}

	/// The next nonce expected from `holder`; zero for unseen holders.
	pub async fn current_nonce(&self, holder: Address) -> U256 {
		self.nonces.current(holder).await
	}

	/// Executes a fungible transfer pre-authorized by `holder`.
	///
	/// Verifies the permit assembled from the given fields against
	/// `signature`, consumes the holder's nonce, then calls
	/// `transfer_from(holder, to, amount)` on the registry.
	pub async fn transfer_fungible_with_signature(
		&self,
		registry: Address,
		holder: Address,
		to: Address,
		amount: U256,
		nonce: U256,
		deadline: U256,
		signature: &Signature,
	) -> Result<(), PermitError> {
		let permit = Permit::Fungible(FungibleTransfer {
			registry,
			to,
			amount,
			nonce,
			deadline,
		});
		self.authorize(&permit, Some(holder), signature).await?;

		self.registries
			.transfer_fungible(registry, holder, to, amount)
			.await?;

		tracing::info!(
			"Fungible transfer of {} from {} to {} via registry {}",
			amount,
			holder,
			to,
			registry
		);
		Ok(())
	}

	/// Executes a non-fungible transfer pre-authorized by its signer.
	///
	/// Takes no holder parameter: the recovered signer is the holder, and
	/// actual ownership of `token_id` is enforced by the registry.
	pub async fn transfer_non_fungible_with_signature(
		&self,
		registry: Address,
		token_id: U256,
		to: Address,
		nonce: U256,
		deadline: U256,
		signature: &Signature,
	) -> Result<(), PermitError> {
		let permit = Permit::NonFungible(NonFungibleTransfer {
			registry,
			token_id,
			to,
			nonce,
			deadline,
		});
		let holder = self.authorize(&permit, None, signature).await?;

		self.registries
			.transfer_non_fungible(registry, holder, to, token_id)
			.await?;

		tracing::info!(
			"Non-fungible transfer of token {} from {} to {} via registry {}",
			token_id,
			holder,
			to,
			registry
		);
		Ok(())
	}

	/// Executes a semi-fungible transfer pre-authorized by `holder`.
	pub async fn transfer_semi_fungible_with_signature(
		&self,
		registry: Address,
		token_id: U256,
		holder: Address,
		to: Address,
		amount: U256,
		nonce: U256,
		deadline: U256,
		data: &[u8],
		signature: &Signature,
	) -> Result<(), PermitError> {
		let permit = Permit::SemiFungible(SemiFungibleTransfer {
			registry,
			token_id,
			to,
			amount,
			nonce,
			deadline,
			data: data.to_vec(),
		});
		self.authorize(&permit, Some(holder), signature).await?;

		self.registries
			.transfer_semi_fungible(registry, holder, to, token_id, amount, data)
			.await?;

		tracing::info!(
			"Semi-fungible transfer of {} of token {} from {} to {} via registry {}",
			amount,
			token_id,
			holder,
			to,
			registry
		);
		Ok(())
	}

	/// Shared verification pipeline; returns the holder on success.
	///
	/// With `claimed_holder` set, the recovered signer must equal it; with
	/// `None` the recovered signer itself is the holder. The holder's
	/// nonce is consumed here, before any registry call, and is not
	/// returned if the caller's transfer subsequently fails.
	async fn authorize(
		&self,
		permit: &Permit,
		claimed_holder: Option<Address>,
		signature: &Signature,
	) -> Result<Address, PermitError> {
		let now = U256::from(permit_types::current_timestamp());
		if permit.deadline() < now {
			tracing::warn!("Rejected expired permit (deadline {})", permit.deadline());
			return Err(PermitError::Expired {
				deadline: permit.deadline(),
				now,
			});
		}

		let digest = permit.signing_digest(&self.domain);
		let recovered = self
			.recovery
			.recover_signer(&digest, signature)
			.await
			.map_err(|e| {
				tracing::warn!(
					"Signature rejected for digest {}: {}",
					with_0x_prefix(&hex::encode(digest)),
					e
				);
				PermitError::InvalidSignature(e.to_string())
			})?;
		if recovered == Address::ZERO {
			return Err(PermitError::InvalidSignature(
				"recovered the zero identity".to_string(),
			));
		}

		let holder = match claimed_holder {
			Some(expected) if expected != recovered => {
				tracing::warn!(
					"Signer mismatch: permit claims {}, signature resolves to {}",
					expected,
					recovered
				);
				return Err(PermitError::SignerMismatch {
					expected,
					recovered,
				});
			},
			Some(expected) => expected,
			None => recovered,
		};

		self.nonces.consume(holder, permit.nonce()).await?;
		Ok(holder)
	}
}
