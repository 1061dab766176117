// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The provisioning and deprovisioning handlers.

use std::sync::Arc;

use roster_core::profile::USERS_COLLECTION;
use roster_core::{validate_request, Profile, ProvisionOutcome, ProvisionUserRequest, UserId};
use roster_store::{ClaimSet, DocumentStore, IdentityStore, NewCredential, StoreError};
use tracing::{error, info, instrument, warn};

use crate::caller::Caller;
use crate::error::{creation_failure_message, ProvisionError};
use crate::hook::{LogOnlyReconciliation, ProvisionStage, ReconciliationHook};

/// Stateless pair of account lifecycle operations over injected store
/// handles. One invocation per request; no shared mutable state, so
/// any number of invocations may run concurrently. Correctness under
/// races rests on the identity store's duplicate-email detection and
/// the document store's write-by-id idempotency.
pub struct ProvisioningService {
	identity: Arc<dyn IdentityStore>,
	documents: Arc<dyn DocumentStore>,
	reconciliation: Arc<dyn ReconciliationHook>,
}

impl ProvisioningService {
	pub fn new(identity: Arc<dyn IdentityStore>, documents: Arc<dyn DocumentStore>) -> Self {
		Self {
			identity,
			documents,
			reconciliation: Arc::new(LogOnlyReconciliation),
		}
	}

	/// Replace the default log-only reconciliation hook.
	pub fn with_reconciliation_hook(mut self, hook: Arc<dyn ReconciliationHook>) -> Self {
		self.reconciliation = hook;
		self
	}

	/// Create a credential record, write the matching profile
	/// document, and attach the role claim.
	///
	/// The three effect steps run sequentially with no rollback; on a
	/// mid-sequence failure the reconciliation hook is told about the
	/// orphaned credential and the error is surfaced to the caller.
	#[instrument(skip(self, caller, request), fields(email = %request.email))]
	pub async fn provision_user(
		&self,
		caller: &Caller,
		request: &ProvisionUserRequest,
	) -> Result<ProvisionOutcome, ProvisionError> {
		if !caller.is_authenticated() {
			warn!("provisioning call rejected: unauthenticated caller");
			return Err(ProvisionError::Unauthenticated);
		}

		validate_request(request)?;

		let new = NewCredential {
			email: request.email.clone(),
			password: request.password.clone(),
			display_name: request.name.clone(),
			phone_number: request.phone_number_normalized().map(str::to_string),
		};

		let record = match self.identity.create_user(&new).await {
			Ok(record) => record,
			Err(e) => {
				error!(error = %e, "credential creation failed");
				return Err(ProvisionError::Internal(creation_failure_message(&e)));
			}
		};

		let document = Profile::from_request(request, record.id).into_document();
		if let Err(e) = self
			.documents
			.set_document(USERS_COLLECTION, &record.id, &document)
			.await
		{
			error!(uid = %record.id, error = %e, "profile write failed after credential creation");
			self
				.reconciliation
				.on_partial_provision(record.id, ProvisionStage::ProfileWrite, &e)
				.await;
			return Err(ProvisionError::Internal(creation_failure_message(&e)));
		}

		if let Err(e) = self
			.identity
			.set_custom_claims(&record.id, &ClaimSet::role(request.role.clone()))
			.await
		{
			error!(uid = %record.id, error = %e, "role claim attachment failed");
			self
				.reconciliation
				.on_partial_provision(record.id, ProvisionStage::ClaimAttach, &e)
				.await;
			return Err(ProvisionError::Internal(creation_failure_message(&e)));
		}

		info!(uid = %record.id, email = %record.email, "provisioned user");
		Ok(ProvisionOutcome::created())
	}

	/// React to deletion of the profile document keyed by `uid`:
	/// delete the matching credential record.
	///
	/// An already-absent credential is a designed no-op, expected when
	/// the credential was deleted through another path first.
	#[instrument(skip(self))]
	pub async fn deprovision_user(&self, uid: UserId) -> Result<(), ProvisionError> {
		match self.identity.delete_user(&uid).await {
			Ok(()) => {
				info!(uid = %uid, "deleted credential for removed profile");
				Ok(())
			}
			Err(StoreError::UserNotFound) => {
				warn!(uid = %uid, "credential already absent; nothing to delete");
				Ok(())
			}
			Err(e) => {
				error!(uid = %uid, error = %e, "credential deletion failed");
				Err(ProvisionError::Internal(format!(
					"Failed to delete the credential record: {e}"
				)))
			}
		}
	}
}
