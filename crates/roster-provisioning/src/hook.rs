// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Extension point for the cross-store inconsistency window.

use async_trait::async_trait;
use roster_core::UserId;
use roster_store::StoreError;
use tracing::warn;

/// Effect step that failed after the credential already existed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionStage {
	ProfileWrite,
	ClaimAttach,
}

/// Invoked when provisioning leaves the two stores inconsistent: the
/// credential record exists but a later effect step failed. There is
/// deliberately no transaction or automatic rollback; implementations
/// may queue their own cleanup.
#[async_trait]
pub trait ReconciliationHook: Send + Sync {
	async fn on_partial_provision(&self, uid: UserId, stage: ProvisionStage, error: &StoreError);
}

/// Default hook: records the gap in the log and nothing else.
pub struct LogOnlyReconciliation;

#[async_trait]
impl ReconciliationHook for LogOnlyReconciliation {
	async fn on_partial_provision(&self, uid: UserId, stage: ProvisionStage, error: &StoreError) {
		warn!(
			uid = %uid,
			stage = ?stage,
			error = %error,
			"credential left without a complete profile; manual reconciliation required"
		);
	}
}
