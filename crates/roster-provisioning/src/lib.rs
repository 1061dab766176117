// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Account lifecycle workflow: a pair of idempotent, fail-safe
//! administrative operations.
//!
//! [`ProvisioningService::provision_user`] validates a request,
//! creates the credential record, writes the profile document, and
//! attaches the role claim. [`ProvisioningService::deprovision_user`]
//! reacts to deletion of a profile document by deleting the matching
//! credential, treating an already-absent credential as success.
//!
//! The two effect stores are explicit injected handles, and the two
//! writes are not transactional: a credential can exist briefly (or,
//! on failure, indefinitely) without its profile. The
//! [`ReconciliationHook`] is the documented extension point for that
//! window; the default implementation only logs.

pub mod caller;
pub mod error;
pub mod hook;
pub mod service;

pub use caller::Caller;
pub use error::{ErrorCode, ProvisionError};
pub use hook::{LogOnlyReconciliation, ProvisionStage, ReconciliationHook};
pub use service::ProvisioningService;
