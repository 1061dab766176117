// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Store interfaces consumed by the provisioning workflow.
//!
//! The identity store and the document store are external managed
//! services; this crate defines them as traits so the provisioning
//! service receives explicit handles instead of reaching for ambient
//! global clients. Backend error taxonomies are translated into the
//! stable [`StoreError`] kinds at the implementation edge; nothing
//! above the traits inspects platform error strings.
//!
//! Two implementations ship here:
//! - [`memory`]: in-process stores for local development and tests
//! - [`rest`]: reqwest clients for a managed platform's admin API

pub mod documents;
pub mod error;
pub mod identity;
pub mod memory;
pub mod rest;

pub use documents::DocumentStore;
pub use error::{Result, StoreError};
pub use identity::{ClaimSet, CredentialRecord, IdentityStore, NewCredential};
pub use memory::{MemoryDocumentStore, MemoryIdentityStore};
pub use rest::{RestDocumentStore, RestIdentityStore, RestStoreConfig};
