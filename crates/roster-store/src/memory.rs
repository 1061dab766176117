// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-process store implementations.
//!
//! These back the server's `memory` backend mode for local
//! development and are the substrate for the provisioning tests. They
//! reproduce the behavior the workflow depends on from the managed
//! platform: store-assigned ids, duplicate-email detection, the
//! platform's own weak-password floor, and write-by-id idempotency
//! with server-resolved timestamps.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use roster_core::{Document, UserId};
use tracing::debug;

use crate::documents::DocumentStore;
use crate::error::{Result, StoreError};
use crate::identity::{ClaimSet, CredentialRecord, IdentityStore, NewCredential};

/// Password floor the managed platform enforces on its side,
/// independent of the request validation in front of it.
const PLATFORM_MIN_PASSWORD_LEN: usize = 6;

struct StoredCredential {
	record: CredentialRecord,
	claims: ClaimSet,
}

/// In-memory identity store. Credentials are keyed by id; emails are
/// unique after trimming and lowercasing. Passwords are not retained.
#[derive(Default)]
pub struct MemoryIdentityStore {
	users: RwLock<HashMap<UserId, StoredCredential>>,
	fail_claims: AtomicBool,
}

impl MemoryIdentityStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Test hook: make the next claim writes fail as unavailable.
	pub fn set_fail_claims(&self, fail: bool) {
		self.fail_claims.store(fail, Ordering::SeqCst);
	}

	pub fn user_count(&self) -> usize {
		self.users.read().expect("identity store lock poisoned").len()
	}

	pub fn get(&self, id: &UserId) -> Option<CredentialRecord> {
		self
			.users
			.read()
			.expect("identity store lock poisoned")
			.get(id)
			.map(|stored| stored.record.clone())
	}

	pub fn claims(&self, id: &UserId) -> Option<ClaimSet> {
		self
			.users
			.read()
			.expect("identity store lock poisoned")
			.get(id)
			.map(|stored| stored.claims.clone())
	}

	pub fn find_by_email(&self, email: &str) -> Option<CredentialRecord> {
		let needle = normalize_email(email);
		self
			.users
			.read()
			.expect("identity store lock poisoned")
			.values()
			.find(|stored| normalize_email(&stored.record.email) == needle)
			.map(|stored| stored.record.clone())
	}
}

fn normalize_email(email: &str) -> String {
	email.trim().to_lowercase()
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
	async fn create_user(&self, new: &NewCredential) -> Result<CredentialRecord> {
		if new.password.char_count() < PLATFORM_MIN_PASSWORD_LEN {
			return Err(StoreError::WeakPassword);
		}

		let mut users = self.users.write().expect("identity store lock poisoned");

		let needle = normalize_email(&new.email);
		if users
			.values()
			.any(|stored| normalize_email(&stored.record.email) == needle)
		{
			return Err(StoreError::EmailAlreadyExists);
		}

		let record = CredentialRecord {
			id: UserId::generate(),
			email: new.email.clone(),
			display_name: new.display_name.clone(),
			phone_number: new.phone_number.clone(),
		};
		users.insert(
			record.id,
			StoredCredential {
				record: record.clone(),
				claims: ClaimSet::new(),
			},
		);

		debug!(uid = %record.id, "memory identity store: created credential");
		Ok(record)
	}

	async fn delete_user(&self, id: &UserId) -> Result<()> {
		let mut users = self.users.write().expect("identity store lock poisoned");
		match users.remove(id) {
			Some(_) => Ok(()),
			None => Err(StoreError::UserNotFound),
		}
	}

	async fn set_custom_claims(&self, id: &UserId, claims: &ClaimSet) -> Result<()> {
		if self.fail_claims.load(Ordering::SeqCst) {
			return Err(StoreError::Unavailable(
				"claims endpoint unavailable".to_string(),
			));
		}

		let mut users = self.users.write().expect("identity store lock poisoned");
		match users.get_mut(id) {
			Some(stored) => {
				stored.claims = claims.clone();
				Ok(())
			}
			None => Err(StoreError::UserNotFound),
		}
	}
}

/// In-memory document store keyed by collection and document id.
#[derive(Default)]
pub struct MemoryDocumentStore {
	documents: RwLock<HashMap<(String, UserId), Document>>,
	fail_writes: AtomicBool,
}

impl MemoryDocumentStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Test hook: make subsequent writes fail as unavailable, for
	/// exercising the partial-provision path.
	pub fn set_fail_writes(&self, fail: bool) {
		self.fail_writes.store(fail, Ordering::SeqCst);
	}

	pub fn document_count(&self) -> usize {
		self
			.documents
			.read()
			.expect("document store lock poisoned")
			.len()
	}

	pub fn get(&self, collection: &str, id: &UserId) -> Option<Document> {
		self
			.documents
			.read()
			.expect("document store lock poisoned")
			.get(&(collection.to_string(), *id))
			.cloned()
	}

	/// Remove a document, as an external actor would. Returns whether
	/// a document existed under that key.
	pub fn delete(&self, collection: &str, id: &UserId) -> bool {
		self
			.documents
			.write()
			.expect("document store lock poisoned")
			.remove(&(collection.to_string(), *id))
			.is_some()
	}
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
	async fn set_document(&self, collection: &str, id: &UserId, doc: &Document) -> Result<()> {
		if self.fail_writes.load(Ordering::SeqCst) {
			return Err(StoreError::Unavailable(
				"document store unavailable".to_string(),
			));
		}

		let resolved = doc.clone().resolve_server_timestamps(Utc::now());
		self
			.documents
			.write()
			.expect("document store lock poisoned")
			.insert((collection.to_string(), *id), resolved);
		Ok(())
	}
}
