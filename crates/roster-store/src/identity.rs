// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity store interface.

use std::collections::BTreeMap;

use async_trait::async_trait;
use roster_core::{SecretString, UserId};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Input for creating a credential record. The password is write-only
/// and never appears on [`CredentialRecord`].
#[derive(Debug, Clone)]
pub struct NewCredential {
	pub email: String,
	pub password: SecretString,
	pub display_name: String,
	/// Absent when the caller supplied no phone number.
	pub phone_number: Option<String>,
}

/// A credential record as the identity store reports it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
	pub id: UserId,
	pub email: String,
	pub display_name: String,
	pub phone_number: Option<String>,
}

/// Authorization claims attached to a credential record, consumable
/// by downstream authorization checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(BTreeMap<String, String>);

impl ClaimSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// A claim set carrying only a role label.
	pub fn role(role: impl Into<String>) -> Self {
		Self::new().with("role", role)
	}

	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.0.insert(key.into(), value.into());
		self
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// External managed service owning credential records and
/// authentication. Implementations are given to the provisioning
/// service as explicit handles.
#[async_trait]
pub trait IdentityStore: Send + Sync {
	/// Create a credential record. The store assigns the id and
	/// enforces email uniqueness.
	async fn create_user(&self, new: &NewCredential) -> Result<CredentialRecord>;

	/// Delete the credential record with the given id.
	/// Returns [`crate::StoreError::UserNotFound`] when it is absent.
	async fn delete_user(&self, id: &UserId) -> Result<()>;

	/// Replace the custom claims on a credential record.
	async fn set_custom_claims(&self, id: &UserId, claims: &ClaimSet) -> Result<()>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn role_claim_set() {
		let claims = ClaimSet::role("staff");
		assert_eq!(claims.get("role"), Some("staff"));
		assert_eq!(claims.get("other"), None);
	}

	#[test]
	fn claim_set_serializes_as_plain_map() {
		let claims = ClaimSet::role("staff");
		let json = serde_json::to_string(&claims).unwrap();
		assert_eq!(json, r#"{"role":"staff"}"#);
	}
}
