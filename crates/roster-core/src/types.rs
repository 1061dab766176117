// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identifier newtypes.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a provisioned user.
///
/// Assigned by the identity store when the credential record is
/// created. The profile document in the document store is keyed by
/// the same value, which is what lets the deprovisioning trigger map
/// a deleted profile back to its credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
	/// Create an ID from a UUID.
	pub fn new(id: Uuid) -> Self {
		Self(id)
	}

	/// Generate a new random ID.
	pub fn generate() -> Self {
		Self(Uuid::new_v4())
	}

	/// Parse an ID from its string form.
	pub fn parse(s: &str) -> Result<Self, uuid::Error> {
		Uuid::parse_str(s).map(Self)
	}

	/// Get the inner UUID value.
	pub fn into_inner(self) -> Uuid {
		self.0
	}

	/// Get a reference to the inner UUID.
	pub fn as_uuid(&self) -> &Uuid {
		&self.0
	}
}

impl fmt::Display for UserId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<Uuid> for UserId {
	fn from(id: Uuid) -> Self {
		Self(id)
	}
}

impl From<UserId> for Uuid {
	fn from(id: UserId) -> Self {
		id.0
	}
}
