// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Profile document written to the `users` collection.

use crate::document::{Document, FieldValue};
use crate::request::ProvisionUserRequest;
use crate::types::UserId;

/// Name of the collection holding profile documents.
pub const USERS_COLLECTION: &str = "users";

/// Profile record persisted to the document store, keyed by the
/// credential's id. Carries a redundant copy of the id so downstream
/// readers of the document alone can reference the credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
	pub name: String,
	pub email: String,
	/// Empty string when the caller supplied no phone number.
	pub phone_number: String,
	pub department: String,
	pub role: String,
	pub uid: UserId,
}

impl Profile {
	/// Build the profile for a freshly created credential.
	pub fn from_request(request: &ProvisionUserRequest, uid: UserId) -> Self {
		Self {
			name: request.name.clone(),
			email: request.email.clone(),
			phone_number: request
				.phone_number_normalized()
				.unwrap_or_default()
				.to_string(),
			department: request.department.clone(),
			role: request.role.clone(),
			uid,
		}
	}

	/// Document form, with the creation timestamp left as a
	/// server-assigned sentinel.
	pub fn into_document(self) -> Document {
		Document::new()
			.set("name", self.name)
			.set("email", self.email)
			.set("phoneNumber", self.phone_number)
			.set("department", self.department)
			.set("role", self.role)
			.set("createdAt", FieldValue::ServerTimestamp)
			.set("uid", self.uid.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn request() -> ProvisionUserRequest {
		ProvisionUserRequest {
			name: "A".to_string(),
			email: "a@b.com".to_string(),
			department: "X".to_string(),
			role: "staff".to_string(),
			..Default::default()
		}
	}

	#[test]
	fn absent_phone_defaults_to_empty_string() {
		let profile = Profile::from_request(&request(), UserId::generate());
		assert_eq!(profile.phone_number, "");
	}

	#[test]
	fn document_carries_all_fields_and_sentinel() {
		let uid = UserId::generate();
		let doc = Profile::from_request(&request(), uid).into_document();

		assert_eq!(doc.get_str("name"), Some("A"));
		assert_eq!(doc.get_str("email"), Some("a@b.com"));
		assert_eq!(doc.get_str("phoneNumber"), Some(""));
		assert_eq!(doc.get_str("department"), Some("X"));
		assert_eq!(doc.get_str("role"), Some("staff"));
		assert_eq!(doc.get_str("uid"), Some(uid.to_string().as_str()));
		assert_eq!(doc.get("createdAt"), Some(&FieldValue::ServerTimestamp));
	}
}
