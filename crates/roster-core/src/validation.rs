// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ordered validation of provisioning requests.

use regex::Regex;
use std::sync::LazyLock;

use crate::request::ProvisionUserRequest;

/// Minimum password length accepted before the identity store is
/// consulted at all.
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Rejection reasons, in the order they are checked. The `Display`
/// text is the message the caller sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
	#[error("Required data (email, password, name, department, role) is missing.")]
	MissingField,
	#[error("Password must be at least 6 characters long.")]
	PasswordTooShort,
	#[error("Invalid email format.")]
	InvalidEmail,
}

/// Check whether an address has the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
	EMAIL_REGEX.is_match(email)
}

/// Validate a provisioning request. First failure wins; no further
/// checks run after a rejection.
pub fn validate_request(request: &ProvisionUserRequest) -> Result<(), ValidationError> {
	if request.email.is_empty()
		|| request.password.is_empty()
		|| request.name.is_empty()
		|| request.department.is_empty()
		|| request.role.is_empty()
	{
		return Err(ValidationError::MissingField);
	}
	if request.password.char_count() < MIN_PASSWORD_LEN {
		return Err(ValidationError::PasswordTooShort);
	}
	if !is_valid_email(&request.email) {
		return Err(ValidationError::InvalidEmail);
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn valid_request() -> ProvisionUserRequest {
		ProvisionUserRequest {
			name: "A".to_string(),
			email: "a@b.com".to_string(),
			password: "secret1".into(),
			phone_number: None,
			department: "X".to_string(),
			role: "staff".to_string(),
		}
	}

	#[test]
	fn accepts_valid_request() {
		assert_eq!(validate_request(&valid_request()), Ok(()));
	}

	#[test]
	fn rejects_each_missing_required_field() {
		for field in ["name", "email", "password", "department", "role"] {
			let mut req = valid_request();
			match field {
				"name" => req.name.clear(),
				"email" => req.email.clear(),
				"password" => req.password = "".into(),
				"department" => req.department.clear(),
				"role" => req.role.clear(),
				_ => unreachable!(),
			}
			assert_eq!(
				validate_request(&req),
				Err(ValidationError::MissingField),
				"field {field} should be required"
			);
		}
	}

	#[test]
	fn rejects_short_password() {
		let mut req = valid_request();
		req.password = "five5".into();
		assert_eq!(validate_request(&req), Err(ValidationError::PasswordTooShort));
	}

	#[test]
	fn six_character_password_is_enough() {
		let mut req = valid_request();
		req.password = "sixsix".into();
		assert_eq!(validate_request(&req), Ok(()));
	}

	#[test]
	fn missing_field_is_reported_before_short_password() {
		let mut req = valid_request();
		req.name.clear();
		req.password = "x".into();
		assert_eq!(validate_request(&req), Err(ValidationError::MissingField));
	}

	#[test]
	fn email_shape_checks() {
		assert!(is_valid_email("a@b.com"));
		assert!(is_valid_email("first.last@sub.example.org"));
		assert!(!is_valid_email("missing-at.example.com"));
		assert!(!is_valid_email("no-tld@example"));
		assert!(!is_valid_email("spaces in@local.part"));
		assert!(!is_valid_email("two@@at.com"));
		assert!(!is_valid_email("@example.com"));
	}

	#[test]
	fn rejects_malformed_email_with_distinct_error() {
		let mut req = valid_request();
		req.email = "not-an-email".to_string();
		assert_eq!(validate_request(&req), Err(ValidationError::InvalidEmail));
	}
}
