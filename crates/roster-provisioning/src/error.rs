// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Workflow errors and the store-failure message table.

use roster_core::ValidationError;
use roster_store::StoreError;

/// Message used when the backend gives us nothing better.
pub(crate) const DEFAULT_CREATE_ERROR: &str = "An error occurred while creating the user.";

/// Short error codes exposed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
	Unauthenticated,
	InvalidArgument,
	Internal,
}

impl ErrorCode {
	pub fn as_str(&self) -> &'static str {
		match self {
			ErrorCode::Unauthenticated => "unauthenticated",
			ErrorCode::InvalidArgument => "invalid-argument",
			ErrorCode::Internal => "internal",
		}
	}
}

/// Errors surfaced by the lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProvisionError {
	#[error("Authentication required. Only authenticated users can call this function.")]
	Unauthenticated,

	#[error("{0}")]
	InvalidArgument(#[from] ValidationError),

	/// Downstream platform failure, already mapped to a user-facing
	/// message.
	#[error("{0}")]
	Internal(String),
}

impl ProvisionError {
	pub fn code(&self) -> ErrorCode {
		match self {
			ProvisionError::Unauthenticated => ErrorCode::Unauthenticated,
			ProvisionError::InvalidArgument(_) => ErrorCode::InvalidArgument,
			ProvisionError::Internal(_) => ErrorCode::Internal,
		}
	}
}

/// User-facing message for a store failure during the effect phase.
///
/// Keyed by the stable [`StoreError`] kind rather than by backend
/// error text, so swapping the platform implementation cannot change
/// what callers see for the recognized cases.
pub(crate) fn creation_failure_message(err: &StoreError) -> String {
	match err {
		StoreError::EmailAlreadyExists => "This email is already registered.".to_string(),
		StoreError::WeakPassword => "The password is too weak.".to_string(),
		other => match other.platform_message() {
			Some(message) => message.to_string(),
			None => match other {
				// These kinds carry a meaningful message of their own.
				StoreError::UserNotFound | StoreError::InvalidPhoneNumber => other.to_string(),
				_ => DEFAULT_CREATE_ERROR.to_string(),
			},
		},
	}
}
