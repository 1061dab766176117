// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Stable error taxonomy for store backends.

/// Errors surfaced by store implementations.
///
/// Backends map their own error codes into these kinds at the edge.
/// The provisioning layer keys its user-facing message table off this
/// enum, never off backend strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
	#[error("email already in use")]
	EmailAlreadyExists,

	#[error("password rejected as too weak")]
	WeakPassword,

	#[error("phone number rejected")]
	InvalidPhoneNumber,

	#[error("user not found")]
	UserNotFound,

	/// Backend unreachable or failing (transport errors, 5xx).
	#[error("store unavailable: {0}")]
	Unavailable(String),

	/// Any other backend failure, with its message when one was given.
	#[error("platform error")]
	Platform { message: Option<String> },
}

impl StoreError {
	/// The backend's own message for this failure, if it carries one.
	pub fn platform_message(&self) -> Option<&str> {
		match self {
			StoreError::Unavailable(msg) => Some(msg),
			StoreError::Platform { message } => message.as_deref(),
			_ => None,
		}
	}
}

pub type Result<T> = std::result::Result<T, StoreError>;
