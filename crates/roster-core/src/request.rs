// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Provisioning call payload and result types.

use serde::{Deserialize, Serialize};

use crate::secret::SecretString;

/// Payload of the provisioning call.
///
/// Field names follow the wire format of the mobile client
/// (camelCase). Missing fields deserialize to their empty default so
/// that validation can report them uniformly instead of the decoder
/// rejecting the body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionUserRequest {
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub email: String,
	#[serde(default)]
	pub password: SecretString,
	#[serde(default)]
	pub phone_number: Option<String>,
	#[serde(default)]
	pub department: String,
	#[serde(default)]
	pub role: String,
}

impl ProvisionUserRequest {
	/// Phone number with blank values treated as absent.
	///
	/// The credential record stores no phone at all when the caller
	/// sent none; the profile document stores an empty string instead.
	pub fn phone_number_normalized(&self) -> Option<&str> {
		self
			.phone_number
			.as_deref()
			.filter(|p| !p.trim().is_empty())
	}
}

/// Success result of the provisioning call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionOutcome {
	pub success: bool,
	pub message: String,
}

impl ProvisionOutcome {
	/// The outcome returned after all three effect steps completed.
	pub fn created() -> Self {
		Self {
			success: true,
			message: "User created successfully.".to_string(),
		}
	}
}
