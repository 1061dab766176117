// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Write-only secret wrapper.

use std::fmt;
use zeroize::Zeroizing;

/// A secret value (password, bearer token) that is never read back.
///
/// The inner buffer is zeroized on drop. `Debug` is redacted so the
/// value cannot leak through tracing fields or error messages. There
/// is deliberately no `Serialize` implementation.
#[derive(Clone, Default)]
pub struct SecretString(Zeroizing<String>);

impl SecretString {
	pub fn new(value: String) -> Self {
		Self(Zeroizing::new(value))
	}

	/// Access the underlying secret. Callers must not log the result.
	pub fn expose(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Number of characters in the secret.
	pub fn char_count(&self) -> usize {
		self.0.chars().count()
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("SecretString(****)")
	}
}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self::new(value.to_string())
	}
}

impl<'de> serde::Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		<String as serde::Deserialize>::deserialize(deserializer).map(SecretString::new)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn debug_is_redacted() {
		let secret = SecretString::from("hunter2");
		assert_eq!(format!("{:?}", secret), "SecretString(****)");
	}

	#[test]
	fn expose_returns_value() {
		let secret = SecretString::from("hunter2");
		assert_eq!(secret.expose(), "hunter2");
		assert_eq!(secret.char_count(), 7);
	}

	#[test]
	fn deserializes_from_plain_string() {
		let secret: SecretString = serde_json::from_str("\"s3cret\"").unwrap();
		assert_eq!(secret.expose(), "s3cret");
	}
}
