// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Keyed document model for the document store interface.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single field value in a document.
///
/// [`FieldValue::ServerTimestamp`] is a write-time sentinel: the
/// document store replaces it with its own clock when the document is
/// persisted, so the caller never assigns creation timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum FieldValue {
	String(String),
	Timestamp(DateTime<Utc>),
	ServerTimestamp,
}

impl From<&str> for FieldValue {
	fn from(value: &str) -> Self {
		FieldValue::String(value.to_string())
	}
}

impl From<String> for FieldValue {
	fn from(value: String) -> Self {
		FieldValue::String(value)
	}
}

/// An ordered field map persisted under a collection and key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(BTreeMap<String, FieldValue>);

impl Document {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
		self.0.insert(field.into(), value.into());
		self
	}

	pub fn get(&self, field: &str) -> Option<&FieldValue> {
		self.0.get(field)
	}

	/// Convenience accessor for string fields.
	pub fn get_str(&self, field: &str) -> Option<&str> {
		match self.0.get(field) {
			Some(FieldValue::String(s)) => Some(s),
			_ => None,
		}
	}

	pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Replace every [`FieldValue::ServerTimestamp`] sentinel with the
	/// given instant. Store implementations call this at write time.
	pub fn resolve_server_timestamps(mut self, now: DateTime<Utc>) -> Self {
		for value in self.0.values_mut() {
			if matches!(value, FieldValue::ServerTimestamp) {
				*value = FieldValue::Timestamp(now);
			}
		}
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn server_timestamp_sentinel_resolves_at_write_time() {
		let now = Utc::now();
		let doc = Document::new()
			.set("name", "A")
			.set("createdAt", FieldValue::ServerTimestamp)
			.resolve_server_timestamps(now);

		assert_eq!(doc.get("createdAt"), Some(&FieldValue::Timestamp(now)));
		assert_eq!(doc.get_str("name"), Some("A"));
	}

	#[test]
	fn resolve_leaves_concrete_values_alone() {
		let ts = Utc::now();
		let doc = Document::new()
			.set("createdAt", FieldValue::Timestamp(ts))
			.resolve_server_timestamps(Utc::now());
		assert_eq!(doc.get("createdAt"), Some(&FieldValue::Timestamp(ts)));
	}
}
