// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Caller identity as established by the transport layer.

/// Who is invoking the provisioning call.
///
/// The transport (HTTP middleware, platform dispatcher) authenticates
/// the caller and hands the result down; the service itself only
/// checks that authentication happened, before touching the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
	Anonymous,
	/// Subject is whatever the transport's auth scheme yields
	/// (token subject, session user id).
	Authenticated { subject: String },
}

impl Caller {
	pub fn authenticated(subject: impl Into<String>) -> Self {
		Caller::Authenticated {
			subject: subject.into(),
		}
	}

	pub fn is_authenticated(&self) -> bool {
		matches!(self, Caller::Authenticated { .. })
	}
}
